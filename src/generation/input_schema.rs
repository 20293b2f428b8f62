//! Aggregate input schema for a tool

use std::collections::BTreeMap;

use crate::generation::{Operation, Schema};

/// Property name under which the request body appears in the aggregate schema
pub const BODY_PROPERTY: &str = "body";

/// Merges parameter schemas and the JSON body schema into one object schema.
///
/// Each parameter becomes a property keyed by its name (permissive when it has
/// no schema); a request body becomes the `body` property. `required` lists the
/// required parameters in declaration order, then `body` when the body is
/// required.
pub fn build_input_schema(op: &Operation) -> Schema {
    let mut properties = BTreeMap::new();
    let mut required = Vec::new();

    for param in &op.parameters {
        properties.insert(
            param.name.clone(),
            param.schema.clone().unwrap_or_else(Schema::any),
        );
        if param.required {
            required.push(param.name.clone());
        }
    }

    if let Some(body) = &op.request_body {
        properties.insert(BODY_PROPERTY.to_string(), body.schema.clone());
        if body.required {
            required.push(BODY_PROPERTY.to_string());
        }
    }

    Schema {
        schema_type: Some("object".to_string()),
        properties: Some(properties),
        required: (!required.is_empty()).then_some(required),
        ..Default::default()
    }
}
