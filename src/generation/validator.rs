//! Validator synthesis: structural schemas to zod expression text
//!
//! Translation is a total function over [`SchemaShape`]; every arm, including
//! `Any`, produces an expression, so malformed schema fragments degrade to
//! `z.any()` instead of failing generation. Object fields are emitted in
//! lexicographic order so output is stable and diffable.

use crate::generation::{
    Primitive, Schema, SchemaShape, Tool,
    sanitizers::{js_string, property_key},
    schema::MAX_SCHEMA_DEPTH,
};

/// Accept-anything validator
pub const ANY_VALIDATOR: &str = "z.any()";

/// Validator for an object with no fields
pub const EMPTY_OBJECT_VALIDATOR: &str = "z.object({})";

/// Indentation of the top-level argument fields inside `addTool`
const FIELD_INDENT: usize = 4;

/// Indentation of fields one object level below the top-level arguments
const NESTED_INDENT: usize = FIELD_INDENT + 2;

/// One field of a structured validator
#[derive(Debug, Clone, PartialEq)]
struct ZodField {
    name: String,
    expr: String,
    required: bool,
}

impl ZodField {
    fn render(&self, indent: usize) -> String {
        let optional = if self.required { "" } else { ".optional()" };
        format!(
            "{}{}: {}{},",
            " ".repeat(indent),
            property_key(&self.name),
            self.expr,
            optional
        )
    }
}

/// Renders the full argument validator for a tool.
///
/// Every parameter becomes a field (optional unless required). Properties of
/// the request body are flattened into the same top-level object, optional
/// unless listed in the body's own `required`. Fields are sorted by name.
pub fn build_validator(tool: &Tool) -> String {
    let mut fields: Vec<ZodField> = tool
        .params
        .iter()
        .map(|p| ZodField {
            name: p.name.clone(),
            expr: schema_to_zod(p.schema.as_ref(), NESTED_INDENT),
            required: p.required,
        })
        .collect();

    if let Some(body) = &tool.body {
        let required = body.schema.required_set();
        for (name, schema) in body.schema.properties.iter().flatten() {
            fields.push(ZodField {
                name: name.clone(),
                expr: schema_to_zod(Some(schema), NESTED_INDENT),
                required: required.contains(name.as_str()),
            });
        }
    }

    if fields.is_empty() {
        return EMPTY_OBJECT_VALIDATOR.to_string();
    }

    fields.sort_by(|a, b| a.name.cmp(&b.name));
    render_object(&fields, FIELD_INDENT)
}

/// Translates one schema node. `indent` is the indentation of the fields of
/// any object literal this node renders.
pub fn schema_to_zod(schema: Option<&Schema>, indent: usize) -> String {
    match schema {
        Some(schema) => render(schema, indent, 0),
        None => ANY_VALIDATOR.to_string(),
    }
}

fn render(schema: &Schema, indent: usize, depth: usize) -> String {
    if depth > MAX_SCHEMA_DEPTH {
        return ANY_VALIDATOR.to_string();
    }

    match schema.shape() {
        SchemaShape::Enum(values) => {
            let literals: Vec<String> = values.iter().map(|v| js_string(v)).collect();
            format!("z.enum([{}])", literals.join(", "))
        }
        SchemaShape::Primitive(Primitive::String) => "z.string()".to_string(),
        SchemaShape::Primitive(Primitive::Number) => "z.number()".to_string(),
        SchemaShape::Primitive(Primitive::Boolean) => "z.boolean()".to_string(),
        SchemaShape::Array(Some(items)) => {
            format!("z.array({})", render(items, indent, depth + 1))
        }
        SchemaShape::Array(None) => format!("z.array({ANY_VALIDATOR})"),
        SchemaShape::Object {
            properties,
            required,
        } => {
            // BTreeMap iteration is already lexicographic
            let fields: Vec<ZodField> = properties
                .iter()
                .map(|(name, prop)| ZodField {
                    name: name.clone(),
                    expr: render(prop, indent + 2, depth + 1),
                    required: required.contains(name.as_str()),
                })
                .collect();
            render_object(&fields, indent)
        }
        SchemaShape::Record => format!("z.record({ANY_VALIDATOR})"),
        SchemaShape::EmptyObject => EMPTY_OBJECT_VALIDATOR.to_string(),
        SchemaShape::Any => ANY_VALIDATOR.to_string(),
    }
}

fn render_object(fields: &[ZodField], indent: usize) -> String {
    let lines: Vec<String> = fields.iter().map(|f| f.render(indent)).collect();
    format!(
        "z.object({{\n{}\n{}}})",
        lines.join("\n"),
        " ".repeat(indent.saturating_sub(2))
    )
}
