//! OpenAPI 3.x document parser
//!
//! Normalizes a raw document into an [`ApiDescription`]:
//! - rejects Swagger 2.0 and documents without an `openapi` version
//! - takes the first server URL as the base origin
//! - merges path-level and operation-level parameters
//! - resolves local `$ref` pointers (a cycle degrades to a permissive schema)
//! - keeps only JSON request bodies

use serde_json::Value as JsonValue;

use super::ApiDescription;
use crate::generation::{
    GenerationError, Operation, Parameter, ParameterLocation, RequestBody, Schema,
};

/// Longest chain of nested references followed before giving up
const MAX_REF_DEPTH: usize = 64;

const JSON_MEDIA_TYPE: &str = "application/json";

/// HTTP methods supported by OpenAPI, in the order operations are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Get all HTTP methods as an array
    pub fn all() -> &'static [HttpMethod] {
        &[
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Post,
            HttpMethod::Delete,
            HttpMethod::Options,
            HttpMethod::Head,
            HttpMethod::Patch,
            HttpMethod::Trace,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses document text as JSON or YAML. `source` is only used as a format hint.
pub fn parse_document(content: &str, source: &str) -> Result<JsonValue, GenerationError> {
    if source.ends_with(".json") {
        serde_json::from_str(content).map_err(parse_error)
    } else if source.ends_with(".yaml") || source.ends_with(".yml") {
        serde_yaml::from_str(content).map_err(parse_error)
    } else {
        // YAML is a superset of JSON, so try the strict format first
        serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(parse_error)
    }
}

fn parse_error(e: impl std::fmt::Display) -> GenerationError {
    GenerationError::ValidationError(format!("Failed to parse OpenAPI description: {e}"))
}

/// OpenAPI document parser
pub struct OpenApiParser {
    /// The raw JSON value of the document
    pub json: JsonValue,
}

impl OpenApiParser {
    /// Create a new parser from JSON content
    pub fn new(json: JsonValue) -> Self {
        Self { json }
    }

    /// Parse the document into a normalized description
    pub fn parse(&self) -> Result<ApiDescription, GenerationError> {
        let version = self.check_version()?;
        let base_url = self.base_url();
        let operations = self.parse_operations()?;
        tracing::debug!(
            version = %version,
            operations = operations.len(),
            "OpenAPI parser found operations"
        );

        Ok(ApiDescription {
            version,
            base_url,
            operations,
        })
    }

    /// Accepts 3.x documents only
    fn check_version(&self) -> Result<String, GenerationError> {
        // An unquoted YAML `openapi: 3.1` arrives as a number
        let version = match self.json.get("openapi") {
            Some(JsonValue::String(v)) => Some(v.clone()),
            Some(JsonValue::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        match version {
            Some(v) if !v.is_empty() && !v.starts_with('2') => Ok(v),
            Some(v) if !v.is_empty() => Err(GenerationError::UnsupportedSpecVersion(v)),
            _ => {
                let declared = self
                    .json
                    .get("swagger")
                    .and_then(JsonValue::as_str)
                    .unwrap_or("2.0");
                Err(GenerationError::UnsupportedSpecVersion(declared.to_string()))
            }
        }
    }

    /// First server URL without trailing slash
    fn base_url(&self) -> String {
        self.json
            .get("servers")
            .and_then(JsonValue::as_array)
            .and_then(|servers| servers.first())
            .and_then(|server| server.get("url"))
            .and_then(JsonValue::as_str)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_default()
    }

    /// All operations, in sorted path order and fixed method order
    pub fn parse_operations(&self) -> Result<Vec<Operation>, GenerationError> {
        let Some(paths) = self.json.get("paths").and_then(JsonValue::as_object) else {
            tracing::warn!("OpenAPI description has no 'paths' object");
            return Ok(Vec::new());
        };

        let mut entries: Vec<(&String, &JsonValue)> = paths.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut operations = Vec::new();
        for (path, path_item) in entries {
            // Only parameters and bodies are resolved, so unrelated references
            // (responses, callbacks) never fail the parse
            let path_item = match path_item.get("$ref").and_then(JsonValue::as_str) {
                Some(ref_str) => self.lookup_ref(ref_str)?,
                None => path_item,
            };
            for method in HttpMethod::all() {
                if let Some(method_item) = path_item.get(method.as_str()).filter(|v| v.is_object())
                {
                    operations.push(self.build_operation(path, *method, path_item, method_item)?);
                }
            }
        }
        Ok(operations)
    }

    fn build_operation(
        &self,
        path: &str,
        method: HttpMethod,
        path_item: &JsonValue,
        method_item: &JsonValue,
    ) -> Result<Operation, GenerationError> {
        let operation_id = method_item
            .get("operationId")
            .and_then(JsonValue::as_str)
            .filter(|id| !id.is_empty())
            .map(String::from);
        let summary = method_item
            .get("summary")
            .and_then(JsonValue::as_str)
            .map(String::from);

        // Operation-level parameters override path-level ones with the same name and location
        let mut parameters = self.extract_parameters(path_item)?;
        for param in self.extract_parameters(method_item)? {
            match parameters
                .iter_mut()
                .find(|p| p.name == param.name && p.location == param.location)
            {
                Some(existing) => *existing = param,
                None => parameters.push(param),
            }
        }

        let request_body = match method_item.get("requestBody") {
            Some(body) => self.parse_request_body(body)?,
            None => None,
        };

        Ok(Operation {
            path: path.to_string(),
            method: method.to_string(),
            operation_id,
            summary,
            parameters,
            request_body,
        })
    }

    fn extract_parameters(&self, item: &JsonValue) -> Result<Vec<Parameter>, GenerationError> {
        let Some(params) = item.get("parameters").and_then(JsonValue::as_array) else {
            return Ok(Vec::new());
        };

        let mut out = Vec::with_capacity(params.len());
        for raw in params {
            let resolved = self.resolve(raw)?;
            if let Some(param) = self.parse_parameter(&resolved) {
                out.push(param);
            }
        }
        Ok(out)
    }

    /// Parses a resolved parameter; unsupported locations are skipped
    fn parse_parameter(&self, param: &JsonValue) -> Option<Parameter> {
        let name = param.get("name").and_then(JsonValue::as_str)?;
        let location_str = param.get("in").and_then(JsonValue::as_str).unwrap_or_default();
        let location: ParameterLocation = match location_str.parse() {
            Ok(location) => location,
            Err(_) => {
                tracing::debug!(parameter = %name, location = %location_str, "Skipping parameter");
                return None;
            }
        };

        let declared_required = param
            .get("required")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);
        // Path parameters are always required
        let required = declared_required || location == ParameterLocation::Path;

        Some(Parameter {
            name: name.to_string(),
            location,
            required,
            schema: param.get("schema").map(Schema::from_json),
        })
    }

    /// Keeps the JSON content schema only
    fn parse_request_body(&self, body: &JsonValue) -> Result<Option<RequestBody>, GenerationError> {
        let body = self.resolve(body)?;
        let Some(content) = body.get("content").and_then(JsonValue::as_object) else {
            return Ok(None);
        };

        let json_content = content.get(JSON_MEDIA_TYPE).or_else(|| {
            content
                .iter()
                .find(|(media_type, _)| media_type.starts_with(JSON_MEDIA_TYPE))
                .map(|(_, v)| v)
        });

        let Some(schema) = json_content.and_then(|c| c.get("schema")) else {
            tracing::debug!("Skipping request body without JSON content");
            return Ok(None);
        };

        Ok(Some(RequestBody {
            required: body
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
            schema: Schema::from_json(schema),
        }))
    }

    /// Resolves local `$ref` pointers in `value`.
    ///
    /// A reference already being expanded further up the chain resolves to an
    /// empty (permissive) schema, as does anything past `MAX_REF_DEPTH`.
    fn resolve(&self, value: &JsonValue) -> Result<JsonValue, GenerationError> {
        self.resolve_in(value, &mut Vec::new())
    }

    fn resolve_in<'a>(
        &'a self,
        value: &'a JsonValue,
        active: &mut Vec<&'a str>,
    ) -> Result<JsonValue, GenerationError> {
        match value {
            JsonValue::Object(obj) => {
                if let Some(ref_str) = obj.get("$ref").and_then(JsonValue::as_str) {
                    if active.contains(&ref_str) || active.len() >= MAX_REF_DEPTH {
                        tracing::debug!(reference = %ref_str, "Cyclic reference; treating schema as permissive");
                        return Ok(JsonValue::Object(serde_json::Map::new()));
                    }
                    let target = self.lookup_ref(ref_str)?;
                    active.push(ref_str);
                    let resolved = self.resolve_in(target, active);
                    active.pop();
                    return resolved;
                }

                let mut resolved = serde_json::Map::new();
                for (key, val) in obj {
                    resolved.insert(key.clone(), self.resolve_in(val, active)?);
                }
                Ok(JsonValue::Object(resolved))
            }
            JsonValue::Array(arr) => arr
                .iter()
                .map(|elem| self.resolve_in(elem, active))
                .collect::<Result<Vec<_>, _>>()
                .map(JsonValue::Array),
            _ => Ok(value.clone()),
        }
    }

    /// Looks up a `#/...` JSON pointer in this document
    fn lookup_ref(&self, ref_str: &str) -> Result<&JsonValue, GenerationError> {
        let Some(pointer) = ref_str.strip_prefix('#') else {
            return Err(GenerationError::ValidationError(format!(
                "External references not supported: {ref_str}"
            )));
        };
        self.json.pointer(pointer).ok_or_else(|| {
            GenerationError::ValidationError(format!("Unable to resolve reference: {ref_str}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(doc: JsonValue) -> ApiDescription {
        OpenApiParser::new(doc).parse().unwrap()
    }

    #[test]
    fn test_rejects_swagger_2() {
        let result = OpenApiParser::new(json!({ "swagger": "2.0", "paths": {} })).parse();
        match result {
            Err(GenerationError::UnsupportedSpecVersion(v)) => assert_eq!(v, "2.0"),
            other => panic!("Expected UnsupportedSpecVersion, got {other:?}"),
        }

        let result = OpenApiParser::new(json!({ "openapi": "2.0", "paths": {} })).parse();
        assert!(matches!(result, Err(GenerationError::UnsupportedSpecVersion(_))));

        let result = OpenApiParser::new(json!({ "paths": {} })).parse();
        assert!(matches!(result, Err(GenerationError::UnsupportedSpecVersion(_))));
    }

    #[test]
    fn test_base_url_from_first_server() {
        let description = parse(json!({
            "openapi": "3.0.3",
            "servers": [{ "url": "http://localhost:8080/" }, { "url": "http://other" }],
            "paths": {}
        }));
        assert_eq!(description.version, "3.0.3");
        assert_eq!(description.base_url, "http://localhost:8080");
        assert!(description.operations.is_empty());

        let description = parse(json!({ "openapi": "3.1.0", "paths": {} }));
        assert_eq!(description.base_url, "");
    }

    #[test]
    fn test_operation_order_is_stable() {
        let description = parse(json!({
            "openapi": "3.0.0",
            "paths": {
                "/zebras": { "post": {}, "get": {} },
                "/apples/{id}": { "delete": {}, "get": {}, "patch": {} }
            }
        }));
        let seen: Vec<(String, String)> = description
            .operations
            .iter()
            .map(|op| (op.method.clone(), op.path.clone()))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("get".to_string(), "/apples/{id}".to_string()),
                ("delete".to_string(), "/apples/{id}".to_string()),
                ("patch".to_string(), "/apples/{id}".to_string()),
                ("get".to_string(), "/zebras".to_string()),
                ("post".to_string(), "/zebras".to_string()),
            ]
        );
    }

    #[test]
    fn test_parameters_merged_and_resolved() {
        let description = parse(json!({
            "openapi": "3.0.0",
            "paths": {
                "/pets/{petId}": {
                    "parameters": [
                        { "name": "petId", "in": "path", "schema": { "type": "string" } },
                        { "$ref": "#/components/parameters/Limit" }
                    ],
                    "get": {
                        "operationId": "getPet",
                        "summary": "Get a pet",
                        "parameters": [
                            { "name": "petId", "in": "path", "required": true,
                              "schema": { "$ref": "#/components/schemas/PetId" } },
                            { "name": "session", "in": "cookie", "schema": { "type": "string" } },
                            { "name": "X-Trace", "in": "header", "schema": { "type": "string" } }
                        ]
                    }
                }
            },
            "components": {
                "schemas": { "PetId": { "type": "integer" } },
                "parameters": {
                    "Limit": { "name": "limit", "in": "query", "schema": { "type": "integer" } }
                }
            }
        }));

        let op = &description.operations[0];
        assert_eq!(op.operation_id.as_deref(), Some("getPet"));
        assert_eq!(op.summary.as_deref(), Some("Get a pet"));

        let names: Vec<&str> = op.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["petId", "limit", "X-Trace"]);

        let pet_id = &op.parameters[0];
        assert_eq!(pet_id.location, ParameterLocation::Path);
        assert!(pet_id.required);
        assert_eq!(pet_id.schema, Some(Schema::of_type("integer")));

        assert_eq!(op.parameters[1].location, ParameterLocation::Query);
        assert!(!op.parameters[1].required);
        assert_eq!(op.parameters[2].location, ParameterLocation::Header);
    }

    #[test]
    fn test_path_parameters_always_required() {
        let description = parse(json!({
            "openapi": "3.0.0",
            "paths": { "/a/{id}": { "get": { "parameters": [
                { "name": "id", "in": "path", "schema": { "type": "string" } }
            ] } } }
        }));
        assert!(description.operations[0].parameters[0].required);
    }

    #[test]
    fn test_json_request_body_only() {
        let description = parse(json!({
            "openapi": "3.0.0",
            "paths": {
                "/pets": {
                    "post": {
                        "requestBody": { "$ref": "#/components/requestBodies/Pet" }
                    },
                    "put": {
                        "requestBody": {
                            "content": { "application/xml": { "schema": { "type": "object" } } }
                        }
                    },
                    "patch": {
                        "requestBody": {
                            "content": {
                                "application/json; charset=utf-8": { "schema": { "type": "object" } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Pet": {
                        "type": "object",
                        "required": ["name"],
                        "properties": {
                            "name": { "type": "string" },
                            "tag": { "$ref": "#/components/schemas/Tag" }
                        }
                    },
                    "Tag": { "type": "string", "enum": ["a", "b"] }
                },
                "requestBodies": {
                    "Pet": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
                    }
                }
            }
        }));

        let ops = &description.operations;
        assert_eq!(ops[0].method, "put");
        assert!(ops[0].request_body.is_none());

        assert_eq!(ops[1].method, "post");
        let body = ops[1].request_body.as_ref().unwrap();
        assert!(body.required);
        let props = body.schema.properties.as_ref().unwrap();
        assert_eq!(props["name"], Schema::of_type("string"));
        assert_eq!(
            props["tag"],
            Schema::of_type("string").with_enum(vec![json!("a"), json!("b")])
        );
        assert_eq!(body.schema.required, Some(vec!["name".to_string()]));

        assert_eq!(ops[2].method, "patch");
        let body = ops[2].request_body.as_ref().unwrap();
        assert!(!body.required);
    }

    #[test]
    fn test_cyclic_reference_terminates() {
        let description = parse(json!({
            "openapi": "3.0.0",
            "paths": {
                "/nodes": {
                    "post": {
                        "requestBody": {
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Node" } } }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Node": {
                        "type": "object",
                        "properties": {
                            "children": { "type": "array", "items": { "$ref": "#/components/schemas/Node" } }
                        }
                    }
                }
            }
        }));
        assert!(description.operations[0].request_body.is_some());
    }

    #[test]
    fn test_unresolvable_reference_is_an_error() {
        let result = OpenApiParser::new(json!({
            "openapi": "3.0.0",
            "paths": { "/a": { "get": { "parameters": [{ "$ref": "#/nope" }] } } }
        }))
        .parse();
        match result {
            Err(GenerationError::ValidationError(msg)) => assert!(msg.contains("#/nope")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_only_used_references_are_resolved() {
        let description = parse(json!({
            "openapi": "3.0.0",
            "paths": {
                "/shared": { "$ref": "#/components/pathItems/Shared" },
                "/orders": {
                    "get": {
                        "responses": { "200": { "$ref": "common.yaml#/responses/Ok" } }
                    }
                }
            },
            "components": {
                "pathItems": {
                    "Shared": { "get": { "operationId": "getShared" } }
                }
            }
        }));
        assert_eq!(description.operations.len(), 2);
        assert_eq!(description.operations[1].operation_id.as_deref(), Some("getShared"));
    }

    #[test]
    fn test_missing_paths_yields_no_operations() {
        let description = parse(json!({ "openapi": "3.0.0" }));
        assert!(description.operations.is_empty());
    }

    #[test]
    fn test_parse_document_formats() {
        let json_doc = parse_document(r#"{"openapi":"3.0.0"}"#, "spec.json").unwrap();
        assert_eq!(json_doc["openapi"], "3.0.0");

        let yaml_doc = parse_document("openapi: 3.0.0\npaths: {}\n", "spec.yaml").unwrap();
        assert_eq!(yaml_doc["openapi"], "3.0.0");

        let sniffed = parse_document("openapi: 3.1.0\n", "spec").unwrap();
        assert_eq!(sniffed["openapi"], "3.1.0");

        let numeric = parse_document("openapi: 3.1\npaths: {}\n", "spec.yml").unwrap();
        assert_eq!(OpenApiParser::new(numeric).parse().unwrap().version, "3.1");

        let err = parse_document("{ not json", "spec.json").unwrap_err();
        assert!(matches!(err, GenerationError::ValidationError(_)));
    }
}
