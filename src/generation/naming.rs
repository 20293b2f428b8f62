//! Tool name resolution
//!
//! Names are resolved over the whole ordered operation set in three pure
//! passes: primary names, fallback to path-based names for suspicious or
//! colliding ones, then counter-based deduplication. Input order is kept.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::generation::{Operation, Tool, input_schema::build_input_schema};

/// Lowercase or digit followed by an uppercase letter (`listProducts`)
static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid camel boundary regex"));

static NON_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]+").expect("valid non-identifier regex"));

/// Suffixes like `_1` that upstream generators append to colliding operationIds
static NUMERIC_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_\d+$").expect("valid numeric suffix regex"));

/// Fallback for names that sanitize to nothing
const EMPTY_NAME: &str = "op";

/// Turns arbitrary text into a `[a-z0-9_]+` identifier.
///
/// # Examples
/// ```
/// use bakery::generation::naming::sanitize_name;
///
/// assert_eq!(sanitize_name("getUserById"), "get_user_by_id");
/// assert_eq!(sanitize_name("list-pets.v2"), "list_pets_v2");
/// assert_eq!(sanitize_name("???"), "op");
/// ```
pub fn sanitize_name(s: &str) -> String {
    let name = sanitize_words(s);
    if name.is_empty() {
        EMPTY_NAME.to_string()
    } else {
        name
    }
}

/// Word-boundary split, collapse, trim and lowercase; may return ""
fn sanitize_words(s: &str) -> String {
    let spaced = CAMEL_BOUNDARY.replace_all(s, "${1}_${2}");
    let collapsed = NON_IDENTIFIER.replace_all(&spaced, "_");
    collapsed.trim_matches('_').to_lowercase()
}

/// Sanitized path with braces dropped; empty when the path has no segments
fn path_to_name(path: &str) -> String {
    let flattened = path.trim_matches('/').replace('/', "_").replace(['{', '}'], "");
    sanitize_words(&flattened)
}

/// Name built from method and path alone, ignoring the operationId
pub fn path_based_name(op: &Operation) -> String {
    let method = sanitize_name(&op.method);
    let path = path_to_name(&op.path);
    if path.is_empty() {
        method
    } else {
        format!("{method}_{path}")
    }
}

/// Sanitized operationId when present, otherwise the path-based name
pub fn primary_name(op: &Operation) -> String {
    match op.operation_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => sanitize_name(id),
        None => path_based_name(op),
    }
}

/// True for names that look like an upstream disambiguation suffix
pub fn has_numeric_suffix(name: &str) -> bool {
    NUMERIC_SUFFIX.is_match(name)
}

/// Pass 1: one primary name per operation
fn primary_names(ops: &[Operation]) -> Vec<String> {
    ops.iter().map(primary_name).collect()
}

/// Pass 2: replace colliding or suffixed names with path-based ones
fn apply_fallbacks(ops: &[Operation], names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in &names {
        *counts.entry(name.as_str()).or_default() += 1;
    }

    let flagged: Vec<bool> = names
        .iter()
        .map(|name| counts[name.as_str()] > 1 || has_numeric_suffix(name))
        .collect();

    names
        .iter()
        .zip(ops)
        .zip(flagged)
        .map(|((name, op), flagged)| {
            if flagged {
                let fallback = path_based_name(op);
                tracing::debug!(from = %name, to = %fallback, "Falling back to path-based tool name");
                fallback
            } else {
                name.clone()
            }
        })
        .collect()
}

/// Pass 3: suffix repeated names with `_2`, `_3`, ... in input order
///
/// A suffixed candidate never reuses a name that appears anywhere in the set,
/// so the result is unique even when a path-based name already ends in digits.
fn dedup_names(names: Vec<String>) -> Vec<String> {
    let reserved: HashSet<String> = names.iter().cloned().collect();
    let mut assigned: HashSet<String> = HashSet::with_capacity(names.len());
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        if assigned.insert(name.clone()) {
            out.push(name);
            continue;
        }

        let counter = next_suffix.entry(name.clone()).or_insert(2);
        let unique = loop {
            let candidate = format!("{name}_{counter}");
            *counter += 1;
            if !reserved.contains(&candidate) && !assigned.contains(&candidate) {
                break candidate;
            }
        };
        tracing::debug!(name = %name, unique = %unique, "Deduplicated tool name");
        assigned.insert(unique.clone());
        out.push(unique);
    }

    out
}

/// Resolves final, unique tool names for an ordered operation list
pub fn resolve_names(ops: &[Operation]) -> Vec<String> {
    let names = primary_names(ops);
    let names = apply_fallbacks(ops, names);
    dedup_names(names)
}

/// Converts one operation to a tool carrying its primary name
pub fn operation_to_tool(op: &Operation, base_url: &str) -> Tool {
    build_tool(op, primary_name(op), base_url)
}

/// Maps each operation to one tool with a unique, descriptive name
pub fn operations_to_tools(ops: &[Operation], base_url: &str) -> Vec<Tool> {
    let names = resolve_names(ops);
    tracing::debug!(tools = names.len(), "Resolved tool names");
    ops.iter()
        .zip(names)
        .map(|(op, name)| build_tool(op, name, base_url))
        .collect()
}

fn build_tool(op: &Operation, name: String, base_url: &str) -> Tool {
    let method = op.method.to_uppercase();
    let description = match op.summary.as_deref().filter(|s| !s.is_empty()) {
        Some(summary) => summary.to_string(),
        None => format!("{method} {}", op.path),
    };

    Tool {
        name,
        description,
        input_schema: build_input_schema(op),
        params: op.parameters.clone(),
        body: op.request_body.clone(),
        method,
        path: op.path.clone(),
        base_url: base_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Parameter, ParameterLocation, Schema};

    fn op(id: Option<&str>, method: &str, path: &str) -> Operation {
        let op = Operation::new(method, path);
        match id {
            Some(id) => op.with_operation_id(id),
            None => op,
        }
    }

    fn names(tools: &[Tool]) -> Vec<&str> {
        tools.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("getUser"), "get_user");
        assert_eq!(sanitize_name("listProducts"), "list_products");
        assert_eq!(sanitize_name("getProductById"), "get_product_by_id");
        assert_eq!(sanitize_name("HTTPResponse"), "httpresponse");
        assert_eq!(sanitize_name("v2Users"), "v2_users");
        assert_eq!(sanitize_name("  weird--name!! "), "weird_name");
        assert_eq!(sanitize_name("__private__"), "private");
        assert_eq!(sanitize_name(""), "op");
        assert_eq!(sanitize_name("-/-"), "op");
    }

    #[test]
    fn test_name_from_operation_id() {
        let tool = operation_to_tool(
            &op(Some("getUser"), "GET", "/users/{id}").with_summary("Get user"),
            "http://localhost:8080",
        );
        assert_eq!(tool.name, "get_user");
        assert_eq!(tool.description, "Get user");
        assert_eq!(tool.method, "GET");
        assert_eq!(tool.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_name_from_path_and_method() {
        let tool = operation_to_tool(&op(None, "POST", "/items"), "");
        assert_eq!(tool.name, "post_items");
        assert_eq!(tool.description, "POST /items");
    }

    #[test]
    fn test_empty_operation_id_uses_path() {
        let tool = operation_to_tool(&op(Some(""), "get", "/pets/{petId}/photos"), "");
        assert_eq!(tool.name, "get_pets_pet_id_photos");
        assert_eq!(tool.method, "GET");
    }

    #[test]
    fn test_root_path_yields_method_only() {
        assert_eq!(path_based_name(&op(None, "GET", "/")), "get");
        assert_eq!(path_based_name(&op(None, "GET", "")), "get");
        assert_eq!(path_based_name(&op(None, "DELETE", "/{}/")), "delete");
    }

    #[test]
    fn test_path_literally_named_op() {
        assert_eq!(path_based_name(&op(None, "GET", "/op")), "get_op");
    }

    #[test]
    fn test_numeric_suffix_falls_back_to_path() {
        let ops = vec![
            op(Some("create_1"), "POST", "/deeplink/domain"),
            op(Some("getAll_1"), "GET", "/deeplink/domain"),
        ];
        let tools = operations_to_tools(&ops, "http://localhost:8080");
        assert_eq!(names(&tools), vec!["post_deeplink_domain", "get_deeplink_domain"]);
    }

    #[test]
    fn test_numeric_suffix_without_collision() {
        let tools = operations_to_tools(&[op(Some("create_1"), "POST", "/deeplink/domain")], "");
        assert_eq!(names(&tools), vec!["post_deeplink_domain"]);
    }

    #[test]
    fn test_numeric_suffix_update_by_id() {
        let ops = vec![
            op(Some("updateById"), "PUT", "/deeplinks/{id}"),
            op(Some("updateById_1"), "PUT", "/deeplink/domain/update/{id}"),
        ];
        let tools = operations_to_tools(&ops, "");
        assert_eq!(names(&tools), vec!["update_by_id", "put_deeplink_domain_update_id"]);
    }

    #[test]
    fn test_collision_falls_back_to_path() {
        let ops = vec![
            op(Some("delete"), "DELETE", "/products/{id}"),
            op(Some("delete"), "DELETE", "/orders/{id}"),
        ];
        let tools = operations_to_tools(&ops, "");
        assert_eq!(names(&tools), vec!["delete_products_id", "delete_orders_id"]);
    }

    #[test]
    fn test_same_path_and_method_final_dedup() {
        let ops = vec![
            op(Some("doThing"), "POST", "/things"),
            op(Some("doThing"), "POST", "/things"),
            op(Some("doThing"), "POST", "/things"),
        ];
        let tools = operations_to_tools(&ops, "");
        assert_eq!(names(&tools), vec!["post_things", "post_things_2", "post_things_3"]);
    }

    #[test]
    fn test_dedup_skips_names_already_in_use() {
        let deduped = dedup_names(vec![
            "get_api".to_string(),
            "get_api".to_string(),
            "get_api_2".to_string(),
        ]);
        assert_eq!(deduped, vec!["get_api", "get_api_3", "get_api_2"]);
    }

    #[test]
    fn test_good_names_unchanged() {
        let ops = vec![
            op(Some("listProducts"), "GET", "/products"),
            op(Some("createProduct"), "POST", "/products"),
            op(Some("getProductById"), "GET", "/products/{id}"),
        ];
        let tools = operations_to_tools(&ops, "");
        assert_eq!(
            names(&tools),
            vec!["list_products", "create_product", "get_product_by_id"]
        );
    }

    #[test]
    fn test_deeplink_full_scenario() {
        let ops = vec![
            op(Some("updateById"), "PUT", "/deeplinks/{id}")
                .with_summary("Update a specific deeplink"),
            op(Some("create_1"), "POST", "/deeplink/domain"),
            op(Some("getAll_1"), "GET", "/deeplink/domain"),
            op(Some("deleteById"), "DELETE", "/deeplink/domain/delete/{id}"),
            op(Some("updateById_1"), "PUT", "/deeplink/domain/update/{id}"),
        ];
        let tools = operations_to_tools(&ops, "http://localhost:8080");
        assert_eq!(
            names(&tools),
            vec![
                "update_by_id",
                "post_deeplink_domain",
                "get_deeplink_domain",
                "delete_by_id",
                "put_deeplink_domain_update_id",
            ]
        );
        assert_eq!(tools[0].description, "Update a specific deeplink");
    }

    #[test]
    fn test_names_are_identifier_safe_and_unique() {
        let pattern = Regex::new(r"^[a-z0-9_]+$").unwrap();
        let ops = vec![
            op(Some("Ünïcödé"), "GET", "/ü"),
            op(Some("!!!"), "GET", "/"),
            op(None, "GET", "/"),
            op(Some("get"), "POST", "/"),
            op(Some("a_1"), "GET", "/a/1"),
            op(Some("a"), "GET", "/a"),
            op(Some("a"), "GET", "/a/"),
            op(None, "GET", "/api/{version}/items"),
            op(None, "GET", "/api/{version}/items"),
        ];
        let tools = operations_to_tools(&ops, "");
        let mut seen = HashSet::new();
        for tool in &tools {
            assert!(pattern.is_match(&tool.name), "bad name {:?}", tool.name);
            assert!(seen.insert(tool.name.clone()), "duplicate name {:?}", tool.name);
        }
        assert_eq!(tools.len(), ops.len());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let ops = vec![
            op(Some("delete"), "DELETE", "/products/{id}"),
            op(Some("delete"), "DELETE", "/orders/{id}"),
            op(Some("x_2"), "GET", "/x"),
        ];
        assert_eq!(resolve_names(&ops), resolve_names(&ops));
    }

    #[test]
    fn test_tool_carries_params_and_input_schema() {
        let operation = op(Some("search"), "get", "/search").with_parameter(Parameter {
            name: "q".to_string(),
            location: ParameterLocation::Query,
            required: true,
            schema: Some(Schema::of_type("string")),
        });
        let tool = operation_to_tool(&operation, "");
        assert_eq!(tool.params.len(), 1);
        let props = tool.input_schema.properties.as_ref().unwrap();
        assert!(props.contains_key("q"));
    }
}
