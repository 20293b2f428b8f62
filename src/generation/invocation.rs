//! Executor synthesis: one async `fetch` function per tool
//!
//! The generated function performs exactly one request per invocation and
//! returns the raw response text. Non-2xx responses throw with the status and
//! body. Header parameters are accepted by the validator but not forwarded.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::generation::{
    Parameter, ParameterLocation, Tool,
    sanitizers::{binding_name, js_string, member_access, property_key, template_literal_text},
};

/// Name of the runtime-overridable origin constant in the entry script
pub const BASE_URL_IDENT: &str = "BASE_URL";

const ARGS: &str = "args";
const BODY_ARGS: &str = "bodyArgs";

static PATH_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("valid path placeholder regex"));

/// Identifiers the executor body declares or reads; destructured locals must avoid them
const EXECUTOR_IDENTS: &[&str] = &[
    ARGS,
    BODY_ARGS,
    BASE_URL_IDENT,
    "url",
    "qp",
    "qs",
    "res",
    "body",
    "fetch",
    "encodeURIComponent",
    "String",
    "URLSearchParams",
    "JSON",
    "Error",
];

/// How the function body refers to path and query arguments
struct ArgRefs<'a> {
    /// Argument names pulled out of `args` with their local bindings, in emission order
    destructured: Vec<(&'a str, String)>,
}

impl<'a> ArgRefs<'a> {
    /// Binds each name to a local that is unique within the executor
    fn destructure(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut taken: HashSet<String> = EXECUTOR_IDENTS.iter().map(|s| s.to_string()).collect();
        let mut destructured: Vec<(&'a str, String)> = Vec::new();

        for name in names {
            if destructured.iter().any(|(n, _)| *n == name) {
                continue;
            }
            let base = binding_name(name);
            let mut local = base.clone();
            let mut counter = 2;
            while taken.contains(&local) {
                local = format!("{base}_{counter}");
                counter += 1;
            }
            taken.insert(local.clone());
            destructured.push((name, local));
        }

        Self { destructured }
    }

    fn get(&self, name: &str) -> String {
        match self.destructured.iter().find(|(n, _)| *n == name) {
            Some((_, local)) => local.clone(),
            None => member_access(ARGS, name),
        }
    }

    /// `const { id, "page-size": page_size, ...bodyArgs } = args;`
    fn destructuring_line(&self) -> String {
        let bindings: Vec<String> = self
            .destructured
            .iter()
            .map(|(name, local)| {
                if local.as_str() == *name {
                    local.clone()
                } else {
                    format!("{}: {}", property_key(name), local)
                }
            })
            .collect();
        format!(
            "    const {{ {}, ...{BODY_ARGS} }} = {ARGS};",
            bindings.join(", ")
        )
    }
}

/// Renders the executor function for a tool
pub fn build_executor(tool: &Tool) -> String {
    let path_params: Vec<&Parameter> = tool.params_in(ParameterLocation::Path).collect();
    let query_params: Vec<&Parameter> = tool.params_in(ParameterLocation::Query).collect();
    let has_body = tool.body.is_some();
    let has_path_params = !path_params.is_empty();
    let has_query_params = !query_params.is_empty();
    let has_url_params = has_path_params || has_query_params;
    let needs_args = has_body || has_url_params;

    if tool.params_in(ParameterLocation::Header).next().is_some() {
        tracing::debug!(tool = %tool.name, "Header parameters are not forwarded by the executor");
    }

    let use_destructuring = has_body && has_url_params;
    let refs = if use_destructuring {
        ArgRefs::destructure(
            path_params
                .iter()
                .chain(&query_params)
                .map(|p| p.name.as_str()),
        )
    } else {
        ArgRefs {
            destructured: Vec::new(),
        }
    };

    let mut lines = Vec::new();
    if use_destructuring {
        lines.push(refs.destructuring_line());
    }

    let url_expr = build_url_expr(&tool.path, has_path_params, &refs);
    if has_url_params {
        lines.push(format!("    let url = {url_expr};"));
    }

    if has_query_params {
        lines.push("    const qp = new URLSearchParams();".to_string());
        for param in &query_params {
            let value = refs.get(&param.name);
            lines.push(format!(
                "    if ({value} !== undefined) qp.append({}, String({value}));",
                js_string(&param.name)
            ));
        }
        lines.push("    const qs = qp.toString();".to_string());
        lines.push("    if (qs) url += \"?\" + qs;".to_string());
    }

    let fetch_url = if has_url_params { "url" } else { url_expr.as_str() };
    let method = js_string(&tool.method);

    if has_body {
        let body_ref = if use_destructuring { BODY_ARGS } else { ARGS };
        lines.push(format!("    const res = await fetch({fetch_url}, {{"));
        lines.push(format!("      method: {method},"));
        lines.push("      headers: { \"Content-Type\": \"application/json\" },".to_string());
        lines.push(format!("      body: JSON.stringify({body_ref}),"));
        lines.push("    });".to_string());
    } else {
        lines.push(format!(
            "    const res = await fetch({fetch_url}, {{ method: {method} }});"
        ));
    }

    lines.push("    const body = await res.text();".to_string());
    lines.push(
        "    if (!res.ok) throw new Error(\"HTTP \" + res.status + \": \" + body);".to_string(),
    );
    lines.push("    return body;".to_string());

    let params = if needs_args { "(args)" } else { "()" };
    format!("async {params} => {{\n{}\n  }}", lines.join("\n"))
}

/// URL expression: plain concatenation without path parameters, otherwise a
/// template literal with every `{name}` placeholder percent-encoded
fn build_url_expr(path: &str, has_path_params: bool, refs: &ArgRefs<'_>) -> String {
    if !has_path_params {
        return format!("{BASE_URL_IDENT} + {}", js_string(path));
    }

    let mut out = String::new();
    let mut last = 0;
    for caps in PATH_PLACEHOLDER.captures_iter(path) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&template_literal_text(&path[last..whole.start()]));
        out.push_str(&format!(
            "${{encodeURIComponent({})}}",
            refs.get(name.as_str())
        ));
        last = whole.end();
    }
    out.push_str(&template_literal_text(&path[last..]));

    format!("`${{{BASE_URL_IDENT}}}{out}`")
}
