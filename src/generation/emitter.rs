//! Project emission: `package.json` and the `index.js` entry script
//!
//! Both artifacts are pure functions of the tool list, so identical input
//! produces byte-identical output.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::generation::{
    Artifact, GenerationError, GenerationMetadata, Tool,
    invocation::{BASE_URL_IDENT, build_executor},
    sanitizers::js_string,
    validator::build_validator,
};

pub const MANIFEST_FILE: &str = "package.json";
pub const ENTRY_FILE: &str = "index.js";
pub const START_COMMAND: &str = "node index.js";

/// Tool-serving framework dependency of the generated project
pub const SERVER_DEPENDENCY: (&str, &str) = ("fastmcp", "^3.29.0");
/// Schema-validation dependency of the generated project
pub const VALIDATION_DEPENDENCY: (&str, &str) = ("zod", "^3.23.0");

/// `package.json` contents; fields are declared in sorted key order
#[derive(Debug, Serialize)]
struct PackageManifest<'a> {
    dependencies: BTreeMap<&'a str, &'a str>,
    name: &'a str,
    scripts: BTreeMap<&'a str, &'a str>,
    #[serde(rename = "type")]
    module_type: &'a str,
    version: &'a str,
}

/// Renders the generated project's artifacts
#[derive(Debug, Clone, Default)]
pub struct ProjectEmitter {
    metadata: GenerationMetadata,
}

impl ProjectEmitter {
    pub fn new(metadata: GenerationMetadata) -> Self {
        Self { metadata }
    }

    pub fn metadata(&self) -> &GenerationMetadata {
        &self.metadata
    }

    /// Both artifacts, with paths relative to the output directory
    pub fn emit(&self, tools: &[Tool]) -> Result<Vec<Artifact>, GenerationError> {
        Ok(vec![
            Artifact {
                path: PathBuf::from(MANIFEST_FILE),
                content: self.package_json()?,
                permissions: Some(0o644),
            },
            Artifact {
                path: PathBuf::from(ENTRY_FILE),
                content: self.entry_script(tools),
                permissions: Some(0o755),
            },
        ])
    }

    /// Manifest with two-space indentation and sorted keys
    pub fn package_json(&self) -> Result<String, GenerationError> {
        let manifest = PackageManifest {
            dependencies: BTreeMap::from([SERVER_DEPENDENCY, VALIDATION_DEPENDENCY]),
            name: &self.metadata.project_name,
            scripts: BTreeMap::from([("start", START_COMMAND)]),
            module_type: "module",
            version: &self.metadata.version,
        };
        Ok(serde_json::to_string_pretty(&manifest)?)
    }

    /// Entry script registering one tool per element of `tools`.
    /// The default origin is taken from the first tool.
    pub fn entry_script(&self, tools: &[Tool]) -> String {
        let default_base_url = tools.first().map(|t| t.base_url.as_str()).unwrap_or("");

        let mut out = String::new();
        out.push_str("import { FastMCP } from \"fastmcp\";\n");
        out.push_str("import { z } from \"zod\";\n\n");
        out.push_str(&format!(
            "const {BASE_URL_IDENT} = process.env.{BASE_URL_IDENT} || {};\n",
            js_string(default_base_url)
        ));
        out.push_str(&format!(
            "\nconst server = new FastMCP({{ name: {}, version: {} }});\n",
            js_string(&self.metadata.project_name),
            js_string(&self.metadata.version)
        ));
        for tool in tools {
            out.push_str(&tool_block(tool));
        }
        out.push_str("\nserver.start({ transportType: \"stdio\" });\n");
        out
    }
}

/// One `server.addTool({...})` registration
pub fn tool_block(tool: &Tool) -> String {
    tracing::debug!(tool = %tool.name, method = %tool.method, path = %tool.path, "Rendering tool");
    format!(
        "server.addTool({{\n  name: {},\n  description: {},\n  parameters: {},\n  execute: {},\n}});\n",
        js_string(&tool.name),
        js_string(&tool.description),
        build_validator(tool),
        build_executor(tool)
    )
}
