//! Core types for the generation domain

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::generation::Schema;

/// Where an operation parameter is carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterLocation {
    type Err = crate::generation::GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "path" => Ok(ParameterLocation::Path),
            "query" => Ok(ParameterLocation::Query),
            "header" => Ok(ParameterLocation::Header),
            other => Err(crate::generation::GenerationError::ValidationError(format!(
                "Unsupported parameter location: {other}"
            ))),
        }
    }
}

/// Operation parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    /// Absent schemas accept anything
    pub schema: Option<Schema>,
}

/// JSON request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    pub required: bool,
    pub schema: Schema,
}

/// One (path, method) endpoint handed over by the description parser
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// The path where this operation is defined (e.g., "/pet/{petId}")
    pub path: String,
    /// The HTTP method, as written in the description
    pub method: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
}

impl Operation {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_request_body(mut self, body: RequestBody) -> Self {
        self.request_body = Some(body);
        self
    }
}

/// A callable tool derived from one operation
///
/// Tools are immutable once the name resolver has produced the full set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tool {
    /// Unique, matches `^[a-z0-9_]+$`
    pub name: String,
    pub description: String,
    /// Aggregate input schema (parameters plus a `body` entry)
    pub input_schema: Schema,
    pub params: Vec<Parameter>,
    pub body: Option<RequestBody>,
    /// Uppercased HTTP method
    pub method: String,
    pub path: String,
    pub base_url: String,
}

impl Tool {
    /// Parameters carried at the given location, in declaration order
    pub fn params_in(&self, location: ParameterLocation) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(move |p| p.location == location)
    }
}

/// Generated artifact
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
    pub permissions: Option<u32>,
}

/// Result of generation
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub artifacts: Vec<Artifact>,
    pub tools: Vec<Tool>,
    pub metadata: crate::generation::GenerationMetadata,
}
