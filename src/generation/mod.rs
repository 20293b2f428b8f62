//! Generation domain module - turns normalized operations into a tool server
//!
//! Operations flow through name resolution, input schema assembly, validator
//! and executor synthesis, and finally project emission.

pub mod context;
pub mod emitter;
pub mod errors;
pub mod input_schema;
pub mod invocation;
pub mod naming;
pub mod orchestrator;
pub mod sanitizers;
pub mod schema;
pub mod traits;
pub mod types;
pub mod validator;

pub use context::*;
pub use emitter::ProjectEmitter;
pub use errors::*;
pub use orchestrator::*;
pub use schema::{Primitive, Schema, SchemaShape};
pub use traits::*;
pub use types::*;

// Re-export the normalized description from infrastructure
pub use crate::infrastructure::openapi::ApiDescription;
