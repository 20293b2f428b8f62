//! bakery turns an OpenAPI 3.x description into a runnable Node.js tool
//! server: one registered tool per API operation, each with a zod argument
//! validator and a `fetch`-based executor.
#![deny(unsafe_code)]

pub mod application;
pub mod generation;
pub mod infrastructure;
