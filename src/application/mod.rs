//! Application layer - orchestrates use cases and coordinates between domains

pub mod dto;
pub mod errors;
pub mod generate_server;
pub mod traits;

pub use dto::*;
pub use errors::*;
pub use generate_server::GenerateServerUseCase;
pub use traits::*;
