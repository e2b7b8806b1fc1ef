pub mod api;
pub mod compile;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod validate;
pub mod wasm;

pub use compile::{CompilationResult, DefinitionService};
pub use validate::{ErrorCode, Severity, ValidationError, ValidationResult};
