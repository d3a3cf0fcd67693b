//! Ports - interfaces the application layer depends on.

mod caller_generator;

pub use caller_generator::{BackendInfo, CallerGenerator, GenerationError};
