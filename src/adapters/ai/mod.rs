//! AI adapters - generation backends.

mod mock_generator;

pub use mock_generator::MockCallerGenerator;
