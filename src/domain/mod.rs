//! Domain layer - pure simulation logic with no I/O.

pub mod caller;
pub mod compliance;
pub mod foundation;
pub mod prompt;
pub mod scenario;
