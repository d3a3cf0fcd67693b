//! Foundation layer - shared value objects and error types.

mod errors;
mod ids;
mod intensity;
mod progress;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{SessionId, TraineeId};
pub use intensity::Intensity;
pub use progress::{Progress, STEP_PER_CATEGORY};
pub use timestamp::Timestamp;
