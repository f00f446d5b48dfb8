//! fls-core: shared foundation for the FLS simulation front end.
//!
//! Contains:
//! - numeric (Real + tolerances + grid snapping)
//! - ids (run tickets used to match completions to in-flight runs)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

pub use error::{CoreError, CoreResult};
pub use ids::RunTicket;
pub use numeric::*;
