//! Counting arrangements of damaged springs in condition records.
//!
//! A condition record is a row of `.` (functional), `#` (damaged) and `?`
//! (unknown) symbols plus the lengths of its damaged runs. The crate counts
//! every resolution of the unknowns that matches those runs, for the record
//! as written and for its fivefold unfolding. The architecture enforces a
//! strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (parsing, unfolding, memoized
//!   counting, exhaustive enumeration). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config file, input lines).
//!
//! Orchestration modules ([`tally`], [`verify`]) coordinate core logic with
//! I/O to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod tally;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod verify;

pub use crate::core::counter::count;
pub use crate::core::error::RecordError;
pub use crate::core::parse::parse_record;
pub use crate::core::types::{ConditionRecord, Symbol};
pub use crate::core::unfold::unfold;
