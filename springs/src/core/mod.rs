//! Deterministic, pure logic shared by the arrangement counter.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! records and return deterministic outputs suitable for tests.

pub mod brute_force;
pub mod counter;
pub mod error;
pub mod parse;
pub mod types;
pub mod unfold;
