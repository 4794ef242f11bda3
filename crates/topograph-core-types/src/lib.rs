//! Core types shared across Topograph facilities
//!
//! - **Schema constants**: canonical field keys and event names used by the
//!   structured logging macros and the test capture layer

pub mod schema;
