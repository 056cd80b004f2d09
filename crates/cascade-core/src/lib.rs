//! # cascade-core
//!
//! Core value types for cascade formula functions.
//!
//! This crate provides the host-facing data model shared by the pipeline:
//! - [`Value`] - Values a host evaluator passes in and displays (numbers, text, booleans, errors, lists)
//! - [`HostError`] - The host's native error values (`#VALUE!`, `#N/A`, ...)
//! - [`ArgValue`] - An argument slot, distinguishing "omitted" from every value
//!
//! ## Example
//!
//! ```rust
//! use cascade_core::{ArgValue, Value};
//!
//! assert_eq!(ArgValue::parse(""), ArgValue::Omitted);
//! assert_eq!(ArgValue::parse("10"), ArgValue::Present(Value::Number(10.0)));
//! assert_eq!(Value::Number(50.0).to_string(), "50");
//! ```

pub mod arg;
pub mod error;
pub mod value;

// Re-exports for convenience
pub use arg::ArgValue;
pub use error::{Error, Result};
pub use value::{HostError, SharedString, Value};
