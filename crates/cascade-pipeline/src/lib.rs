//! # cascade-pipeline
//!
//! Validation-and-compute pipeline for named formula functions.
//!
//! Every invocation runs the same straight-line cascade:
//! - binding: raw host arguments → [`BoundArgument`]s, defaults applied ([`bind`])
//! - validation: one [`ValidationMessage`] per argument, then group checks ([`validate`])
//! - aggregation: non-empty messages → one [`ErrorReport`] ([`ErrorReport::aggregate`])
//! - computation: compute logic run on the bound values, faults intercepted ([`compute`])
//! - selection: the report if it has any errors, else the result ([`select_output`])
//!
//! ## Example
//!
//! ```rust
//! use cascade_pipeline::{call, RawArguments};
//! use cascade_core::{ArgValue, Value};
//!
//! let ok = call("MULTIPLY", vec![Value::from(5), Value::from(10)]).unwrap();
//! assert_eq!(ok.output, Value::from(50));
//!
//! let omitted = RawArguments::Positional(vec![ArgValue::Omitted, ArgValue::from(10)]);
//! let err = call("MULTIPLY", omitted).unwrap();
//! assert_eq!(err.output.to_string(), "ERROR:\n • [number1] argument is omitted");
//! ```

pub mod arguments;
pub mod binder;
pub mod compute;
pub mod error;
pub mod function;
pub mod functions;
pub mod invoke;
pub mod message;
pub mod report;
pub mod rules;
pub mod select;
pub mod spec;
pub mod validator;

pub use arguments::Arguments;
pub use binder::{bind, Binding, BoundArgument, RawArguments, Unexpected, UnexpectedReason};
pub use compute::{compute, Computed};
pub use error::{PipelineError, PipelineResult};
pub use function::{ComputeFn, FunctionBuilder, FunctionDef, GroupCheck, GroupCheckFn};
pub use functions::{builtin_registry, call, FunctionRegistry};
pub use invoke::{invoke, InvocationOptions, InvocationResult};
pub use message::{Severity, ValidationMessage};
pub use report::{ErrorReport, ReportFormat};
pub use rules::{CheckFn, Operator, Rule};
pub use select::select_output;
pub use spec::{ArgKind, ArgumentSpec};
pub use validator::{validate, validate_argument};
