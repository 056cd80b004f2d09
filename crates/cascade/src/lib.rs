//! # cascade
//!
//! Named formula functions built on a validation-and-compute pipeline.
//!
//! A function is declared once as a [`FunctionDef`]: typed, required or
//! optional arguments with validation rules, optional cross-argument checks,
//! and compute logic. Each call then binds the host's raw arguments, validates
//! them, computes a result, and returns either the result or a single
//! `ERROR:` report listing every problem in argument order.
//!
//! ## Example
//!
//! ```rust
//! use cascade::prelude::*;
//!
//! fn area(args: &Arguments) -> PipelineResult<Value> {
//!     Ok(Value::Number(args.number("width")? * args.number("height")?))
//! }
//!
//! let def = FunctionDef::builder("AREA")
//!     .argument(ArgumentSpec::required("width").number())
//!     .argument(
//!         ArgumentSpec::required("height")
//!             .number()
//!             .rule(Rule::decimal(Operator::GreaterThan, 0.0)),
//!     )
//!     .build(area)
//!     .unwrap();
//!
//! assert_eq!(def.invoke(vec![Value::from(3), Value::from(4)]).output, Value::from(12));
//!
//! let result = def.invoke(vec![Value::from("wide"), Value::from(-1)]);
//! assert_eq!(
//!     result.output.to_string(),
//!     "ERROR:\n • [width] argument is not a number\n • [height] argument must be greater than 0"
//! );
//! ```

pub mod prelude;

// Re-export core types
pub use cascade_core::{ArgValue, Error, HostError, Result, SharedString, Value};

// Re-export pipeline types
pub use cascade_pipeline::{
    bind, builtin_registry, call, compute, invoke, select_output, validate, validate_argument,
    ArgKind, Arguments, ArgumentSpec, Binding, BoundArgument, CheckFn, ComputeFn, Computed,
    ErrorReport, FunctionBuilder, FunctionDef, FunctionRegistry, GroupCheck, GroupCheckFn,
    InvocationOptions, InvocationResult, Operator, PipelineError, PipelineResult, RawArguments,
    ReportFormat, Rule, Severity, Unexpected, UnexpectedReason, ValidationMessage,
};

/// Built-in function declarations
pub use cascade_pipeline::functions;

/// Serial date conversion
pub use cascade_pipeline::rules::date_from_serial;
