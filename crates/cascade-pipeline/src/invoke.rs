//! Invocation
//!
//! Wires the pipeline together: bind → validate → aggregate, compute
//! (independently), then select the output. Every invocation builds and
//! drops its own state; a [`FunctionDef`] is only ever read.

use cascade_core::Value;
use tracing::debug;

use crate::binder::{bind, Binding, RawArguments};
use crate::compute::compute;
use crate::function::FunctionDef;
use crate::message::ValidationMessage;
use crate::report::{ErrorReport, ReportFormat};
use crate::select::select_output;
use crate::validator::validate;

/// Options for invoking a function
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InvocationOptions {
    /// Error report layout
    pub format: ReportFormat,
}

/// Everything one invocation produced
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InvocationResult {
    /// Name of the invoked function
    pub function: String,
    /// Bound arguments
    pub binding: Binding,
    /// All validation messages, including empty ("valid") ones
    pub messages: Vec<ValidationMessage>,
    /// Computed result (the placeholder if compute logic faulted)
    pub result: Value,
    /// Compute fault, if any
    pub fault: Option<String>,
    /// Aggregated errors
    pub report: ErrorReport,
    /// The selected output: the combined report text if any errors, else `result`
    pub output: Value,
}

impl InvocationResult {
    /// Check if the output is an error report
    pub fn is_error(&self) -> bool {
        !self.report.is_empty()
    }
}

impl FunctionDef {
    /// Invoke with default options
    pub fn invoke(&self, raw: impl Into<RawArguments>) -> InvocationResult {
        self.invoke_with(raw, &InvocationOptions::default())
    }

    /// Invoke with explicit options
    pub fn invoke_with(
        &self,
        raw: impl Into<RawArguments>,
        options: &InvocationOptions,
    ) -> InvocationResult {
        invoke(self, &raw.into(), options)
    }
}

/// Run the full pipeline for one call
pub fn invoke(
    def: &FunctionDef,
    raw: &RawArguments,
    options: &InvocationOptions,
) -> InvocationResult {
    let binding = bind(def.arguments(), raw);
    let mut messages = validate(def, &binding);
    let computed = compute(def, &binding);

    // A fault on valid input would otherwise surface as a silent blank
    if let Some(fault) = &computed.fault {
        if messages.iter().all(ValidationMessage::is_valid) {
            messages.push(ValidationMessage::error(
                def.name(),
                format!("[{}] result could not be computed: {}", def.name(), fault),
            ));
        }
    }

    let report = ErrorReport::aggregate(&messages, &options.format);
    let output = select_output(&computed.value, &report);

    debug!(
        function = def.name(),
        arguments = raw.len(),
        errors = report.len(),
        fault = computed.fault.as_deref(),
        "invoked"
    );

    InvocationResult {
        function: def.name().to_string(),
        binding,
        messages,
        result: computed.value,
        fault: computed.fault,
        report,
        output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::Arguments;
    use crate::error::PipelineResult;
    use crate::spec::ArgumentSpec;
    use cascade_core::ArgValue;
    use pretty_assertions::assert_eq;

    fn ratio(args: &Arguments) -> PipelineResult<Value> {
        let a = args.number("a")?;
        let b = args.number("b")?;
        if b == 0.0 {
            return Ok(Value::Error(cascade_core::HostError::Div0));
        }
        Ok(Value::Number(a / b))
    }

    fn def() -> FunctionDef {
        FunctionDef::builder("RATIO")
            .argument(ArgumentSpec::required("a").number())
            .argument(ArgumentSpec::required("b").number())
            .build(ratio)
            .unwrap()
    }

    #[test]
    fn test_valid_invocation_returns_result() {
        let result = def().invoke(vec![Value::from(6), Value::from(3)]);
        assert!(!result.is_error());
        assert_eq!(result.output, Value::Number(2.0));
        assert_eq!(result.result, Value::Number(2.0));
        assert_eq!(result.messages.len(), 2);
    }

    #[test]
    fn test_invalid_invocation_masks_result() {
        let result = def().invoke(RawArguments::Positional(vec![
            ArgValue::Omitted,
            ArgValue::from(3),
        ]));
        assert!(result.is_error());
        assert_eq!(result.fault.as_deref(), Some("Argument a has no value"));
        assert_eq!(
            result.output,
            Value::text("ERROR:\n • [a] argument is omitted")
        );
    }

    #[test]
    fn test_fault_on_valid_input_is_reported() {
        let result = def().invoke(vec![Value::from(1), Value::from(0)]);
        assert!(result.is_error());
        assert_eq!(
            result.output,
            Value::text(
                "ERROR:\n • [RATIO] result could not be computed: result is an error value (#DIV/0!)"
            )
        );
        assert!(!result.output.contains_error());
    }

    #[test]
    fn test_custom_format() {
        let options = InvocationOptions {
            format: ReportFormat {
                header: "Problems:".into(),
                bullet: "* ".into(),
                separator: "\n".into(),
            },
        };
        let result = def().invoke_with(RawArguments::positional(["x", "y"]), &options);
        assert_eq!(
            result.output,
            Value::text("Problems:\n* [a] argument is not a number\n* [b] argument is not a number")
        );
    }
}
