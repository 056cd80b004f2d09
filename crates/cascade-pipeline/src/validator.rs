//! Argument validation
//!
//! Produces one [`ValidationMessage`] per declared argument, in declaration
//! order (empty text when the argument is valid), then one per unbound raw
//! slot, then, only if everything so far is valid, one per group check.

use std::panic::{self, AssertUnwindSafe};

use cascade_core::ArgValue;
use tracing::warn;

use crate::arguments::Arguments;
use crate::binder::{Binding, BoundArgument};
use crate::function::{FunctionDef, GroupCheck};
use crate::message::ValidationMessage;
use crate::spec::ArgumentSpec;

/// Validate a binding against its function definition
pub fn validate(def: &FunctionDef, binding: &Binding) -> Vec<ValidationMessage> {
    let mut messages: Vec<ValidationMessage> = def
        .arguments()
        .iter()
        .zip(&binding.arguments)
        .map(|(spec, bound)| validate_argument(spec, bound))
        .collect();

    messages.extend(
        binding
            .unexpected
            .iter()
            .map(|u| ValidationMessage::argument_error(u.label.clone(), u.reason.phrase())),
    );

    // Cross-argument checks are meaningless on individually invalid values
    if messages.iter().all(ValidationMessage::is_valid) {
        let args = Arguments::from_binding(binding);
        messages.extend(def.checks().iter().map(|check| run_group_check(check, &args)));
    }

    messages
}

/// Validate one bound argument
///
/// Rules run in declaration order and stop at the first failure.
pub fn validate_argument(spec: &ArgumentSpec, bound: &BoundArgument) -> ValidationMessage {
    let name = spec.name();

    let value = match &bound.resolved {
        ArgValue::Omitted if spec.is_required() => {
            return ValidationMessage::argument_error(name, "is omitted");
        }
        ArgValue::Omitted => return ValidationMessage::valid(name),
        ArgValue::Present(value) => value,
    };

    if let Some(e) = value.first_error() {
        return ValidationMessage::argument_error(name, format!("is an error value ({})", e));
    }

    for rule in spec.rules() {
        match panic::catch_unwind(AssertUnwindSafe(|| rule.check(value))) {
            Ok(Ok(())) => {}
            Ok(Err(phrase)) if phrase.is_empty() => {
                return ValidationMessage::argument_error(name, "could not be validated");
            }
            Ok(Err(phrase)) => return ValidationMessage::argument_error(name, phrase),
            Err(_) => {
                warn!(argument = name, ?rule, "validator panicked");
                return ValidationMessage::argument_error(name, "could not be validated");
            }
        }
    }

    ValidationMessage::valid(name)
}

fn run_group_check(check: &GroupCheck, args: &Arguments) -> ValidationMessage {
    let label = check
        .arguments()
        .first()
        .cloned()
        .unwrap_or_default();

    match panic::catch_unwind(AssertUnwindSafe(|| check.run(args))) {
        Ok(Ok(())) => ValidationMessage::valid(label),
        // An empty message would read as "valid"
        Ok(Err(text)) if text.is_empty() => {
            ValidationMessage::argument_error(label, "could not be validated")
        }
        Ok(Err(text)) => ValidationMessage::error(label, text),
        Err(_) => {
            warn!(arguments = ?check.arguments(), "group check panicked");
            ValidationMessage::argument_error(label, "could not be validated")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{bind, RawArguments};
    use crate::error::PipelineResult;
    use crate::function::GroupCheckFn;
    use crate::rules::{Operator, Rule};
    use cascade_core::{HostError, Value};
    use pretty_assertions::assert_eq;

    fn zero(_: &Arguments) -> PipelineResult<Value> {
        Ok(Value::from(0))
    }

    fn ordered(args: &Arguments) -> Result<(), String> {
        let low = args.number("low").map_err(|e| e.to_string())?;
        let high = args.number("high").map_err(|e| e.to_string())?;
        if low <= high {
            Ok(())
        } else {
            Err("[low] argument must not be greater than [high]".to_string())
        }
    }

    fn def() -> FunctionDef {
        FunctionDef::builder("RANGE")
            .argument(ArgumentSpec::required("low").number())
            .argument(
                ArgumentSpec::required("high")
                    .number()
                    .rule(Rule::decimal(Operator::LessThan, 100.0)),
            )
            .argument(ArgumentSpec::optional("label").text())
            .check(GroupCheck::new(["low", "high"], ordered))
            .build(zero)
            .unwrap()
    }

    fn texts(messages: &[ValidationMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn test_one_message_per_argument() {
        let def = def();
        let binding = bind(def.arguments(), &RawArguments::positional([1, 2]));
        let messages = validate(&def, &binding);
        assert_eq!(texts(&messages), vec!["", "", "", ""]);
        assert_eq!(messages[2].argument, "label");
    }

    #[test]
    fn test_omitted_required() {
        let def = def();
        let binding = bind(
            def.arguments(),
            &RawArguments::Positional(vec![ArgValue::Omitted, ArgValue::from(5)]),
        );
        let messages = validate(&def, &binding);
        assert_eq!(messages[0].text, "[low] argument is omitted");
        // group check skipped
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn test_first_failing_rule_only() {
        let def = def();
        let raw = RawArguments::positional(vec![Value::from(1), Value::from("big")]);
        let binding = bind(def.arguments(), &raw);
        let messages = validate(&def, &binding);
        assert_eq!(messages[1].text, "[high] argument is not a number");

        let binding = bind(def.arguments(), &RawArguments::positional([1, 500]));
        let messages = validate(&def, &binding);
        assert_eq!(messages[1].text, "[high] argument must be less than 100");
    }

    #[test]
    fn test_host_error_value() {
        let def = def();
        let binding = bind(
            def.arguments(),
            &RawArguments::positional(vec![Value::Error(HostError::Div0), Value::from(1)]),
        );
        let messages = validate(&def, &binding);
        assert_eq!(messages[0].text, "[low] argument is an error value (#DIV/0!)");
    }

    #[test]
    fn test_group_check_runs_when_all_valid() {
        let def = def();
        let binding = bind(def.arguments(), &RawArguments::positional([9, 3]));
        let messages = validate(&def, &binding);
        assert_eq!(
            messages.last().map(|m| m.text.as_str()),
            Some("[low] argument must not be greater than [high]")
        );
        assert_eq!(messages.last().map(|m| m.argument.as_str()), Some("low"));
    }

    #[test]
    fn test_unexpected_reported_after_arguments() {
        let def = def();
        let binding = bind(def.arguments(), &RawArguments::positional([1, 2, 3, 4]));
        let messages = validate(&def, &binding);
        // label = 3 is not text, argument 4 is surplus
        assert_eq!(
            texts(&messages),
            vec![
                "",
                "",
                "[label] argument is not text",
                "[argument 4] argument is not expected"
            ]
        );
    }

    #[test]
    fn test_panicking_rule_is_reported() {
        fn boom(_: &Value) -> Result<(), String> {
            panic!("boom")
        }
        let spec = ArgumentSpec::required("x").rule(Rule::Custom(boom));
        let bound = BoundArgument {
            name: "x".into(),
            raw: ArgValue::from(1),
            resolved: ArgValue::from(1),
        };
        let message = validate_argument(&spec, &bound);
        assert_eq!(message.text, "[x] argument could not be validated");
    }

    fn single(check: GroupCheckFn) -> FunctionDef {
        FunctionDef::builder("SINGLE")
            .argument(ArgumentSpec::required("a").number())
            .check(GroupCheck::new(["a"], check))
            .build(zero)
            .unwrap()
    }

    #[test]
    fn test_group_check_with_empty_error_text_still_fails() {
        fn silent(_: &Arguments) -> Result<(), String> {
            Err(String::new())
        }
        let def = single(silent);
        let binding = bind(def.arguments(), &RawArguments::positional([1]));
        let messages = validate(&def, &binding);
        assert_eq!(texts(&messages), vec!["", "[a] argument could not be validated"]);

        let result = def.invoke(vec![Value::from(1)]);
        assert!(result.is_error());
        assert_eq!(
            result.output,
            Value::text("ERROR:\n • [a] argument could not be validated")
        );
    }

    #[test]
    fn test_panicking_group_check_is_reported() {
        fn boom(_: &Arguments) -> Result<(), String> {
            panic!("boom")
        }
        let def = single(boom);
        let binding = bind(def.arguments(), &RawArguments::positional([1]));
        let messages = validate(&def, &binding);
        assert_eq!(messages[1].argument, "a");
        assert_eq!(messages[1].text, "[a] argument could not be validated");
    }

    #[test]
    fn test_rule_with_empty_error_text_still_fails() {
        fn silent(_: &Value) -> Result<(), String> {
            Err(String::new())
        }
        let spec = ArgumentSpec::required("x").rule(Rule::Custom(silent));
        let bound = BoundArgument {
            name: "x".into(),
            raw: ArgValue::from(1),
            resolved: ArgValue::from(1),
        };
        let message = validate_argument(&spec, &bound);
        assert_eq!(message.text, "[x] argument could not be validated");
    }

    #[test]
    fn test_optional_never_reports_omission() {
        let spec = ArgumentSpec::optional("prefix").text();
        let bound = BoundArgument {
            name: "prefix".into(),
            raw: ArgValue::Omitted,
            resolved: ArgValue::Omitted,
        };
        assert!(validate_argument(&spec, &bound).is_valid());
    }
}
