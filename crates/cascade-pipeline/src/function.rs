//! Function definitions
//!
//! A [`FunctionDef`] is the immutable declaration of one named function:
//! its arguments, cross-argument checks and compute logic. Definitions are
//! built once and shared by every invocation.

use std::fmt;

use cascade_core::Value;
use lazy_regex::regex_is_match;

use crate::arguments::Arguments;
use crate::error::{PipelineError, PipelineResult};
use crate::spec::ArgumentSpec;

/// Compute logic signature
///
/// Runs on every invocation, valid or not. It must not assume validation
/// passed: the typed accessors on [`Arguments`] return `Err` for omitted or
/// mistyped values, which the pipeline masks.
///
/// Panics are caught and reported as a fault, but the process panic hook
/// runs before the pipeline sees them. The default hook prints to stderr;
/// embedders that want silent faults install their own hook.
pub type ComputeFn = fn(&Arguments) -> PipelineResult<Value>;

/// Cross-argument check signature; `Err` carries the full message text
///
/// Empty `Err` text and panics are reported as "could not be validated".
pub type GroupCheckFn = fn(&Arguments) -> Result<(), String>;

/// A check over several arguments (e.g. "start must not be after end")
///
/// Runs only when every argument passed its own checks.
#[derive(Debug, Clone)]
pub struct GroupCheck {
    arguments: Vec<String>,
    check: GroupCheckFn,
}

impl GroupCheck {
    pub fn new<I, S>(arguments: I, check: GroupCheckFn) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            arguments: arguments.into_iter().map(Into::into).collect(),
            check,
        }
    }

    /// Names of the arguments involved; the first one labels the message
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn run(&self, args: &Arguments) -> Result<(), String> {
        (self.check)(args)
    }
}

/// Function definition
#[derive(Debug, Clone)]
pub struct FunctionDef {
    name: String,
    description: Option<String>,
    arguments: Vec<ArgumentSpec>,
    checks: Vec<GroupCheck>,
    compute: ComputeFn,
}

impl FunctionDef {
    /// Start declaring a function
    pub fn builder(name: impl Into<String>) -> FunctionBuilder {
        FunctionBuilder {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Function name (uppercase)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared arguments, in order
    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    pub fn checks(&self) -> &[GroupCheck] {
        &self.checks
    }

    /// Minimum arguments
    pub fn min_args(&self) -> usize {
        self.arguments.iter().filter(|a| a.is_required()).count()
    }

    /// Maximum arguments
    pub fn max_args(&self) -> usize {
        self.arguments.len()
    }

    /// `NAME(required, [optional])`
    pub fn signature(&self) -> String {
        self.to_string()
    }

    pub(crate) fn compute_fn(&self) -> ComputeFn {
        self.compute
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if arg.is_required() {
                write!(f, "{}", arg.name())?;
            } else {
                write!(f, "[{}]", arg.name())?;
            }
        }
        write!(f, ")")
    }
}

/// Builder for [`FunctionDef`]
#[derive(Debug, Clone)]
pub struct FunctionBuilder {
    name: String,
    description: Option<String>,
    arguments: Vec<ArgumentSpec>,
    checks: Vec<GroupCheck>,
}

impl FunctionBuilder {
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare the next argument
    pub fn argument(mut self, spec: ArgumentSpec) -> Self {
        self.arguments.push(spec);
        self
    }

    /// Add a cross-argument check
    pub fn check(mut self, check: GroupCheck) -> Self {
        self.checks.push(check);
        self
    }

    /// Finish the declaration
    ///
    /// Fails if the name or an argument name breaks the naming convention,
    /// names repeat, a required argument follows an optional one or has a
    /// default, a rule is malformed, or a group check names an unknown
    /// argument.
    pub fn build(self, compute: ComputeFn) -> PipelineResult<FunctionDef> {
        let function = self.name;

        if !regex_is_match!(r"^[A-Z][A-Z0-9]*(\.[A-Z][A-Z0-9]*)*$", &function) {
            return Err(PipelineError::InvalidFunctionName(function));
        }

        let mut seen_optional = false;
        for (i, arg) in self.arguments.iter().enumerate() {
            let argument = arg.name().to_string();

            if !regex_is_match!(r"^[a-z][a-z0-9_]*$", &argument) {
                return Err(PipelineError::InvalidArgumentName { function, argument });
            }
            if self.arguments[..i].iter().any(|a| a.name() == argument) {
                return Err(PipelineError::DuplicateArgument { function, argument });
            }
            if arg.is_required() {
                if seen_optional {
                    return Err(PipelineError::RequiredAfterOptional { function, argument });
                }
                if arg.default_value().is_some() {
                    return Err(PipelineError::DefaultOnRequired { function, argument });
                }
            } else {
                seen_optional = true;
            }
            for rule in arg.rules() {
                rule.verify()
                    .map_err(|reason| PipelineError::InvalidRule {
                        argument: argument.clone(),
                        reason,
                    })?;
            }
        }

        for check in &self.checks {
            for argument in check.arguments() {
                if !self.arguments.iter().any(|a| a.name() == argument.as_str()) {
                    return Err(PipelineError::UnknownArgument {
                        function,
                        argument: argument.clone(),
                    });
                }
            }
        }

        Ok(FunctionDef {
            name: function,
            description: self.description,
            arguments: self.arguments,
            checks: self.checks,
            compute,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Operator, Rule};

    fn noop(_args: &Arguments) -> PipelineResult<Value> {
        Ok(Value::Empty)
    }

    #[test]
    fn test_signature_and_arity() {
        let def = FunctionDef::builder("FORMAT.LABEL")
            .argument(ArgumentSpec::required("text").text())
            .argument(ArgumentSpec::optional("prefix").text())
            .build(noop)
            .unwrap();
        assert_eq!(def.signature(), "FORMAT.LABEL(text, [prefix])");
        assert_eq!(def.min_args(), 1);
        assert_eq!(def.max_args(), 2);
    }

    #[test]
    fn test_rejects_bad_function_name() {
        for name in ["multiply", "1X", "A..B", "SUM-2", ""] {
            let err = FunctionDef::builder(name).build(noop).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidFunctionName(_)), "{name}");
        }
    }

    #[test]
    fn test_rejects_bad_argument_name() {
        let err = FunctionDef::builder("F")
            .argument(ArgumentSpec::required("Number1"))
            .build(noop)
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidArgumentName { .. }));
    }

    #[test]
    fn test_rejects_duplicate_argument() {
        let err = FunctionDef::builder("F")
            .argument(ArgumentSpec::required("a"))
            .argument(ArgumentSpec::required("a"))
            .build(noop)
            .unwrap_err();
        assert_eq!(
            err,
            PipelineError::DuplicateArgument {
                function: "F".into(),
                argument: "a".into()
            }
        );
    }

    #[test]
    fn test_rejects_required_after_optional() {
        let err = FunctionDef::builder("F")
            .argument(ArgumentSpec::optional("a"))
            .argument(ArgumentSpec::required("b"))
            .build(noop)
            .unwrap_err();
        assert!(matches!(err, PipelineError::RequiredAfterOptional { .. }));
    }

    #[test]
    fn test_rejects_default_on_required() {
        let err = FunctionDef::builder("F")
            .argument(ArgumentSpec::required("a").with_default(1))
            .build(noop)
            .unwrap_err();
        assert!(matches!(err, PipelineError::DefaultOnRequired { .. }));
    }

    #[test]
    fn test_rejects_malformed_rule() {
        let err = FunctionDef::builder("F")
            .argument(ArgumentSpec::required("a").rule(Rule::decimal(Operator::Between, 1.0)))
            .build(noop)
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidRule { .. }));
    }

    #[test]
    fn test_rejects_group_check_on_unknown_argument() {
        fn check(_: &Arguments) -> Result<(), String> {
            Ok(())
        }
        let err = FunctionDef::builder("F")
            .argument(ArgumentSpec::required("a"))
            .check(GroupCheck::new(["a", "b"], check))
            .build(noop)
            .unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnknownArgument {
                function: "F".into(),
                argument: "b".into()
            }
        );
    }
}
