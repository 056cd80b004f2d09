//! Argument binding
//!
//! Binding resolves the host's raw argument slots against the declared
//! [`ArgumentSpec`]s. It never fails: anything odd about the call
//! (surplus values, unknown or repeated names) is recorded on the
//! [`Binding`] and reported later by the validator.

use std::fmt;

use cascade_core::{ArgValue, Value};

use crate::spec::ArgumentSpec;

/// Raw arguments as supplied by the host
#[derive(Debug, Clone, PartialEq)]
pub enum RawArguments {
    /// Values aligned with declaration order
    Positional(Vec<ArgValue>),
    /// Values matched by argument name (ASCII case-insensitive)
    Named(Vec<(String, ArgValue)>),
}

impl RawArguments {
    /// Build positional arguments
    pub fn positional<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ArgValue>,
    {
        RawArguments::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Build named arguments
    pub fn named<I, K, T>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<ArgValue>,
    {
        RawArguments::Named(
            values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Number of slots supplied
    pub fn len(&self) -> usize {
        match self {
            RawArguments::Positional(v) => v.len(),
            RawArguments::Named(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RawArguments {
    fn default() -> Self {
        RawArguments::Positional(Vec::new())
    }
}

impl From<Vec<ArgValue>> for RawArguments {
    fn from(values: Vec<ArgValue>) -> Self {
        RawArguments::Positional(values)
    }
}

impl From<Vec<Value>> for RawArguments {
    fn from(values: Vec<Value>) -> Self {
        RawArguments::positional(values)
    }
}

impl From<Vec<(String, ArgValue)>> for RawArguments {
    fn from(values: Vec<(String, ArgValue)>) -> Self {
        RawArguments::Named(values)
    }
}

/// One declared argument after binding
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoundArgument {
    /// Declared name
    pub name: String,
    /// What the host supplied
    pub raw: ArgValue,
    /// After default substitution; `Omitted` only for a missing required argument
    pub resolved: ArgValue,
}

impl BoundArgument {
    /// The resolved value, if any
    pub fn value(&self) -> Option<&Value> {
        self.resolved.value()
    }
}

/// Why a raw slot could not be bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnexpectedReason {
    /// Positional value beyond the declared arguments
    Surplus,
    /// Name that matches no declared argument
    Unrecognized,
    /// Name supplied more than once
    Duplicate,
}

impl UnexpectedReason {
    /// Message phrase for this reason
    pub fn phrase(&self) -> &'static str {
        match self {
            UnexpectedReason::Surplus => "is not expected",
            UnexpectedReason::Unrecognized => "is not recognized",
            UnexpectedReason::Duplicate => "is supplied more than once",
        }
    }
}

/// A raw slot that did not bind to a declared argument
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Unexpected {
    /// `argument N` for surplus positional values, the name otherwise
    pub label: String,
    pub reason: UnexpectedReason,
}

impl fmt::Display for Unexpected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] argument {}", self.label, self.reason.phrase())
    }
}

/// Result of binding one invocation
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Binding {
    /// One entry per declared argument, in declaration order
    pub arguments: Vec<BoundArgument>,
    /// Slots that did not bind, in the order they were supplied
    pub unexpected: Vec<Unexpected>,
}

impl Binding {
    /// Look up a bound argument by name
    pub fn get(&self, name: &str) -> Option<&BoundArgument> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

/// Bind raw arguments to the declared specs
pub fn bind(specs: &[ArgumentSpec], raw: &RawArguments) -> Binding {
    let mut slots: Vec<ArgValue> = vec![ArgValue::Omitted; specs.len()];
    let mut unexpected = Vec::new();

    match raw {
        RawArguments::Positional(values) => {
            for (i, value) in values.iter().enumerate() {
                match slots.get_mut(i) {
                    Some(slot) => *slot = value.clone(),
                    None => unexpected.push(Unexpected {
                        label: format!("argument {}", i + 1),
                        reason: UnexpectedReason::Surplus,
                    }),
                }
            }
        }
        RawArguments::Named(values) => {
            let mut seen = vec![false; specs.len()];
            for (name, value) in values {
                let idx = specs
                    .iter()
                    .position(|s| s.name().eq_ignore_ascii_case(name));
                match idx {
                    None => unexpected.push(Unexpected {
                        label: name.clone(),
                        reason: UnexpectedReason::Unrecognized,
                    }),
                    Some(i) if seen[i] => unexpected.push(Unexpected {
                        label: specs[i].name().to_string(),
                        reason: UnexpectedReason::Duplicate,
                    }),
                    Some(i) => {
                        seen[i] = true;
                        slots[i] = value.clone();
                    }
                }
            }
        }
    }

    let arguments = specs
        .iter()
        .zip(slots)
        .map(|(spec, raw)| {
            let resolved = resolve(spec, &raw);
            BoundArgument {
                name: spec.name().to_string(),
                raw,
                resolved,
            }
        })
        .collect();

    Binding {
        arguments,
        unexpected,
    }
}

fn resolve(spec: &ArgumentSpec, raw: &ArgValue) -> ArgValue {
    match raw {
        ArgValue::Omitted if spec.is_required() => ArgValue::Omitted,
        ArgValue::Omitted => ArgValue::Present(spec.resolved_default()),
        ArgValue::Present(v) => ArgValue::Present(v.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn specs() -> Vec<ArgumentSpec> {
        vec![
            ArgumentSpec::required("text").text(),
            ArgumentSpec::optional("prefix").text(),
            ArgumentSpec::optional("uppercase").boolean(),
        ]
    }

    #[test]
    fn test_required_omitted_stays_omitted() {
        let b = bind(&specs(), &RawArguments::positional(Vec::<ArgValue>::new()));
        assert_eq!(b.arguments[0].resolved, ArgValue::Omitted);
        assert!(b.unexpected.is_empty());
    }

    #[test]
    fn test_optional_gets_default() {
        let b = bind(&specs(), &RawArguments::positional(["hello"]));
        assert_eq!(b.arguments[1].raw, ArgValue::Omitted);
        assert_eq!(b.arguments[1].resolved, ArgValue::Present(Value::text("")));
        assert_eq!(
            b.arguments[2].resolved,
            ArgValue::Present(Value::Boolean(false))
        );
    }

    #[test]
    fn test_explicit_omission_is_defaulted() {
        let raw = RawArguments::Positional(vec![
            ArgValue::from("a"),
            ArgValue::Omitted,
            ArgValue::from(true),
        ]);
        let b = bind(&specs(), &raw);
        assert_eq!(b.arguments[1].value(), Some(&Value::text("")));
        assert_eq!(b.arguments[2].value(), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_present_value_is_not_coerced() {
        let b = bind(&specs(), &RawArguments::positional([5]));
        assert_eq!(b.arguments[0].value(), Some(&Value::Number(5.0)));
    }

    #[test]
    fn test_surplus_positional() {
        let b = bind(&specs(), &RawArguments::positional(["a", "b", "c", "d"]));
        assert_eq!(
            b.unexpected,
            vec![Unexpected {
                label: "argument 4".into(),
                reason: UnexpectedReason::Surplus
            }]
        );
        assert_eq!(b.unexpected[0].to_string(), "[argument 4] argument is not expected");
    }

    #[test]
    fn test_named_binding() {
        let raw = RawArguments::named([
            ("PREFIX", ArgValue::from("> ")),
            ("text", ArgValue::from("x")),
            ("color", ArgValue::from("red")),
            ("prefix", ArgValue::from("again")),
        ]);
        let b = bind(&specs(), &raw);
        assert_eq!(b.arguments[0].value(), Some(&Value::text("x")));
        assert_eq!(b.get("prefix").and_then(|a| a.value()), Some(&Value::text("> ")));
        assert_eq!(
            b.unexpected,
            vec![
                Unexpected {
                    label: "color".into(),
                    reason: UnexpectedReason::Unrecognized
                },
                Unexpected {
                    label: "prefix".into(),
                    reason: UnexpectedReason::Duplicate
                },
            ]
        );
    }
}
