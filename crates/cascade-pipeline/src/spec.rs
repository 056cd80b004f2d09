//! Argument declarations

use cascade_core::Value;

use crate::rules::Rule;

/// Declared type of an argument
///
/// The kind selects the type-appropriate default for optional arguments
/// and, when set through the [`ArgumentSpec`] builder, adds the matching
/// type rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ArgKind {
    /// Any value
    #[default]
    Any,
    Number,
    Text,
    Boolean,
    List,
}

impl ArgKind {
    /// Default for an omitted optional argument of this kind
    pub fn default_value(&self) -> Value {
        match self {
            ArgKind::Any => Value::Empty,
            ArgKind::Number => Value::Number(0.0),
            ArgKind::Text => Value::text(""),
            ArgKind::Boolean => Value::Boolean(false),
            ArgKind::List => Value::List(Vec::new()),
        }
    }

    fn type_rule(&self) -> Option<Rule> {
        match self {
            ArgKind::Any => None,
            ArgKind::Number => Some(Rule::IsNumber),
            ArgKind::Text => Some(Rule::IsText),
            ArgKind::Boolean => Some(Rule::IsBoolean),
            ArgKind::List => Some(Rule::IsList),
        }
    }
}

/// Declaration of one function argument
///
/// Immutable once the owning [`FunctionDef`](crate::FunctionDef) is built.
///
/// ## Example
///
/// ```rust
/// use cascade_pipeline::{ArgumentSpec, Operator, Rule};
///
/// let width = ArgumentSpec::required("width")
///     .number()
///     .rule(Rule::whole_between(Operator::Between, 0.0, 255.0));
/// let fill = ArgumentSpec::optional("fill").text().with_default(" ");
///
/// assert!(width.is_required());
/// assert_eq!(fill.resolved_default().as_text(), Some(" "));
/// ```
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    name: String,
    required: bool,
    kind: ArgKind,
    default: Option<Value>,
    rules: Vec<Rule>,
    description: Option<String>,
}

impl ArgumentSpec {
    /// Declare a required argument
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// Declare an optional argument
    pub fn optional(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            kind: ArgKind::Any,
            default: None,
            rules: Vec::new(),
            description: None,
        }
    }

    /// Set the kind, adding its type rule
    pub fn kind(mut self, kind: ArgKind) -> Self {
        self.kind = kind;
        if let Some(rule) = kind.type_rule() {
            self.rules.push(rule);
        }
        self
    }

    pub fn number(self) -> Self {
        self.kind(ArgKind::Number)
    }

    pub fn text(self) -> Self {
        self.kind(ArgKind::Text)
    }

    pub fn boolean(self) -> Self {
        self.kind(ArgKind::Boolean)
    }

    pub fn list(self) -> Self {
        self.kind(ArgKind::List)
    }

    /// Set an explicit default (optional arguments only)
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Append a rule; rules run in the order they are added
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set a human-readable description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn arg_kind(&self) -> ArgKind {
        self.kind
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The value an omitted optional argument resolves to
    pub fn resolved_default(&self) -> Value {
        self.default
            .clone()
            .unwrap_or_else(|| self.kind.default_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Operator;

    #[test]
    fn test_kind_defaults() {
        assert_eq!(ArgKind::Number.default_value(), Value::Number(0.0));
        assert_eq!(ArgKind::Text.default_value(), Value::text(""));
        assert_eq!(ArgKind::Boolean.default_value(), Value::Boolean(false));
        assert_eq!(ArgKind::List.default_value(), Value::List(vec![]));
        assert_eq!(ArgKind::Any.default_value(), Value::Empty);
    }

    #[test]
    fn test_kind_adds_type_rule_first() {
        let spec = ArgumentSpec::required("divisor")
            .number()
            .rule(Rule::decimal(Operator::NotEqual, 0.0));
        assert!(matches!(spec.rules()[0], Rule::IsNumber));
        assert!(matches!(spec.rules()[1], Rule::Decimal { .. }));
        assert_eq!(spec.arg_kind(), ArgKind::Number);
    }

    #[test]
    fn test_explicit_default_wins() {
        let spec = ArgumentSpec::optional("delimiter").text().with_default(", ");
        assert_eq!(spec.resolved_default(), Value::text(", "));

        let spec = ArgumentSpec::optional("prefix").text();
        assert_eq!(spec.resolved_default(), Value::text(""));
        assert!(!spec.is_required());
    }
}
