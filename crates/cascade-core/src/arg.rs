//! Argument slots and the omission sentinel

use crate::value::Value;

/// A raw argument slot as supplied by the host
///
/// `Omitted` is distinct from every [`Value`], including `Empty`, `0`,
/// `""` and `FALSE`: a function called as `=F(,10)` sees its first
/// argument as `Omitted`, while `=F(A1,10)` with a blank `A1` sees
/// `Present(Value::Empty)`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ArgValue {
    /// No value was supplied
    #[default]
    Omitted,
    /// A value was supplied
    Present(Value),
}

impl ArgValue {
    /// Check if this slot is the omission sentinel
    pub fn is_omitted(&self) -> bool {
        matches!(self, ArgValue::Omitted)
    }

    /// Get the supplied value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            ArgValue::Omitted => None,
            ArgValue::Present(v) => Some(v),
        }
    }

    /// Parse a host token: an empty token is omitted, anything else is a
    /// literal (see [`Value::parse_literal`])
    pub fn parse(token: &str) -> Self {
        if token.is_empty() {
            ArgValue::Omitted
        } else {
            ArgValue::Present(Value::parse_literal(token))
        }
    }
}

impl<T: Into<Value>> From<T> for ArgValue {
    fn from(v: T) -> Self {
        ArgValue::Present(v.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omitted_is_not_a_value() {
        assert!(ArgValue::Omitted.is_omitted());
        assert!(!ArgValue::Present(Value::Empty).is_omitted());
        assert!(!ArgValue::from(0).is_omitted());
        assert!(!ArgValue::from("").is_omitted());
        assert!(!ArgValue::from(false).is_omitted());
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(ArgValue::parse(""), ArgValue::Omitted);
        assert_eq!(ArgValue::parse("\"\""), ArgValue::Present(Value::text("")));
        assert_eq!(ArgValue::parse("10"), ArgValue::Present(Value::Number(10.0)));
    }
}
