//! Validation rules
//!
//! Rules follow the shape of spreadsheet data-validation types: a type
//! check, a number or text length compared with an operator, a list of
//! allowed values, a pattern, or a custom predicate.
//!
//! A rule reports a *phrase* ("is not a number", "must be greater than 0");
//! the validator turns it into `[name] argument <phrase>`.
//!
//! ## Example
//!
//! ```rust
//! use cascade_pipeline::{Operator, Rule};
//! use cascade_core::Value;
//!
//! let rule = Rule::whole_between(Operator::Between, 0.0, 255.0);
//! assert!(rule.check(&Value::from(12)).is_ok());
//! assert_eq!(
//!     rule.check(&Value::from(300)),
//!     Err("must be between 0 and 255".to_string())
//! );
//! ```

use cascade_core::Value;
use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;

/// Caller-supplied predicate; `Err` carries the message phrase
pub type CheckFn = fn(&Value) -> Result<(), String>;

/// Largest serial date (9999-12-31 in the 1900 date system)
pub const MAX_SERIAL_DATE: f64 = 2_958_465.0;

/// A single check applied to a resolved argument value
#[derive(Debug, Clone)]
pub enum Rule {
    /// Must be a number
    IsNumber,

    /// Must be text
    IsText,

    /// Must be a boolean
    IsBoolean,

    /// Must be a list
    IsList,

    /// Must be a whole number satisfying the comparison
    Whole {
        operator: Operator,
        value1: f64,
        value2: Option<f64>,
    },

    /// Must be a number satisfying the comparison
    Decimal {
        operator: Operator,
        value1: f64,
        value2: Option<f64>,
    },

    /// Text length (in characters) must satisfy the comparison
    TextLength {
        operator: Operator,
        value1: usize,
        value2: Option<usize>,
    },

    /// Text or list must not be empty
    NonEmpty,

    /// Must be one of the listed values (case-insensitive)
    OneOf(Vec<String>),

    /// Text must match the pattern
    Pattern {
        regex: Regex,
        /// Completes "must be ..." in the message
        description: String,
    },

    /// Must be a valid serial date
    Date,

    /// Custom predicate
    ///
    /// An `Err` with empty text, or a panic, is reported as "could not be
    /// validated". A panic is caught, but the process panic hook still runs
    /// first (by default it prints to stderr), so return `Err` instead.
    Custom(CheckFn),
}

impl Rule {
    /// Create a whole number rule
    pub fn whole(operator: Operator, value1: f64) -> Self {
        Rule::Whole {
            operator,
            value1,
            value2: None,
        }
    }

    /// Create a whole number rule with between/not between operator
    pub fn whole_between(operator: Operator, value1: f64, value2: f64) -> Self {
        Rule::Whole {
            operator,
            value1,
            value2: Some(value2),
        }
    }

    /// Create a decimal number rule
    pub fn decimal(operator: Operator, value1: f64) -> Self {
        Rule::Decimal {
            operator,
            value1,
            value2: None,
        }
    }

    /// Create a decimal number rule with between/not between operator
    pub fn decimal_between(operator: Operator, value1: f64, value2: f64) -> Self {
        Rule::Decimal {
            operator,
            value1,
            value2: Some(value2),
        }
    }

    /// Create a text length rule
    pub fn text_length(operator: Operator, value1: usize) -> Self {
        Rule::TextLength {
            operator,
            value1,
            value2: None,
        }
    }

    /// Create a text length rule with between/not between operator
    pub fn text_length_between(operator: Operator, value1: usize, value2: usize) -> Self {
        Rule::TextLength {
            operator,
            value1,
            value2: Some(value2),
        }
    }

    /// Create a list-of-values rule
    pub fn one_of<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::OneOf(choices.into_iter().map(Into::into).collect())
    }

    /// Create a pattern rule
    pub fn pattern(regex: Regex, description: impl Into<String>) -> Self {
        Rule::Pattern {
            regex,
            description: description.into(),
        }
    }

    /// Check a value, returning the failure phrase
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            Rule::IsNumber => expect(value.as_number().is_some(), "is not a number"),
            Rule::IsText => expect(value.as_text().is_some(), "is not text"),
            Rule::IsBoolean => expect(value.as_bool().is_some(), "is not a boolean"),
            Rule::IsList => expect(value.as_list().is_some(), "is not a list"),
            Rule::Whole {
                operator,
                value1,
                value2,
            } => {
                let n = value.as_number().ok_or("is not a number")?;
                expect(n.fract() == 0.0, "is not a whole number")?;
                operator.check(n, *value1, *value2)
            }
            Rule::Decimal {
                operator,
                value1,
                value2,
            } => {
                let n = value.as_number().ok_or("is not a number")?;
                operator.check(n, *value1, *value2)
            }
            Rule::TextLength {
                operator,
                value1,
                value2,
            } => {
                let s = value.as_text().ok_or("is not text")?;
                let len = s.chars().count() as f64;
                operator
                    .check(len, *value1 as f64, value2.map(|v| v as f64))
                    .map_err(|phrase| format!("length {}", phrase))
            }
            Rule::NonEmpty => {
                let empty = match value {
                    Value::Empty => true,
                    Value::Text(s) => s.is_empty(),
                    Value::List(items) => items.is_empty(),
                    _ => false,
                };
                expect(!empty, "must not be empty")
            }
            Rule::OneOf(choices) => {
                let shown = value.to_string();
                let found = choices.iter().any(|c| c.eq_ignore_ascii_case(&shown));
                if found {
                    Ok(())
                } else {
                    Err(format!("must be one of: {}", choices.join(", ")))
                }
            }
            Rule::Pattern { regex, description } => {
                let s = value.as_text().ok_or("is not text")?;
                if regex.is_match(s) {
                    Ok(())
                } else {
                    Err(format!("must be {}", description))
                }
            }
            Rule::Date => {
                let n = value.as_number().ok_or("is not a date")?;
                expect(date_from_serial(n).is_some(), "is not a valid date")
            }
            Rule::Custom(check) => check(value),
        }
    }

    /// Check the rule's own declaration
    pub(crate) fn verify(&self) -> Result<(), String> {
        match self {
            Rule::Whole {
                operator, value2, ..
            }
            | Rule::Decimal {
                operator, value2, ..
            } if operator.requires_two_values() && value2.is_none() => Err(format!(
                "operator {} requires two values",
                operator.as_str()
            )),
            Rule::TextLength {
                operator, value2, ..
            } if operator.requires_two_values() && value2.is_none() => Err(format!(
                "operator {} requires two values",
                operator.as_str()
            )),
            Rule::OneOf(choices) if choices.is_empty() => {
                Err("list of allowed values is empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

fn expect(ok: bool, phrase: &str) -> Result<(), String> {
    if ok {
        Ok(())
    } else {
        Err(phrase.to_string())
    }
}

fn show(n: f64) -> String {
    Value::Number(n).to_string()
}

/// Comparison operators for rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    /// Value must be between value1 and value2 (inclusive)
    #[default]
    Between,
    /// Value must NOT be between value1 and value2
    NotBetween,
    /// Value must equal value1
    Equal,
    /// Value must NOT equal value1
    NotEqual,
    /// Value must be greater than value1
    GreaterThan,
    /// Value must be less than value1
    LessThan,
    /// Value must be greater than or equal to value1
    GreaterThanOrEqual,
    /// Value must be less than or equal to value1
    LessThanOrEqual,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Between => "between",
            Operator::NotBetween => "notBetween",
            Operator::Equal => "equal",
            Operator::NotEqual => "notEqual",
            Operator::GreaterThan => "greaterThan",
            Operator::LessThan => "lessThan",
            Operator::GreaterThanOrEqual => "greaterThanOrEqual",
            Operator::LessThanOrEqual => "lessThanOrEqual",
        }
    }

    /// Check if this operator requires two values
    pub fn requires_two_values(&self) -> bool {
        matches!(self, Operator::Between | Operator::NotBetween)
    }

    /// Compare `n` against the bounds
    pub fn matches(&self, n: f64, value1: f64, value2: Option<f64>) -> bool {
        let value2 = value2.unwrap_or(value1);
        let (lo, hi) = if value1 <= value2 {
            (value1, value2)
        } else {
            (value2, value1)
        };
        match self {
            Operator::Between => n >= lo && n <= hi,
            Operator::NotBetween => n < lo || n > hi,
            Operator::Equal => n == value1,
            Operator::NotEqual => n != value1,
            Operator::GreaterThan => n > value1,
            Operator::LessThan => n < value1,
            Operator::GreaterThanOrEqual => n >= value1,
            Operator::LessThanOrEqual => n <= value1,
        }
    }

    fn check(&self, n: f64, value1: f64, value2: Option<f64>) -> Result<(), String> {
        if self.matches(n, value1, value2) {
            return Ok(());
        }
        let a = show(value1);
        let b = show(value2.unwrap_or(value1));
        Err(match self {
            Operator::Between => format!("must be between {} and {}", a, b),
            Operator::NotBetween => format!("must not be between {} and {}", a, b),
            Operator::Equal => format!("must be equal to {}", a),
            Operator::NotEqual => format!("must not be equal to {}", a),
            Operator::GreaterThan => format!("must be greater than {}", a),
            Operator::LessThan => format!("must be less than {}", a),
            Operator::GreaterThanOrEqual => format!("must be greater than or equal to {}", a),
            Operator::LessThanOrEqual => format!("must be less than or equal to {}", a),
        })
    }
}

/// Convert a serial date (1900 date system) to a calendar date
///
/// Serial 1 is 1900-01-01. Serial 60 is the fictitious 1900-02-29 and has
/// no calendar date. Any time-of-day fraction is ignored.
pub fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_SERIAL_DATE + 1.0 {
        return None;
    }
    let days = serial.floor() as u64;
    if days == 60 {
        return None;
    }
    let base = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let date = base.checked_add_days(Days::new(days))?;
    (date.year() <= 9999).then_some(date)
}
