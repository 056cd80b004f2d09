//! Host value types

use std::fmt;
use std::sync::Arc;

use lazy_regex::regex_is_match;

use crate::error::{Error, Result};

/// A value as the host evaluator hands it to a function
///
/// Values are never coerced implicitly: `Number(5.0)` and `Text("5")` are
/// different values and the strict accessors treat them differently.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Present but blank (a reference to an empty cell)
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value (all numbers stored as f64, including serial dates)
    Number(f64),

    /// Text value
    Text(SharedString),

    /// Native error value produced by the host (#VALUE!, #N/A, etc.)
    Error(HostError),

    /// One-dimensional list of values
    List(Vec<Value>),
}

impl Value {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        Value::Text(SharedString::new(s.into()))
    }

    /// Check if the value is blank
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Check if the value itself is a host error
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Check if the value is, or contains, a host error
    pub fn contains_error(&self) -> bool {
        self.first_error().is_some()
    }

    /// The first host error found in this value, searching lists depth-first
    pub fn first_error(&self) -> Option<HostError> {
        match self {
            Value::Error(e) => Some(*e),
            Value::List(items) => items.iter().find_map(Value::first_error),
            _ => None,
        }
    }

    /// Get the value as a number (numbers only)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the value as a boolean (booleans only)
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as text (text only)
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the value as a list (lists only)
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the value as a number, or fail with the actual type
    pub fn try_number(&self) -> Result<f64> {
        self.as_number()
            .ok_or_else(|| Error::invalid_type("number", self.type_name()))
    }

    /// Get the value as a boolean, or fail with the actual type
    pub fn try_bool(&self) -> Result<bool> {
        self.as_bool()
            .ok_or_else(|| Error::invalid_type("boolean", self.type_name()))
    }

    /// Get the value as text, or fail with the actual type
    pub fn try_text(&self) -> Result<&str> {
        self.as_text()
            .ok_or_else(|| Error::invalid_type("text", self.type_name()))
    }

    /// Get the value as a list, or fail with the actual type
    pub fn try_list(&self) -> Result<&[Value]> {
        self.as_list()
            .ok_or_else(|| Error::invalid_type("list", self.type_name()))
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Error(_) => "error",
            Value::List(_) => "list",
        }
    }

    /// Parse a host literal
    ///
    /// - `""` is empty text and `"..."` is quoted text (`""` inside escapes a quote)
    /// - `TRUE` / `FALSE` in any case are booleans
    /// - decimal numerals are numbers
    /// - `#DIV/0!` and the other error codes are host errors
    /// - `{a,b,c}` is a list of literals
    /// - anything else is text, taken verbatim
    pub fn parse_literal(s: &str) -> Value {
        let trimmed = s.trim();

        if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
            let inner = &trimmed[1..trimmed.len() - 1];
            return Value::text(inner.replace("\"\"", "\""));
        }

        if trimmed.eq_ignore_ascii_case("TRUE") {
            return Value::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("FALSE") {
            return Value::Boolean(false);
        }

        if regex_is_match!(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$", trimmed) {
            if let Ok(n) = trimmed.parse::<f64>() {
                if n.is_finite() {
                    return Value::Number(n);
                }
            }
        }

        if let Some(e) = HostError::parse(trimmed) {
            return Value::Error(e);
        }

        if trimmed.starts_with('{') && trimmed.ends_with('}') {
            let inner = trimmed[1..trimmed.len() - 1].trim();
            if inner.is_empty() {
                return Value::List(Vec::new());
            }
            return Value::List(
                split_list_items(inner)
                    .into_iter()
                    .map(|item| Value::parse_literal(item.trim()))
                    .collect(),
            );
        }

        Value::text(s)
    }
}

/// Split list literal items on commas outside double quotes
///
/// A `""` escape toggles the quote state twice, so it never ends a quoted item.
fn split_list_items(inner: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                items.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&inner[start..]);
    items
}

impl Default for Value {
    fn default() -> Self {
        Value::Empty
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Value::Number(n) => {
                // Display-cell style: no trailing ".0" on integral values
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Text(s) => write!(f, "{}", s.as_str()),
            Value::Error(e) => write!(f, "{}", e),
            Value::List(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

impl From<HostError> for Value {
    fn from(e: HostError) -> Self {
        Value::Error(e)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Native error values of the host evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostError {
    /// #NULL! - Incorrect range operator
    Null,
    /// #DIV/0! - Division by zero
    Div0,
    /// #VALUE! - Wrong type of argument or operand
    Value,
    /// #REF! - Invalid cell reference
    Ref,
    /// #NAME? - Unrecognized formula name
    Name,
    /// #NUM! - Invalid numeric value
    Num,
    /// #N/A - Value not available
    Na,
    /// #GETTING_DATA - External data is loading
    GettingData,
    /// #SPILL! - Dynamic array cannot spill
    Spill,
    /// #CALC! - Calculation error
    Calc,
}

impl HostError {
    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            HostError::Null => "#NULL!",
            HostError::Div0 => "#DIV/0!",
            HostError::Value => "#VALUE!",
            HostError::Ref => "#REF!",
            HostError::Name => "#NAME?",
            HostError::Num => "#NUM!",
            HostError::Na => "#N/A",
            HostError::GettingData => "#GETTING_DATA",
            HostError::Spill => "#SPILL!",
            HostError::Calc => "#CALC!",
        }
    }

    /// Parse an error code (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "#NULL!" => Some(HostError::Null),
            "#DIV/0!" => Some(HostError::Div0),
            "#VALUE!" => Some(HostError::Value),
            "#REF!" => Some(HostError::Ref),
            "#NAME?" => Some(HostError::Name),
            "#NUM!" => Some(HostError::Num),
            "#N/A" => Some(HostError::Na),
            "#GETTING_DATA" => Some(HostError::GettingData),
            "#SPILL!" => Some(HostError::Spill),
            "#CALC!" => Some(HostError::Calc),
            _ => None,
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared, immutable string
///
/// Default values and literals are cloned into every invocation; `Arc<str>`
/// keeps those clones cheap.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SharedString(Arc<str>);

impl SharedString {
    /// Create a new shared string
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        SharedString(Arc::from(s.as_ref()))
    }

    /// Get the string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the string is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SharedString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SharedString {
    fn from(s: &str) -> Self {
        SharedString::new(s)
    }
}

impl From<String> for SharedString {
    fn from(s: String) -> Self {
        SharedString::new(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SharedString {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SharedString {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SharedString::new(s))
    }
}
