//! Read-only view of bound arguments for compute logic and group checks

use cascade_core::Value;

use crate::binder::{Binding, BoundArgument};
use crate::error::{PipelineError, PipelineResult};

/// Resolved argument values, looked up by declared name
///
/// Compute logic runs whether or not validation passed, so every accessor
/// is fallible: an omitted or mistyped argument is an `Err`, which the
/// pipeline turns into a masked placeholder result.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    bound: &'a [BoundArgument],
}

impl<'a> Arguments<'a> {
    pub fn new(bound: &'a [BoundArgument]) -> Self {
        Self { bound }
    }

    pub fn from_binding(binding: &'a Binding) -> Self {
        Self::new(&binding.arguments)
    }

    /// The resolved value of an argument; `None` if omitted or undeclared
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.bound
            .iter()
            .find(|a| a.name == name)
            .and_then(BoundArgument::value)
    }

    /// The resolved value of an argument, or an error if it has none
    pub fn value(&self, name: &str) -> PipelineResult<&'a Value> {
        self.get(name)
            .ok_or_else(|| PipelineError::MissingValue(name.to_string()))
    }

    pub fn number(&self, name: &str) -> PipelineResult<f64> {
        Ok(self.value(name)?.try_number()?)
    }

    pub fn text(&self, name: &str) -> PipelineResult<&'a str> {
        Ok(self.value(name)?.try_text()?)
    }

    pub fn boolean(&self, name: &str) -> PipelineResult<bool> {
        Ok(self.value(name)?.try_bool()?)
    }

    pub fn list(&self, name: &str) -> PipelineResult<&'a [Value]> {
        Ok(self.value(name)?.try_list()?)
    }

    /// Iterate over `(name, value)` for every argument that has a value
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        self.bound
            .iter()
            .filter_map(|a| a.value().map(|v| (a.name.as_str(), v)))
    }
}
