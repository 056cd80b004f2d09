//! Result computation
//!
//! Runs a function's compute logic on every invocation, independently of
//! validation. Faults (an `Err`, a panic, or a result carrying a host error)
//! are caught here and replaced by a placeholder, so nothing native-error
//! shaped ever reaches output selection.

use std::panic::{self, AssertUnwindSafe};

use cascade_core::Value;
use tracing::warn;

use crate::arguments::Arguments;
use crate::binder::Binding;
use crate::function::FunctionDef;

/// Outcome of running compute logic
#[derive(Debug, Clone, PartialEq)]
pub struct Computed {
    /// The result, or the placeholder when the logic faulted
    pub value: Value,
    /// What went wrong, if anything
    pub fault: Option<String>,
}

impl Computed {
    /// Placeholder standing in for a faulted result
    pub const PLACEHOLDER: Value = Value::Empty;

    fn ok(value: Value) -> Self {
        Self { value, fault: None }
    }

    fn fault(detail: impl Into<String>) -> Self {
        Self {
            value: Self::PLACEHOLDER,
            fault: Some(detail.into()),
        }
    }

    pub fn is_fault(&self) -> bool {
        self.fault.is_some()
    }
}

/// Run the compute logic of `def` against the bound arguments
pub fn compute(def: &FunctionDef, binding: &Binding) -> Computed {
    let args = Arguments::from_binding(binding);
    let logic = def.compute_fn();

    match panic::catch_unwind(AssertUnwindSafe(|| logic(&args))) {
        Ok(Ok(value)) => match value.first_error() {
            None => Computed::ok(value),
            Some(e) => Computed::fault(format!("result is an error value ({})", e)),
        },
        Ok(Err(e)) => Computed::fault(e.to_string()),
        Err(_) => {
            warn!(function = def.name(), "compute logic panicked");
            Computed::fault("compute logic panicked")
        }
    }
}
