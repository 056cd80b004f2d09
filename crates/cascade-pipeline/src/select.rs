//! Output selection

use cascade_core::Value;

use crate::report::ErrorReport;

/// Choose the single output of an invocation: a non-empty report always
/// wins over the computed result
pub fn select_output(result: &Value, report: &ErrorReport) -> Value {
    if report.is_empty() {
        result.clone()
    } else {
        Value::text(report.combined_text())
    }
}
