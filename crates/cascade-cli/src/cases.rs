//! Test case files
//!
//! A case file is CSV with a header row `function,expected,arg1,arg2,...`.
//! Rows may be shorter or longer than the header. Argument cells are
//! literals (an empty cell is an omitted argument) and `\n` in `expected`
//! stands for a newline.

use anyhow::{Context, Result};
use cascade::prelude::*;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// One row of a case file
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// 1-based line in the file
    pub line: u64,
    pub function: String,
    pub expected: String,
    pub args: Vec<ArgValue>,
}

/// A case whose output did not match
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub line: u64,
    pub function: String,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {}\n  expected: {:?}\n  actual:   {:?}",
            self.line, self.function, self.expected, self.actual
        )
    }
}

/// Read every case in a file
pub fn read_cases(path: &Path) -> Result<Vec<Case>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;

    let mut cases = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Failed to read '{}'", path.display()))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let function = record.get(0).unwrap_or_default().trim().to_string();
        if function.is_empty() {
            continue;
        }
        cases.push(Case {
            line,
            function,
            expected: record.get(1).unwrap_or_default().replace("\\n", "\n"),
            args: record.iter().skip(2).map(ArgValue::parse).collect(),
        });
    }
    Ok(cases)
}

/// Run cases, returning the ones that failed
pub fn run_cases(registry: &FunctionRegistry, cases: &[Case]) -> Vec<Failure> {
    cases
        .iter()
        .filter_map(|case| {
            let actual = match registry.call(&case.function, case.args.clone()) {
                Ok(result) => result.output.to_string(),
                Err(e) => e.to_string(),
            };
            debug!(line = case.line, function = %case.function, %actual, "case");
            (actual != case.expected).then(|| Failure {
                line: case.line,
                function: case.function.clone(),
                expected: case.expected.clone(),
                actual,
            })
        })
        .collect()
}
