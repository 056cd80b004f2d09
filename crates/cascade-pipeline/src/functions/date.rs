//! Date functions
//!
//! Dates are serial numbers in the 1900 date system (serial 1 is
//! 1900-01-01); any time-of-day fraction is ignored.

use cascade_core::Value;

use crate::arguments::Arguments;
use crate::error::{PipelineError, PipelineResult};
use crate::function::{FunctionDef, GroupCheck};
use crate::rules::{date_from_serial, Rule};
use crate::spec::ArgumentSpec;

pub fn days_between() -> PipelineResult<FunctionDef> {
    FunctionDef::builder("DAYS.BETWEEN")
        .describe("Whole days from one date to a later one")
        .argument(ArgumentSpec::required("start_date").number().rule(Rule::Date))
        .argument(ArgumentSpec::required("end_date").number().rule(Rule::Date))
        .check(GroupCheck::new(["start_date", "end_date"], start_not_after_end))
        .build(fn_days_between)
}

fn start_not_after_end(args: &Arguments) -> Result<(), String> {
    let start = args.number("start_date").map_err(|e| e.to_string())?;
    let end = args.number("end_date").map_err(|e| e.to_string())?;
    if start.floor() <= end.floor() {
        Ok(())
    } else {
        Err("[start_date] argument must not be after [end_date]".to_string())
    }
}

/// DAYS.BETWEEN(start_date, end_date)
pub fn fn_days_between(args: &Arguments) -> PipelineResult<Value> {
    let start = args.number("start_date")?;
    let end = args.number("end_date")?;
    Ok(Value::Number(end.floor() - start.floor()))
}

pub fn date_iso() -> PipelineResult<FunctionDef> {
    FunctionDef::builder("DATE.ISO")
        .describe("Render a serial date as YYYY-MM-DD")
        .argument(ArgumentSpec::required("date").number().rule(Rule::Date))
        .build(fn_date_iso)
}

/// DATE.ISO(date)
pub fn fn_date_iso(args: &Arguments) -> PipelineResult<Value> {
    let serial = args.number("date")?;
    let date = date_from_serial(serial)
        .ok_or_else(|| PipelineError::Evaluation(format!("{} is not a valid date", serial)))?;
    Ok(Value::text(date.format("%Y-%m-%d").to_string()))
}
