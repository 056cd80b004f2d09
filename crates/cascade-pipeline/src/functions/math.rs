//! Math functions

use cascade_core::{HostError, Value};

use crate::arguments::Arguments;
use crate::error::PipelineResult;
use crate::function::FunctionDef;
use crate::rules::{Operator, Rule};
use crate::spec::ArgumentSpec;

fn finite(n: f64) -> Value {
    if n.is_finite() {
        Value::Number(n)
    } else {
        Value::Error(HostError::Num)
    }
}

pub fn multiply() -> PipelineResult<FunctionDef> {
    FunctionDef::builder("MULTIPLY")
        .describe("Multiply two numbers")
        .argument(ArgumentSpec::required("number1").number())
        .argument(ArgumentSpec::required("number2").number())
        .build(fn_multiply)
}

/// MULTIPLY(number1, number2)
pub fn fn_multiply(args: &Arguments) -> PipelineResult<Value> {
    let a = args.number("number1")?;
    let b = args.number("number2")?;
    Ok(finite(a * b))
}

pub fn divide() -> PipelineResult<FunctionDef> {
    FunctionDef::builder("DIVIDE")
        .describe("Divide one number by another")
        .argument(ArgumentSpec::required("dividend").number())
        .argument(
            ArgumentSpec::required("divisor")
                .number()
                .rule(Rule::decimal(Operator::NotEqual, 0.0)),
        )
        .build(fn_divide)
}

/// DIVIDE(dividend, divisor)
pub fn fn_divide(args: &Arguments) -> PipelineResult<Value> {
    let dividend = args.number("dividend")?;
    let divisor = args.number("divisor")?;
    // Zero divisor is already reported by validation
    if divisor == 0.0 {
        return Ok(Value::Empty);
    }
    Ok(finite(dividend / divisor))
}
