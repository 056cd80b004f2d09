//! Text functions

use cascade_core::Value;
use lazy_regex::regex;
use regex::Regex;

use crate::arguments::Arguments;
use crate::error::{PipelineError, PipelineResult};
use crate::function::FunctionDef;
use crate::rules::{Operator, Rule};
use crate::spec::ArgumentSpec;

pub fn format_label() -> PipelineResult<FunctionDef> {
    FunctionDef::builder("FORMAT.LABEL")
        .describe("Prefix a piece of text, optionally upper-casing the result")
        .argument(ArgumentSpec::required("text").text())
        .argument(
            ArgumentSpec::optional("prefix")
                .text()
                .rule(Rule::pattern(
                    Regex::clone(regex!(r"^[^\r\n]*$")),
                    "a single line",
                ))
                .describe("Text placed before `text`"),
        )
        .argument(ArgumentSpec::optional("uppercase").boolean())
        .build(fn_format_label)
}

/// FORMAT.LABEL(text, [prefix], [uppercase])
pub fn fn_format_label(args: &Arguments) -> PipelineResult<Value> {
    let text = args.text("text")?;
    let prefix = args.text("prefix")?;
    let label = format!("{}{}", prefix, text);
    if args.boolean("uppercase")? {
        Ok(Value::text(label.to_uppercase()))
    } else {
        Ok(Value::text(label))
    }
}

/// Widest PAD.LEFT result
const MAX_PAD_WIDTH: f64 = 255.0;

pub fn pad_left() -> PipelineResult<FunctionDef> {
    FunctionDef::builder("PAD.LEFT")
        .describe("Pad text on the left to a fixed width")
        .argument(ArgumentSpec::required("text").text())
        .argument(
            ArgumentSpec::required("width")
                .number()
                .rule(Rule::whole_between(Operator::Between, 0.0, MAX_PAD_WIDTH)),
        )
        .argument(
            ArgumentSpec::optional("fill")
                .text()
                .with_default(" ")
                .rule(Rule::text_length(Operator::Equal, 1)),
        )
        .build(fn_pad_left)
}

/// PAD.LEFT(text, width, [fill])
pub fn fn_pad_left(args: &Arguments) -> PipelineResult<Value> {
    let text = args.text("text")?;
    let width = args.number("width")?;
    let fill = args.text("fill")?;

    if width > MAX_PAD_WIDTH {
        return Err(PipelineError::Evaluation(format!("width {} is too large", width)));
    }
    let width = if width > 0.0 { width.trunc() as usize } else { 0 };
    let len = text.chars().count();
    if width <= len {
        return Ok(Value::text(text));
    }

    let mut padded: String = fill.chars().take(1).cycle().take(width - len).collect();
    padded.push_str(text);
    Ok(Value::text(padded))
}
