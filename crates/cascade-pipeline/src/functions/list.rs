//! List functions

use cascade_core::Value;

use crate::arguments::Arguments;
use crate::error::PipelineResult;
use crate::function::FunctionDef;
use crate::rules::Rule;
use crate::spec::ArgumentSpec;

pub fn join_list() -> PipelineResult<FunctionDef> {
    FunctionDef::builder("JOIN.LIST")
        .describe("Join list items into one piece of text")
        .argument(ArgumentSpec::required("values").list().rule(Rule::NonEmpty))
        .argument(ArgumentSpec::optional("delimiter").text().with_default(", "))
        .argument(
            ArgumentSpec::optional("mode")
                .text()
                .with_default("all")
                .rule(Rule::one_of(["all", "skip_empty"])),
        )
        .build(fn_join_list)
}

/// JOIN.LIST(values, [delimiter], [mode])
pub fn fn_join_list(args: &Arguments) -> PipelineResult<Value> {
    let values = args.list("values")?;
    let delimiter = args.text("delimiter")?;
    let skip_empty = args.text("mode")?.eq_ignore_ascii_case("skip_empty");

    let parts: Vec<String> = values
        .iter()
        .map(Value::to_string)
        .filter(|s| !(skip_empty && s.is_empty()))
        .collect();
    Ok(Value::text(parts.join(delimiter)))
}
