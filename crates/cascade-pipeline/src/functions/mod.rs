//! Built-in functions and the function registry

pub mod date;
pub mod list;
pub mod math;
pub mod text;

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::binder::RawArguments;
use crate::error::{PipelineError, PipelineResult};
use crate::function::FunctionDef;
use crate::invoke::{InvocationOptions, InvocationResult};

/// Global registry of built-in functions (lazily initialized)
static BUILTIN_REGISTRY: OnceLock<PipelineResult<FunctionRegistry>> = OnceLock::new();

/// The process-wide, read-only registry of built-in functions
pub fn builtin_registry() -> PipelineResult<&'static FunctionRegistry> {
    BUILTIN_REGISTRY
        .get_or_init(FunctionRegistry::with_builtins)
        .as_ref()
        .map_err(Clone::clone)
}

/// Invoke a built-in function by name
pub fn call(name: &str, raw: impl Into<RawArguments>) -> PipelineResult<InvocationResult> {
    builtin_registry()?.call(name, raw)
}

/// Declarations of every built-in function
pub fn builtins() -> PipelineResult<Vec<FunctionDef>> {
    Ok(vec![
        math::multiply()?,
        math::divide()?,
        text::format_label()?,
        text::pad_left()?,
        date::days_between()?,
        date::date_iso()?,
        list::join_list()?,
    ])
}

/// Function registry
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDef>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in functions
    pub fn with_builtins() -> PipelineResult<Self> {
        let mut registry = Self::new();
        for def in builtins()? {
            registry.register(def);
        }
        Ok(registry)
    }

    /// Look up a function by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(&name.to_uppercase())
    }

    /// Register a function, replacing any previous one with the same name
    pub fn register(&mut self, def: FunctionDef) -> Option<FunctionDef> {
        self.functions.insert(def.name().to_uppercase(), def)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.values().map(FunctionDef::name).collect();
        names.sort_unstable();
        names
    }

    /// Registered functions sorted by name
    pub fn functions(&self) -> Vec<&FunctionDef> {
        let mut defs: Vec<&FunctionDef> = self.functions.values().collect();
        defs.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        defs
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Invoke a function by name with default options
    pub fn call(
        &self,
        name: &str,
        raw: impl Into<RawArguments>,
    ) -> PipelineResult<InvocationResult> {
        self.call_with(name, raw, &InvocationOptions::default())
    }

    /// Invoke a function by name
    pub fn call_with(
        &self,
        name: &str,
        raw: impl Into<RawArguments>,
        options: &InvocationOptions,
    ) -> PipelineResult<InvocationResult> {
        let def = self
            .get(name)
            .ok_or_else(|| PipelineError::UnknownFunction(name.to_string()))?;
        Ok(def.invoke_with(raw, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_core::Value;

    #[test]
    fn test_builtins_declare_cleanly() {
        let registry = FunctionRegistry::with_builtins().unwrap();
        assert_eq!(
            registry.names(),
            vec![
                "DATE.ISO",
                "DAYS.BETWEEN",
                "DIVIDE",
                "FORMAT.LABEL",
                "JOIN.LIST",
                "MULTIPLY",
                "PAD.LEFT"
            ]
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = builtin_registry().unwrap();
        assert!(registry.get("multiply").is_some());
        assert!(registry.get("Format.Label").is_some());
        assert!(registry.get("NOPE").is_none());
    }

    #[test]
    fn test_call_unknown_function() {
        let err = call("NOPE", vec![Value::from(1)]).unwrap_err();
        assert_eq!(err, PipelineError::UnknownFunction("NOPE".into()));
    }

    #[test]
    fn test_call_builtin() {
        let result = call("MULTIPLY", vec![Value::from(5), Value::from(10)]).unwrap();
        assert_eq!(result.output, Value::from(50));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = FunctionRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register(math::multiply().unwrap()).is_none());
        assert!(registry.register(math::multiply().unwrap()).is_some());
        assert_eq!(registry.len(), 1);
    }
}
