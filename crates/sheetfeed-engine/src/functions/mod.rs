//! Deferred invocation of parsed [`FunctionRef`] values.
//!
//! The parser never executes anything; a call expression in a cell stays an
//! inert [`FunctionRef`] until the host asks for it to be invoked against a
//! registry it owns. Resolution happens at invocation time, so registering
//! a handler after parsing is fine.

use std::collections::HashMap;

use sheetfeed_model::{FunctionRef, Value};
use thiserror::Error;

/// A host-registered callable. Handlers receive the bound arguments in call
/// order and may return a value or nothing.
pub type Handler = Box<dyn Fn(&[Value]) -> Option<Value> + Send + Sync>;

/// Host-owned mapping from function name to handler.
///
/// The engine only ever reads from this at invocation time; the parser does
/// not know the registry exists.
pub trait FunctionRegistry {
    fn resolve(&self, name: &str) -> Option<&Handler>;
}

/// Invocation failures. Lookup misses are reported, never raised as a
/// value-model error: the surrounding iteration over records keeps going.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvokeError {
    #[error("no function named `{0}` is registered")]
    NotFound(String),
}

/// Resolves `fref.name` against `registry` and calls the handler.
///
/// `override_params`, when given, fully replaces the parsed argument list;
/// element count and kinds are passed through without coercion. The parsed
/// [`FunctionRef`] is never mutated either way. Arity is not checked here;
/// a mismatch is the handler's own failure to surface.
pub fn invoke(
    fref: &FunctionRef,
    registry: &dyn FunctionRegistry,
    override_params: Option<&[Value]>,
) -> Result<Option<Value>, InvokeError> {
    let handler = registry
        .resolve(&fref.name)
        .ok_or_else(|| InvokeError::NotFound(fref.name.clone()))?;
    let args = override_params.unwrap_or(&fref.params);
    Ok(handler(args))
}

/// `HashMap`-backed [`FunctionRegistry`] for hosts that do not bring their
/// own lookup structure.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`, replacing any previous handler with
    /// the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[Value]) -> Option<Value> + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl FunctionRegistry for HandlerRegistry {
    fn resolve(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn banana_ref() -> FunctionRef {
        FunctionRef::new(
            "on_collect",
            vec![Value::Text("banana".into()), Value::Number(12.0)],
            "on_collect(\"banana\", 12)",
        )
    }

    #[test]
    fn invoke_passes_parsed_params() {
        let mut registry = HandlerRegistry::new();
        registry.register("on_collect", |args: &[Value]| {
            assert_eq!(args.len(), 2);
            args.last().cloned()
        });

        let result = invoke(&banana_ref(), &registry, None);
        assert_eq!(result, Ok(Some(Value::Number(12.0))));
    }

    #[test]
    fn override_replaces_arguments_without_mutation() {
        let mut registry = HandlerRegistry::new();
        registry.register("on_collect", |args: &[Value]| {
            Some(Value::Number(args.len() as f64))
        });

        let fref = banana_ref();
        let overridden = [Value::Number(1.0)];
        let result = invoke(&fref, &registry, Some(&overridden));
        assert_eq!(result, Ok(Some(Value::Number(1.0))));

        // The parsed reference is untouched.
        assert_eq!(fref, banana_ref());
    }

    #[test]
    fn missing_function_is_a_reported_no_op() {
        let registry = HandlerRegistry::new();
        let result = invoke(&banana_ref(), &registry, None);
        assert_eq!(result, Err(InvokeError::NotFound("on_collect".into())));
    }

    #[test]
    fn handlers_may_return_nothing() {
        let mut registry = HandlerRegistry::new();
        registry.register("fire_and_forget", |_: &[Value]| None);
        let fref = FunctionRef::new("fire_and_forget", vec![], "fire_and_forget()");
        assert_eq!(invoke(&fref, &registry, None), Ok(None));
    }
}
