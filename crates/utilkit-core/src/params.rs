//! Parameter substitution over an explicit argument bag.
//!
//! A [`Substitution`] holds a fixed `key -> value` table. Applied to an
//! [`Args`] bag it rewrites, in every argument that is a JSON object, the
//! top-level keys found in the table. Everything else passes through as is.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Positional and named arguments forwarded to a wrapped function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub positional: Vec<Value>,
    pub named: BTreeMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }
}

/// Fixed replacement table for object-valued arguments.
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    table: Map<String, Value>,
}

impl Substitution {
    pub fn new(table: Map<String, Value>) -> Self {
        Self { table }
    }

    /// Build from `(key, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            table: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Rewrite matching keys in every object argument.
    ///
    /// Only keys already present in the argument are touched, and table
    /// entries whose value is falsy (`null`, `false`, `0`, `""`, `[]`, `{}`)
    /// are ignored.
    pub fn apply(&self, mut args: Args) -> Args {
        if self.table.is_empty() {
            return args;
        }
        for value in args.positional.iter_mut().chain(args.named.values_mut()) {
            if let Value::Object(obj) = value {
                self.rewrite(obj);
            }
        }
        args
    }

    /// Wrap `f` so every call sees substituted arguments.
    pub fn wrap<T, F>(self, mut f: F) -> impl FnMut(Args) -> T
    where
        F: FnMut(Args) -> T,
    {
        move |args: Args| f(self.apply(args))
    }

    fn rewrite(&self, obj: &mut Map<String, Value>) {
        for (key, slot) in obj.iter_mut() {
            match self.table.get(key) {
                Some(replacement) if is_truthy(replacement) => {
                    tracing::trace!(key = %key, "substituting parameter");
                    *slot = replacement.clone();
                }
                _ => {}
            }
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
