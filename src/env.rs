use crate::common::Number;
use std::collections::HashMap;

/// Variables assigned with `set NAME expr`, visible to every later
/// calculation that shares the store.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Globals {
    vars: HashMap<String, Number>,
}

impl Globals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Number> {
        self.vars.get(name).copied()
    }

    /// Replaces any previous value, returning it.
    pub fn set(&mut self, name: impl Into<String>, value: Number) -> Option<Number> {
        self.vars.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Number> {
        self.vars.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Number)> + '_ {
        self.vars.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// `let` bindings in effect at some point of an expression, innermost first.
///
/// Binding never modifies a scope; it produces a child that borrows its
/// parent for as long as the `in` body is being evaluated.
#[derive(Debug, Copy, Clone)]
pub(crate) enum Scope<'s> {
    Empty,
    Bound {
        name: &'s str,
        value: Number,
        parent: &'s Scope<'s>,
    },
}

impl<'s> Scope<'s> {
    pub fn bind(&'s self, name: &'s str, value: Number) -> Scope<'s> {
        Scope::Bound {
            name,
            value,
            parent: self,
        }
    }

    pub fn get(&self, wanted: &str) -> Option<Number> {
        let mut scope = self;
        while let Scope::Bound {
            name,
            value,
            parent,
        } = scope
        {
            if *name == wanted {
                return Some(*value);
            }
            scope = *parent;
        }
        None
    }
}
