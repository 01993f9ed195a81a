use super::{load, Resolved, Resolver, Table};
use crate::calculator::Calculator;
use crate::common::Int;
use crate::error::{Error, Result};
use crate::roll::RandomSource;
use std::collections::HashMap;
use std::path::Path;

/// Named tables available for lookup and resolution.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: HashMap<String, Table>,
    resolver: Resolver,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Registers `table` under `name`, returning whatever was registered
    /// there before.
    pub fn register(&mut self, name: impl Into<String>, table: Table) -> Option<Table> {
        self.tables.insert(name.into(), table)
    }

    pub fn remove(&mut self, name: &str) -> Option<Table> {
        self.tables.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tables.keys().map(String::as_str)
    }

    pub fn lookup(&self, name: &str) -> Result<&Table> {
        self.tables.get(name).ok_or_else(|| Error::lookup("table", name))
    }

    /// Looks up `"doc.section.sub"`: the registered table `doc`, then its
    /// sub-tables in order.
    pub fn lookup_path(&self, path: &str) -> Result<&Table> {
        let mut parts = path.split('.');
        let root = parts.next().unwrap_or_default();
        let mut table = self.lookup(root)?;

        for part in parts {
            table = table
                .subtable(part)
                .ok_or_else(|| Error::lookup("sub-table", path))?;
        }
        Ok(table)
    }

    /// Parses `text` as a TOML table file and registers it under `name`.
    pub fn load_str(&mut self, name: &str, text: &str) -> Result<&Table> {
        let table = load::parse_table(name, text, name)?;
        self.insert_loaded(name, table)
    }

    pub fn load_file(&mut self, name: &str, path: impl AsRef<Path>) -> Result<&Table> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            origin: origin.clone(),
            message: e.to_string(),
        })?;

        let table = load::parse_table(name, &text, &origin)?;
        log::debug!("loaded table {:?} from {}", name, origin);
        self.insert_loaded(name, table)
    }

    fn insert_loaded(&mut self, name: &str, table: Table) -> Result<&Table> {
        self.register(name, table);
        self.lookup(name)
    }

    /// Resolves the table at `path` with no modifier.
    pub fn resolve<S: RandomSource>(
        &self,
        path: &str,
        calc: &mut Calculator<S>,
    ) -> Result<Resolved> {
        self.resolve_with(path, 0, calc)
    }

    pub fn resolve_with<S: RandomSource>(
        &self,
        path: &str,
        modifier: Int,
        calc: &mut Calculator<S>,
    ) -> Result<Resolved> {
        let table = self.lookup_path(path)?;
        self.resolver.resolve(table, modifier, calc)
    }
}
