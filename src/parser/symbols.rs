//! Lexically-scoped symbol table
//!
//! A stack of scopes, innermost last, used by the parser to check
//! declarations and uses while it recognizes the program. The stack is never
//! empty: a global scope exists for the whole life of the table, and
//! [`SymbolTable::pop_scope`] on the global scope is a no-op.
//!
//! Shadowing is allowed: redeclaring a name from an enclosing scope inside a
//! nested scope is fine. Only a duplicate within one scope is an error.

use log::debug;
use rustc_hash::FxHashMap;

use super::errors::SymbolError;

/// Declared type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Int,
    Float,
}

/// What the table records per declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub ty: VarType,
    /// Line of the declaration, for diagnostics.
    pub line: usize,
}

/// Stack of scopes mapping identifier names to [`SymbolInfo`].
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<FxHashMap<String, SymbolInfo>>,
}

impl SymbolTable {
    /// A table holding only the global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Add `name` to the innermost scope. Fails if that exact scope already
    /// declares `name`; shadowing an outer scope is not an error.
    pub fn insert(&mut self, name: &str, info: SymbolInfo) -> Result<(), SymbolError> {
        let scope = self
            .scopes
            .last_mut()
            .expect("symbol table always has a global scope");

        if scope.contains_key(name) {
            return Err(SymbolError::Redeclared {
                line: info.line,
                name: name.to_string(),
            });
        }

        scope.insert(name.to_string(), info);
        Ok(())
    }

    /// Search scopes innermost to outermost and return the first match.
    pub fn lookup(&self, name: &str) -> Option<&SymbolInfo> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Open a new innermost scope (block entry).
    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
        debug!("pushed scope, depth now {}", self.scopes.len());
    }

    /// Discard the innermost scope (block exit), restoring the previous one.
    /// The global scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            debug!("popped scope, depth now {}", self.scopes.len());
        }
    }

    /// Number of open scopes, the global scope included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_at(line: usize) -> SymbolInfo {
        SymbolInfo {
            ty: VarType::Int,
            line,
        }
    }

    #[test]
    fn insert_then_lookup() {
        let mut table = SymbolTable::new();
        table.insert("x", int_at(1)).unwrap();
        assert_eq!(table.lookup("x"), Some(&int_at(1)));
        assert_eq!(table.lookup("y"), None);
    }

    #[test]
    fn duplicate_in_same_scope_is_rejected() {
        let mut table = SymbolTable::new();
        table.insert("x", int_at(1)).unwrap();
        let err = table.insert("x", int_at(2)).unwrap_err();
        assert_eq!(
            err,
            SymbolError::Redeclared {
                line: 2,
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn shadowing_resolves_to_innermost_then_restores_outer() {
        let mut table = SymbolTable::new();
        table.insert("x", int_at(1)).unwrap();

        table.push_scope();
        table
            .insert(
                "x",
                SymbolInfo {
                    ty: VarType::Float,
                    line: 2,
                },
            )
            .unwrap();
        assert_eq!(table.lookup("x").map(|info| info.ty), Some(VarType::Float));

        table.pop_scope();
        assert_eq!(table.lookup("x").map(|info| info.ty), Some(VarType::Int));
    }

    #[test]
    fn lookup_walks_outward_through_scopes() {
        let mut table = SymbolTable::new();
        table.insert("a", int_at(1)).unwrap();
        table.push_scope();
        table.push_scope();
        assert_eq!(table.lookup("a"), Some(&int_at(1)));
    }

    #[test]
    fn names_vanish_when_their_scope_closes() {
        let mut table = SymbolTable::new();
        table.push_scope();
        table.insert("tmp", int_at(3)).unwrap();
        table.pop_scope();
        assert_eq!(table.lookup("tmp"), None);
    }

    #[test]
    fn global_scope_survives_over_popping() {
        let mut table = SymbolTable::new();
        table.insert("x", int_at(1)).unwrap();
        table.pop_scope();
        table.pop_scope();
        assert_eq!(table.depth(), 1);
        assert_eq!(table.lookup("x"), Some(&int_at(1)));
    }
}
