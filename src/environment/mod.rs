use std::collections::HashMap;

use anyhow::anyhow;

use crate::ir::{DeclarationNature, Type};

/// What the analyzer knows about one declared name. Copying is lightweight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolEntry {
	pub r#type:      Type,
	pub initialized: bool,
	pub nature:      DeclarationNature,
	/// Token index of the declared name.
	pub declared_at: usize,
}

impl SymbolEntry {
	pub fn new(r#type: Type, initialized: bool, nature: DeclarationNature, declared_at: usize) -> Self {
		Self { r#type, initialized, nature, declared_at }
	}

	pub fn is_constant(&self) -> bool { self.nature == DeclarationNature::Constant }
}

/// Lexical scopes, innermost last. Names borrow from the source text.
#[derive(Default, Debug)]
pub struct Environment<'a> {
	scopes: Vec<HashMap<&'a str, SymbolEntry>>,
}

impl<'a> Environment<'a> {
	pub fn new() -> Self { Self { scopes: Vec::new() } }

	pub fn push_scope(&mut self) { self.scopes.push(HashMap::new()); }

	/// Discard the innermost scope and every entry it owns.
	pub fn pop_scope(&mut self) {
		let Some(scope) = self.scopes.pop() else { return };
		if tracing::enabled!(tracing::Level::TRACE) {
			let mut names: Vec<_> = scope.iter().map(|(name, entry)| (entry.declared_at, *name)).collect();
			names.sort_unstable();
			let names: Vec<_> = names.into_iter().map(|(_, name)| name).collect();
			tracing::trace!(depth = self.scopes.len(), ?names, "scope popped");
		}
	}

	pub fn depth(&self) -> usize { self.scopes.len() }

	/// Add `name` to the innermost scope. `Ok(false)` when the scope already
	/// holds it; the first entry is kept.
	pub fn declare(&mut self, name: &'a str, entry: SymbolEntry) -> anyhow::Result<bool> {
		let scope = self.scopes.last_mut().ok_or_else(|| anyhow!("declaration of '{name}' outside any scope"))?;
		if scope.contains_key(name) {
			return Ok(false);
		}
		scope.insert(name, entry);
		Ok(true)
	}

	/// Innermost entry for `name`, walking outwards.
	pub fn lookup(&self, name: &str) -> Option<SymbolEntry> {
		self.scopes.iter().rev().find_map(|scope| scope.get(name).copied())
	}

	/// Flip `initialized` on the entry `name` resolves to. Returns whether a
	/// matching entry was found.
	pub fn mark_initialized(&mut self, name: &str) -> bool {
		match self.scopes.iter_mut().rev().find_map(|scope| scope.get_mut(name)) {
			Some(entry) => {
				entry.initialized = true;
				true
			}
			None => false,
		}
	}
}
