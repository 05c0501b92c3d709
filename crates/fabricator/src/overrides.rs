//! Field values and override maps.
//!
//! An [`Overrides`] map assigns a [`FieldValue`] to field names. The same
//! type backs both layers a factory applies on top of generated data: the
//! factory-wide defaults and the overrides passed to a single build.
//!
//! # Example
//!
//! ```ignore
//! use fabricator::prelude::*;
//!
//! let overrides = Overrides::new()
//!     .set("first_name", "Moishe")
//!     .generate("id", |index, _field| index + 1);
//! ```

use std::any::{Any, type_name};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::sync::Arc;

type ValueFn = dyn Fn(u64, &str) -> Box<dyn Any + Send> + Send + Sync;

/// Value source for a single field.
#[derive(Clone)]
pub enum FieldValue {
	/// Static value, cloned into every instance it is applied to.
	Literal {
		/// Name of the literal's type.
		type_name: &'static str,
		/// Produces a fresh copy of the literal.
		value: Arc<ValueFn>,
	},
	/// Function of `(sequence index, field name)`, invoked once per build.
	Generator {
		/// Name of the generated type.
		type_name: &'static str,
		/// The generator function.
		function: Arc<ValueFn>,
	},
}

impl FieldValue {
	/// Creates a literal value.
	pub fn literal<V>(value: V) -> Self
	where
		V: Clone + Send + Sync + 'static,
	{
		Self::Literal {
			type_name: type_name::<V>(),
			value: Arc::new(move |_: u64, _: &str| -> Box<dyn Any + Send> {
				Box::new(value.clone())
			}),
		}
	}

	/// Creates a generator value.
	///
	/// The function receives the number of instances the factory had built
	/// before the current one and the name of the field being resolved.
	pub fn generator<V, F>(function: F) -> Self
	where
		V: Send + 'static,
		F: Fn(u64, &str) -> V + Send + Sync + 'static,
	{
		Self::Generator {
			type_name: type_name::<V>(),
			function: Arc::new(move |index: u64, field: &str| -> Box<dyn Any + Send> {
				Box::new(function(index, field))
			}),
		}
	}

	/// Produces the concrete value for `field` at sequence `index`.
	pub fn resolve(&self, index: u64, field: &str) -> Box<dyn Any + Send> {
		match self {
			Self::Literal { value, .. } => value(index, field),
			Self::Generator { function, .. } => function(index, field),
		}
	}

	/// Returns the name of the type this value produces.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Literal { type_name, .. } | Self::Generator { type_name, .. } => type_name,
		}
	}

	/// Returns true for generator values.
	pub fn is_generator(&self) -> bool {
		matches!(self, Self::Generator { .. })
	}
}

impl fmt::Debug for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal { type_name, .. } => write!(f, "Literal<{}>", type_name),
			Self::Generator { type_name, .. } => write!(f, "Generator<{}>", type_name),
		}
	}
}

/// Mapping from field name to value source.
///
/// Names that do not match a settable field of the model are ignored when
/// the map is applied, so one map can be shared between related models.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
	entries: BTreeMap<String, FieldValue>,
}

impl Overrides {
	/// Creates an empty override map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a literal value for a field.
	pub fn set<V>(self, field: impl Into<String>, value: V) -> Self
	where
		V: Clone + Send + Sync + 'static,
	{
		self.insert(field, FieldValue::literal(value))
	}

	/// Sets a generator function for a field.
	pub fn generate<V, F>(self, field: impl Into<String>, function: F) -> Self
	where
		V: Send + 'static,
		F: Fn(u64, &str) -> V + Send + Sync + 'static,
	{
		self.insert(field, FieldValue::generator(function))
	}

	/// Sets a prepared [`FieldValue`] for a field.
	pub fn insert(mut self, field: impl Into<String>, value: FieldValue) -> Self {
		self.entries.insert(field.into(), value);
		self
	}

	/// Merges `other` into this map. Entries of `other` win on conflict.
	pub fn extend(mut self, other: &Overrides) -> Self {
		self.entries.extend(
			other
				.entries
				.iter()
				.map(|(name, value)| (name.clone(), value.clone())),
		);
		self
	}

	/// Returns the value source for a field.
	pub fn get(&self, field: &str) -> Option<&FieldValue> {
		self.entries.get(field)
	}

	/// Returns true if the map has an entry for `field`.
	pub fn contains(&self, field: &str) -> bool {
		self.entries.contains_key(field)
	}

	/// Returns the field names in the map, sorted.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Iterates over the entries, sorted by field name.
	pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
		self.entries.iter()
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if the map is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<'a> IntoIterator for &'a Overrides {
	type Item = (&'a String, &'a FieldValue);
	type IntoIter = btree_map::Iter<'a, String, FieldValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl FromIterator<(String, FieldValue)> for Overrides {
	fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}
