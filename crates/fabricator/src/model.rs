//! Typed reflection layer over fixture models.
//!
//! A factory never inspects a model through runtime reflection. Instead each
//! model type carries a small field-accessor table, usually generated by
//! `#[derive(Model)]`, that lists its settable fields and assigns type-erased
//! values to them by name.
//!
//! # Example
//!
//! ```ignore
//! use fabricator::prelude::*;
//!
//! #[derive(Debug, Clone, Default, Model, Dummy)]
//! pub struct User {
//!     pub id: u64,
//!     pub username: String,
//!     #[fabricate(skip)]
//!     pub password_hash: String,
//! }
//!
//! assert_eq!(User::kind(), ModelKind::Record);
//! assert_eq!(User::field_names(), &["id", "username"]);
//! ```

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

/// Structural kind of a model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
	/// Struct with named fields. The only kind a factory accepts.
	Record,
	/// Tuple or unit struct.
	Tuple,
	/// Enumeration.
	Enum,
	/// Primitive value such as an integer, boolean or string.
	Scalar,
	/// Ordered collection.
	Sequence,
	/// Key/value collection.
	Map,
	/// Optional value.
	Optional,
}

impl ModelKind {
	/// Returns the lowercase name of the kind.
	pub fn as_str(&self) -> &'static str {
		match self {
			ModelKind::Record => "record",
			ModelKind::Tuple => "tuple",
			ModelKind::Enum => "enum",
			ModelKind::Scalar => "scalar",
			ModelKind::Sequence => "sequence",
			ModelKind::Map => "map",
			ModelKind::Optional => "optional",
		}
	}

	/// Returns true for kinds that expose named fields.
	pub fn is_record(&self) -> bool {
		matches!(self, ModelKind::Record)
	}
}

impl fmt::Display for ModelKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Outcome of assigning a value to a named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAssignment {
	/// The value was stored in the field.
	Applied,
	/// No settable field has this name. The instance is unchanged.
	Ignored,
	/// The field exists but the value has a different type.
	TypeMismatch {
		/// Declared type of the field.
		expected: &'static str,
	},
}

/// Field-accessor table for a model type.
///
/// Implement this with `#[derive(Model)]`. Only `pub` fields of a struct
/// with named fields are listed; `#[fabricate(skip)]` hides a public field.
pub trait Model: Sized + Send + Sync + 'static {
	/// Returns the structural kind of the type.
	fn kind() -> ModelKind;

	/// Returns the names of the externally settable fields, in declaration order.
	fn field_names() -> &'static [&'static str] {
		&[]
	}

	/// Returns true if `name` is a settable field of the type.
	fn has_field(name: &str) -> bool {
		Self::field_names().contains(&name)
	}

	/// Returns a reference to the named field's value.
	fn field(&self, name: &str) -> Option<&dyn Any> {
		let _ = name;
		None
	}

	/// Assigns a type-erased value to the named field.
	///
	/// Unknown and non-settable names yield [`FieldAssignment::Ignored`].
	fn set_field(&mut self, name: &str, value: Box<dyn Any + Send>) -> FieldAssignment {
		let _ = (name, value);
		FieldAssignment::Ignored
	}
}

/// Recovers a field value of type `F` from a type-erased value.
///
/// Besides exact matches, a `&'static str` is accepted for a `String` field.
/// On failure the original value is handed back.
pub fn downcast_value<F: 'static>(value: Box<dyn Any + Send>) -> Result<F, Box<dyn Any + Send>> {
	let value = match value.downcast::<F>() {
		Ok(value) => return Ok(*value),
		Err(value) => value,
	};

	if TypeId::of::<F>() == TypeId::of::<String>()
		&& let Some(text) = value.downcast_ref::<&'static str>()
	{
		let owned: Box<dyn Any + Send> = Box::new(text.to_string());
		if let Ok(coerced) = owned.downcast::<F>() {
			return Ok(*coerced);
		}
	}

	Err(value)
}

macro_rules! impl_model_kind {
	($kind:ident => $($ty:ty),+ $(,)?) => {
		$(
			impl Model for $ty {
				fn kind() -> ModelKind {
					ModelKind::$kind
				}
			}
		)+
	};
}

impl_model_kind!(Scalar =>
	bool, char, String,
	i8, i16, i32, i64, i128, isize,
	u8, u16, u32, u64, u128, usize,
	f32, f64,
	&'static str,
);

impl<T: Send + Sync + 'static> Model for Vec<T> {
	fn kind() -> ModelKind {
		ModelKind::Sequence
	}
}

impl<T: Send + Sync + 'static> Model for VecDeque<T> {
	fn kind() -> ModelKind {
		ModelKind::Sequence
	}
}

impl<K: Send + Sync + 'static, V: Send + Sync + 'static, S: Send + Sync + 'static> Model
	for HashMap<K, V, S>
{
	fn kind() -> ModelKind {
		ModelKind::Map
	}
}

impl<K: Send + Sync + 'static, V: Send + Sync + 'static> Model for BTreeMap<K, V> {
	fn kind() -> ModelKind {
		ModelKind::Map
	}
}

impl<T: Send + Sync + 'static> Model for Option<T> {
	fn kind() -> ModelKind {
		ModelKind::Optional
	}
}
