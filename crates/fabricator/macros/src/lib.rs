//! Procedural macros for fabricator.
//!
//! This crate provides the `#[derive(Model)]` macro for generating
//! field-accessor tables.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod model_derive;

/// Derives a `Model` implementation for a struct.
///
/// For structs with named fields the generated table lists every `pub`
/// field, in declaration order, and assigns type-erased values to them by
/// name. Private fields are never listed or assigned. Tuple structs, unit
/// structs and enums get a `Model` implementation without fields, which a
/// factory rejects at construction.
///
/// # Attributes
///
/// - `#[fabricate(skip)]` - Hide a public field from overrides
/// - `#[fabricate(rename = "name")]` - Address the field by another name
///
/// # Example
///
/// ```ignore
/// use fabricator::Model;
///
/// #[derive(Default, Model)]
/// pub struct User {
///     pub id: u64,
///
///     #[fabricate(rename = "userName")]
///     pub username: String,
///
///     #[fabricate(skip)]
///     pub password_hash: String,
///
///     created_by: String,
/// }
/// ```
///
/// This generates:
///
/// ```ignore
/// impl fabricator::model::Model for User {
///     fn kind() -> ModelKind {
///         ModelKind::Record
///     }
///
///     fn field_names() -> &'static [&'static str] {
///         &["id", "userName"]
///     }
///
///     fn field(&self, name: &str) -> Option<&dyn Any> {
///         match name {
///             "id" => Some(&self.id as &dyn Any),
///             "userName" => Some(&self.username as &dyn Any),
///             _ => None,
///         }
///     }
///
///     fn set_field(&mut self, name: &str, value: Box<dyn Any + Send>) -> FieldAssignment {
///         match name {
///             "id" => match downcast_value::<u64>(value) {
///                 Ok(value) => {
///                     self.id = value;
///                     FieldAssignment::Applied
///                 }
///                 Err(_) => FieldAssignment::TypeMismatch { expected: type_name::<u64>() },
///             },
///             // ...
///             _ => FieldAssignment::Ignored,
///         }
///     }
/// }
/// ```
#[proc_macro_derive(Model, attributes(fabricate))]
pub fn derive_model(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	model_derive::derive_model_impl(input)
		.unwrap_or_else(|err| err.to_compile_error())
		.into()
}
