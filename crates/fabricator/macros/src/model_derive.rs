//! Implementation of the Model derive macro.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, FieldsNamed, Ident, Type, Visibility, parse_quote};

/// A field that appears in the generated accessor table.
struct ModelField {
	ident: Ident,
	ty: Type,
	name: String,
}

/// Options parsed from `#[fabricate(...)]`.
#[derive(Default)]
struct FieldOptions {
	skip: bool,
	rename: Option<String>,
}

pub(crate) fn derive_model_impl(input: DeriveInput) -> syn::Result<TokenStream> {
	let struct_name = &input.ident;

	let body = match &input.data {
		Data::Struct(data_struct) => match &data_struct.fields {
			Fields::Named(fields) => record_body(fields)?,
			Fields::Unnamed(_) | Fields::Unit => kind_body(quote!(Tuple)),
		},
		Data::Enum(_) => kind_body(quote!(Enum)),
		Data::Union(data_union) => {
			return Err(syn::Error::new_spanned(
				data_union.union_token,
				"Model cannot be derived for unions",
			));
		}
	};

	// Model requires Send + Sync + 'static, so every type parameter must too
	let mut generics = input.generics.clone();
	let where_clause = generics.make_where_clause();
	for param in input.generics.type_params() {
		let ident = &param.ident;
		where_clause.predicates.push(parse_quote!(
			#ident: ::core::marker::Send + ::core::marker::Sync + 'static
		));
	}
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	Ok(quote! {
		impl #impl_generics ::fabricator::model::Model for #struct_name #ty_generics #where_clause {
			#body
		}
	})
}

fn kind_body(kind: TokenStream) -> TokenStream {
	quote! {
		fn kind() -> ::fabricator::model::ModelKind {
			::fabricator::model::ModelKind::#kind
		}
	}
}

fn record_body(fields: &FieldsNamed) -> syn::Result<TokenStream> {
	let mut model_fields = Vec::new();
	let mut seen_names = HashSet::new();
	for field in &fields.named {
		// Only public fields are settable from outside the type
		if !matches!(field.vis, Visibility::Public(_)) {
			continue;
		}
		let Some(ident) = field.ident.clone() else {
			continue;
		};

		let options = parse_field_options(&field.attrs)?;
		if options.skip {
			continue;
		}

		let name = options
			.rename
			.unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());
		if !seen_names.insert(name.clone()) {
			return Err(syn::Error::new_spanned(
				field,
				format!("duplicate model field name `{}`", name),
			));
		}
		model_fields.push(ModelField {
			ident,
			ty: field.ty.clone(),
			name,
		});
	}

	let names = model_fields.iter().map(|field| &field.name);
	let getters = model_fields.iter().map(generate_getter_arm);
	let setters = model_fields.iter().map(generate_setter_arm);

	Ok(quote! {
		fn kind() -> ::fabricator::model::ModelKind {
			::fabricator::model::ModelKind::Record
		}

		fn field_names() -> &'static [&'static str] {
			&[#(#names),*]
		}

		fn field(&self, name: &str) -> ::core::option::Option<&dyn ::std::any::Any> {
			match name {
				#(#getters)*
				_ => ::core::option::Option::None,
			}
		}

		fn set_field(
			&mut self,
			name: &str,
			value: ::std::boxed::Box<dyn ::std::any::Any + ::core::marker::Send>,
		) -> ::fabricator::model::FieldAssignment {
			match name {
				#(#setters)*
				_ => {
					let _ = value;
					::fabricator::model::FieldAssignment::Ignored
				}
			}
		}
	})
}

fn generate_getter_arm(field: &ModelField) -> TokenStream {
	let ModelField { ident, name, .. } = field;
	quote! {
		#name => ::core::option::Option::Some(&self.#ident as &dyn ::std::any::Any),
	}
}

fn generate_setter_arm(field: &ModelField) -> TokenStream {
	let ModelField { ident, ty, name } = field;
	quote! {
		#name => match ::fabricator::model::downcast_value::<#ty>(value) {
			::core::result::Result::Ok(value) => {
				self.#ident = value;
				::fabricator::model::FieldAssignment::Applied
			}
			::core::result::Result::Err(_) => ::fabricator::model::FieldAssignment::TypeMismatch {
				expected: ::std::any::type_name::<#ty>(),
			},
		},
	}
}

/// Parse `#[fabricate(skip)]` and `#[fabricate(rename = "...")]`
fn parse_field_options(attrs: &[syn::Attribute]) -> syn::Result<FieldOptions> {
	let mut options = FieldOptions::default();
	for attr in attrs {
		if !attr.path().is_ident("fabricate") {
			continue;
		}
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("skip") {
				options.skip = true;
				Ok(())
			} else if meta.path.is_ident("rename") {
				let value: syn::LitStr = meta.value()?.parse()?;
				options.rename = Some(value.value());
				Ok(())
			} else {
				Err(meta.error("unsupported fabricate attribute, expected `skip` or `rename`"))
			}
		})?;
	}
	Ok(options)
}
