//! Error types for the fabricator crate.
//!
//! Every failure is returned to the immediate caller. Nothing is retried
//! and no partial result accompanies an error.

use thiserror::Error;

use crate::engine::GenerationError;
use crate::model::ModelKind;

/// Errors that can occur while building or persisting fixtures.
#[derive(Debug, Error)]
pub enum FabricatorError {
	/// The exemplar handed to a factory is not a record type.
	#[error("Invalid model kind: {type_name} is a {kind} value, expected a record")]
	InvalidModelKind {
		/// Name of the rejected type.
		type_name: &'static str,
		/// Kind reported for the rejected type.
		kind: ModelKind,
	},

	/// The generation engine could not populate an instance.
	#[error("Generation failure: {0}")]
	GenerationFailure(#[from] GenerationError),

	/// A persistence operation was requested on a factory without a sink.
	#[error("No persistence handler: cannot create instances on a factory without a sink")]
	NoPersistenceHandler,

	/// Malformed call arguments.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// An override produced a value whose type does not match the field.
	#[error("Field type mismatch: {field}: expected {expected}, found {found}")]
	FieldTypeMismatch {
		/// Field that rejected the value.
		field: String,
		/// Declared type of the field.
		expected: &'static str,
		/// Type produced by the override.
		found: &'static str,
	},

	/// The sequence counter cannot advance past its current value.
	#[error("Counter exhausted: cannot build past sequence index {0}")]
	CounterExhausted(u64),

	/// A sink failed to persist one or more instances.
	#[error("Persistence error: {0}")]
	PersistenceError(String),
}

/// Result type alias for fabricator operations.
pub type FabricatorResult<T> = Result<T, FabricatorError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_invalid_model_kind_error() {
		let error = FabricatorError::InvalidModelKind {
			type_name: "i32",
			kind: ModelKind::Scalar,
		};
		assert_eq!(
			error.to_string(),
			"Invalid model kind: i32 is a scalar value, expected a record"
		);
	}

	#[rstest]
	fn test_field_type_mismatch_error() {
		let error = FabricatorError::FieldTypeMismatch {
			field: "id".to_string(),
			expected: "u64",
			found: "alloc::string::String",
		};
		assert_eq!(
			error.to_string(),
			"Field type mismatch: id: expected u64, found alloc::string::String"
		);
	}

	#[rstest]
	fn test_counter_exhausted_error() {
		let error = FabricatorError::CounterExhausted(u64::MAX);
		assert_eq!(
			error.to_string(),
			"Counter exhausted: cannot build past sequence index 18446744073709551615"
		);
	}

	#[rstest]
	fn test_generation_error_from() {
		let error: FabricatorError = GenerationError::new("unsupported field type").into();
		assert!(matches!(error, FabricatorError::GenerationFailure(_)));
		assert_eq!(
			error.to_string(),
			"Generation failure: unsupported field type"
		);
	}
}
