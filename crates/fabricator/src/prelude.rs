//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use fabricator::prelude::*;
//! ```

// Error types
pub use crate::error::{FabricatorError, FabricatorResult};

// Model reflection
pub use crate::model::{FieldAssignment, Model, ModelKind};

// Field values
pub use crate::overrides::{FieldValue, Overrides};

// Collaborators
pub use crate::engine::{Engine, FakerEngine, FnEngine, GenerationError, GenerationOptions};
pub use crate::sink::{FnSink, MemorySink, Sink};

// Factory types
pub use crate::config::FactoryConfig;
pub use crate::factory::{Factory, FactoryRegistry, factory_for, register_factory};

// `fake` derive used alongside `Model`
pub use fake::Dummy;

// Re-export the Model derive macro when available
#[cfg(feature = "macros")]
pub use fabricator_macros::Model;
