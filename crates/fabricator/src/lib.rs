//! Randomized test fixtures for record types.
//!
//! This crate builds fully populated instances of your structs for tests,
//! seeding and prototyping:
//!
//! - **Generation**: every field starts out with synthetic data from the
//!   `fake` crate (or a custom [`Engine`])
//! - **Defaults and overrides**: factory-wide defaults and per-call
//!   overrides replace generated values field by field
//! - **Sequences**: generator functions receive a per-factory build index
//!   for unique, deterministic values
//! - **Persistence**: `create*` operations hand built instances to a [`Sink`]
//!
//! # Features
//!
//! - `macros` - `#[derive(Model)]` support (enabled by default)
//!
//! # Quick Start
//!
//! ```ignore
//! use fabricator::prelude::*;
//!
//! #[derive(Debug, Clone, Default, Model, Dummy)]
//! pub struct Person {
//!     pub id: u64,
//!     pub first_name: String,
//!     pub last_name: String,
//! }
//!
//! let factory = Factory::with_config(
//!     Person::default(),
//!     FactoryConfig::new()
//!         .with_default("first_name", "Moishe")
//!         .with_default("last_name", "Zuchmir")
//!         .with_generated_default("id", |index, _| index + 1),
//! )?;
//!
//! let person = factory.build()?;
//! assert_eq!(person.first_name, "Moishe");
//! assert_eq!(person.id, 1);
//!
//! let katz = factory.build_with(&Overrides::new().set("last_name", "Katz"))?;
//! assert_eq!(katz.last_name, "Katz");
//! ```
//!
//! # Persistence
//!
//! ```ignore
//! let sink = MemorySink::new().with_key_assigner(|person: &mut Person, key| person.id = key);
//! let factory = Factory::with_config(Person::default(), FactoryConfig::new().with_sink(sink))?;
//!
//! let saved = factory.create().await?;
//! let many = factory.create_batch(10).await?; // one save_many call
//! ```
//!
//! # Architecture
//!
//! - [`Model`](model::Model) - field-accessor table, usually derived
//! - [`FieldValue`](overrides::FieldValue) / [`Overrides`](overrides::Overrides) -
//!   literal or generated field values
//! - [`Engine`](engine::Engine) - synthetic data source
//! - [`Sink`](sink::Sink) - persistence capability
//! - [`Factory`](factory::Factory) - the build pipeline and sequence counter

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod factory;
pub mod model;
pub mod overrides;
pub mod prelude;
pub mod sink;

// Re-export commonly used types at crate root
pub use config::FactoryConfig;
pub use engine::{Engine, FakerEngine, FnEngine, GenerationError, GenerationOptions};
pub use error::{FabricatorError, FabricatorResult};
pub use factory::{Factory, FactoryRegistry, factory_for, register_factory};
pub use model::{FieldAssignment, Model, ModelKind};
pub use overrides::{FieldValue, Overrides};
pub use sink::{FnSink, MemorySink, Sink};

// Re-export derive macro when available
#[cfg(feature = "macros")]
pub use fabricator_macros::Model;
