//! Factory registry for sharing factories across tests.
//!
//! Factories are registered once, typically in a test setup function, and
//! looked up by model type wherever an instance is needed. Sharing one
//! factory keeps its sequence counter global to the process.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::Factory;
use crate::model::Model;

type AnyFactory = Arc<dyn Any + Send + Sync>;

/// Global factory registry, keyed by model type.
static FACTORY_REGISTRY: Lazy<RwLock<HashMap<TypeId, AnyFactory>>> =
	Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a factory for its model type, replacing any previous one.
///
/// Returns the shared handle now held by the registry.
///
/// # Example
///
/// ```ignore
/// register_factory(Factory::new(User::default())?);
///
/// let users = factory_for::<User>().unwrap();
/// let user = users.build()?;
/// ```
pub fn register_factory<T: Model>(factory: Factory<T>) -> Arc<Factory<T>> {
	let factory = Arc::new(factory);
	FACTORY_REGISTRY
		.write()
		.insert(TypeId::of::<T>(), factory.clone());
	tracing::debug!(model = type_name::<T>(), "factory registered");
	factory
}

/// Gets the factory registered for model type `T`.
pub fn factory_for<T: Model>() -> Option<Arc<Factory<T>>> {
	let entry = FACTORY_REGISTRY.read().get(&TypeId::of::<T>()).cloned()?;
	entry.downcast::<Factory<T>>().ok()
}

/// Checks if a factory is registered for model type `T`.
pub fn has_factory<T: Model>() -> bool {
	FACTORY_REGISTRY.read().contains_key(&TypeId::of::<T>())
}

/// Returns the number of registered factories.
pub fn factory_count() -> usize {
	FACTORY_REGISTRY.read().len()
}

/// Clears all registered factories.
///
/// This is primarily useful for testing.
pub fn clear_factories() {
	FACTORY_REGISTRY.write().clear();
}

/// Factory registry handle for scoped operations.
#[derive(Debug, Default)]
pub struct FactoryRegistry;

impl FactoryRegistry {
	/// Creates a new registry handle.
	pub fn new() -> Self {
		Self
	}

	/// Registers a factory for its model type.
	pub fn register<T: Model>(&self, factory: Factory<T>) -> Arc<Factory<T>> {
		register_factory(factory)
	}

	/// Gets the factory for model type `T`.
	pub fn get<T: Model>(&self) -> Option<Arc<Factory<T>>> {
		factory_for::<T>()
	}

	/// Checks if a factory is registered for model type `T`.
	pub fn has<T: Model>(&self) -> bool {
		has_factory::<T>()
	}

	/// Returns the number of registered factories.
	pub fn len(&self) -> usize {
		factory_count()
	}

	/// Returns true if no factories are registered.
	pub fn is_empty(&self) -> bool {
		factory_count() == 0
	}

	/// Clears all factories (primarily for testing).
	pub fn clear(&self) {
		clear_factories();
	}
}
