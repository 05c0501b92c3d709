//! Factory configuration.

use std::fmt;
use std::sync::Arc;

use crate::engine::GenerationOptions;
use crate::overrides::{FieldValue, Overrides};
use crate::sink::Sink;

/// Configuration applied when constructing a `Factory`.
///
/// # Example
///
/// ```ignore
/// let config = FactoryConfig::new()
///     .with_default("first_name", "Moishe")
///     .with_generated_default("id", |index, _| index + 1)
///     .with_sink(MemorySink::new())
///     .with_seed(42);
/// let factory = Factory::with_config(Person::default(), config)?;
/// ```
pub struct FactoryConfig<T: Send + 'static> {
	/// Values applied over generated data on every build.
	pub defaults: Overrides,

	/// Persistence capability used by the `create*` operations.
	pub sink: Option<Arc<dyn Sink<T>>>,

	/// Options handed to the generation engine.
	pub generation: GenerationOptions,
}

impl<T: Send + 'static> FactoryConfig<T> {
	/// Creates an empty configuration.
	pub fn new() -> Self {
		Self {
			defaults: Overrides::new(),
			sink: None,
			generation: GenerationOptions::default(),
		}
	}

	/// Replaces the defaults map.
	pub fn with_defaults(mut self, defaults: Overrides) -> Self {
		self.defaults = defaults;
		self
	}

	/// Adds a literal default for a field.
	pub fn with_default<V>(mut self, field: impl Into<String>, value: V) -> Self
	where
		V: Clone + Send + Sync + 'static,
	{
		self.defaults = self.defaults.insert(field, FieldValue::literal(value));
		self
	}

	/// Adds a generator default for a field.
	pub fn with_generated_default<V, F>(mut self, field: impl Into<String>, function: F) -> Self
	where
		V: Send + 'static,
		F: Fn(u64, &str) -> V + Send + Sync + 'static,
	{
		self.defaults = self.defaults.insert(field, FieldValue::generator(function));
		self
	}

	/// Sets the persistence sink.
	pub fn with_sink(mut self, sink: impl Sink<T> + 'static) -> Self {
		self.sink = Some(Arc::new(sink));
		self
	}

	/// Sets a shared persistence sink.
	pub fn with_shared_sink(mut self, sink: Arc<dyn Sink<T>>) -> Self {
		self.sink = Some(sink);
		self
	}

	/// Replaces the generation options.
	pub fn with_generation_options(mut self, options: GenerationOptions) -> Self {
		self.generation = options;
		self
	}

	/// Sets the generation engine's random seed.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.generation = self.generation.with_seed(seed);
		self
	}
}

impl<T: Send + 'static> Default for FactoryConfig<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Send + 'static> fmt::Debug for FactoryConfig<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FactoryConfig")
			.field("defaults", &self.defaults)
			.field("sink", &self.sink.as_ref().map(|_| "Sink"))
			.field("generation", &self.generation)
			.finish()
	}
}
