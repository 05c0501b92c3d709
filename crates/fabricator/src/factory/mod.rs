//! Factory: layered field resolution, batches, sequences and persistence.
//!
//! Building an instance runs through three layers, lowest to highest:
//!
//! 1. the generation engine fills every field with synthetic data,
//! 2. the factory's defaults are applied,
//! 3. the call-time overrides are applied.
//!
//! A higher layer replaces the lower layer's value for a field entirely.
//! Names that are not settable fields of the model are skipped.
//!
//! # Example
//!
//! ```ignore
//! use fabricator::prelude::*;
//!
//! let factory = Factory::with_config(
//!     Person::default(),
//!     FactoryConfig::new()
//!         .with_default("first_name", "Moishe")
//!         .with_default("last_name", "Zuchmir"),
//! )?;
//!
//! let moishe = factory.build()?;
//! let katz = factory.build_with(&Overrides::new().set("last_name", "Katz"))?;
//! let people = factory.batch(10)?;
//! ```

pub mod registry;

pub use registry::{
	FactoryRegistry, clear_factories, factory_count, factory_for, has_factory, register_factory,
};

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use fake::{Dummy, Faker};
use parking_lot::Mutex;

use crate::config::FactoryConfig;
use crate::engine::{Engine, FakerEngine, GenerationOptions};
use crate::error::{FabricatorError, FabricatorResult};
use crate::model::{FieldAssignment, Model};
use crate::overrides::Overrides;
use crate::sink::Sink;

/// Builds randomized instances of a record type.
///
/// A factory is safe to share between threads. Its only mutable state is
/// the sequence counter, which counts completed builds.
pub struct Factory<T: Model> {
	exemplar: T,
	engine: Arc<dyn Engine<T>>,
	defaults: Overrides,
	sink: Option<Arc<dyn Sink<T>>>,
	generation: GenerationOptions,
	counter: Mutex<u64>,
}

impl<T> Factory<T>
where
	T: Model + Default + Dummy<Faker>,
{
	/// Creates a factory with the `fake`-backed engine and no configuration.
	///
	/// # Errors
	///
	/// Returns [`FabricatorError::InvalidModelKind`] if `T` is not a record.
	pub fn new(exemplar: T) -> FabricatorResult<Self> {
		Self::with_config(exemplar, FactoryConfig::new())
	}

	/// Creates a factory with the `fake`-backed engine.
	///
	/// # Errors
	///
	/// Returns [`FabricatorError::InvalidModelKind`] if `T` is not a record.
	pub fn with_config(exemplar: T, config: FactoryConfig<T>) -> FabricatorResult<Self> {
		Self::with_engine(exemplar, FakerEngine::new(), config)
	}
}

impl<T> Factory<T>
where
	T: Model + Default,
{
	/// Creates a factory with a custom generation engine.
	///
	/// The engine and sink are stored but not invoked.
	///
	/// # Errors
	///
	/// Returns [`FabricatorError::InvalidModelKind`] if `T` is not a record.
	pub fn with_engine(
		exemplar: T,
		engine: impl Engine<T> + 'static,
		config: FactoryConfig<T>,
	) -> FabricatorResult<Self> {
		let kind = T::kind();
		if !kind.is_record() {
			return Err(FabricatorError::InvalidModelKind {
				type_name: type_name::<T>(),
				kind,
			});
		}

		tracing::debug!(
			model = type_name::<T>(),
			fields = T::field_names().len(),
			defaults = config.defaults.len(),
			has_sink = config.sink.is_some(),
			"factory constructed"
		);

		Ok(Self {
			exemplar,
			engine: Arc::new(engine),
			defaults: config.defaults,
			sink: config.sink,
			generation: config.generation,
			counter: Mutex::new(0),
		})
	}

	/// Builds one instance with the factory defaults only.
	pub fn build(&self) -> FabricatorResult<T> {
		self.build_with(&Overrides::new())
	}

	/// Builds one instance, applying `overrides` over the defaults.
	///
	/// Generator functions observe the number of builds completed before
	/// this one. The counter lock is held while they run, so they must not
	/// call back into this factory.
	///
	/// # Errors
	///
	/// Returns [`FabricatorError::GenerationFailure`] if the engine fails,
	/// [`FabricatorError::FieldTypeMismatch`] if a resolved value does not fit
	/// its field and [`FabricatorError::CounterExhausted`] if the counter is
	/// already at `u64::MAX`. The counter is not advanced on failure.
	pub fn build_with(&self, overrides: &Overrides) -> FabricatorResult<T> {
		let mut instance = T::default();
		self.engine.populate(&mut instance, &self.generation)?;

		let mut counter = self.counter.lock();
		let index = *counter;
		let next = index
			.checked_add(1)
			.ok_or(FabricatorError::CounterExhausted(index))?;
		apply_layer(&mut instance, &self.defaults, index)?;
		apply_layer(&mut instance, overrides, index)?;
		*counter = next;

		Ok(instance)
	}

	/// Builds `size` instances with the factory defaults only.
	pub fn batch(&self, size: usize) -> FabricatorResult<Vec<T>> {
		self.batch_indexed(size, &[])
	}

	/// Builds `size` instances, applying the same `overrides` to each.
	pub fn batch_with(&self, size: usize, overrides: &Overrides) -> FabricatorResult<Vec<T>> {
		(0..size).map(|_| self.build_with(overrides)).collect()
	}

	/// Builds `size` instances, applying `overrides_per_index[i]` to element `i`.
	///
	/// Elements without a matching entry get no call-time overrides and
	/// entries past `size` are never read. Builds run sequentially, so the
	/// counter values a batch consumes are contiguous and increase with the
	/// index.
	pub fn batch_indexed(
		&self,
		size: usize,
		overrides_per_index: &[Overrides],
	) -> FabricatorResult<Vec<T>> {
		let empty = Overrides::new();
		(0..size)
			.map(|index| self.build_with(overrides_per_index.get(index).unwrap_or(&empty)))
			.collect()
	}

	/// Builds one instance and saves it through the sink.
	///
	/// # Errors
	///
	/// Returns [`FabricatorError::NoPersistenceHandler`] before building
	/// anything if no sink is configured. Sink errors are returned unchanged.
	pub async fn create(&self) -> FabricatorResult<T> {
		self.create_with(&Overrides::new()).await
	}

	/// Builds one instance with `overrides` and saves it through the sink.
	pub async fn create_with(&self, overrides: &Overrides) -> FabricatorResult<T> {
		let sink = self.sink()?;
		let instance = self.build_with(overrides)?;

		tracing::debug!(model = type_name::<T>(), "saving instance");
		sink.save(instance).await
	}

	/// Builds `size` instances and saves them with a single batch call.
	pub async fn create_batch(&self, size: usize) -> FabricatorResult<Vec<T>> {
		self.create_batch_indexed(size, &[]).await
	}

	/// Builds `size` instances with the same `overrides` and saves them in one call.
	pub async fn create_batch_with(
		&self,
		size: usize,
		overrides: &Overrides,
	) -> FabricatorResult<Vec<T>> {
		let sink = self.sink()?;
		let instances = self.batch_with(size, overrides)?;

		tracing::debug!(model = type_name::<T>(), count = size, "saving batch");
		sink.save_many(instances).await
	}

	/// Builds `size` instances with per-index overrides and saves them in one call.
	pub async fn create_batch_indexed(
		&self,
		size: usize,
		overrides_per_index: &[Overrides],
	) -> FabricatorResult<Vec<T>> {
		let sink = self.sink()?;
		let instances = self.batch_indexed(size, overrides_per_index)?;

		tracing::debug!(model = type_name::<T>(), count = size, "saving batch");
		sink.save_many(instances).await
	}
}

impl<T: Model> Factory<T> {
	/// Returns the number of completed builds.
	pub fn counter(&self) -> u64 {
		*self.counter.lock()
	}

	/// Forces the counter to `value`.
	pub fn set_counter(&self, value: u64) {
		*self.counter.lock() = value;
	}

	/// Resets the counter to zero.
	pub fn reset_counter(&self) {
		self.set_counter(0);
	}

	/// Returns the exemplar the factory was constructed from.
	pub fn exemplar(&self) -> &T {
		&self.exemplar
	}

	/// Returns the factory defaults.
	pub fn defaults(&self) -> &Overrides {
		&self.defaults
	}

	/// Returns the options handed to the generation engine.
	pub fn generation_options(&self) -> &GenerationOptions {
		&self.generation
	}

	/// Returns true if a sink is configured.
	pub fn has_sink(&self) -> bool {
		self.sink.is_some()
	}

	fn sink(&self) -> FabricatorResult<&Arc<dyn Sink<T>>> {
		self.sink
			.as_ref()
			.ok_or(FabricatorError::NoPersistenceHandler)
	}
}

impl<T: Model> fmt::Debug for Factory<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Factory")
			.field("model", &type_name::<T>())
			.field("defaults", &self.defaults)
			.field("has_sink", &self.sink.is_some())
			.field("generation", &self.generation)
			.field("counter", &self.counter())
			.finish()
	}
}

/// Applies one override layer to `instance`.
fn apply_layer<T: Model>(instance: &mut T, layer: &Overrides, index: u64) -> FabricatorResult<()> {
	for (field, value) in layer {
		if !T::has_field(field) {
			tracing::trace!(model = type_name::<T>(), field = %field, "ignoring unknown field");
			continue;
		}

		match instance.set_field(field, value.resolve(index, field)) {
			FieldAssignment::Applied => {}
			FieldAssignment::Ignored => {
				tracing::trace!(model = type_name::<T>(), field = %field, "field not settable");
			}
			FieldAssignment::TypeMismatch { expected } => {
				return Err(FabricatorError::FieldTypeMismatch {
					field: field.clone(),
					expected,
					found: value.type_name(),
				});
			}
		}
	}
	Ok(())
}
