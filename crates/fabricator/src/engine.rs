//! Generation engine seam.
//!
//! A factory hands every freshly allocated instance to an [`Engine`], which
//! fills each field with plausible synthetic data. The default
//! [`FakerEngine`] delegates to the `fake` crate, so field-level generation
//! hints are `fake`'s `#[dummy(...)]` attributes.
//!
//! # Example
//!
//! ```ignore
//! use fabricator::prelude::*;
//!
//! #[derive(Debug, Clone, Default, Model, Dummy)]
//! pub struct Pet {
//!     #[dummy(faker = "fake::faker::name::en::FirstName()")]
//!     pub name: String,
//!     pub age: u8,
//! }
//!
//! let options = GenerationOptions::new().with_seed(7);
//! let mut pet = Pet::default();
//! FakerEngine::new().populate(&mut pet, &options)?;
//! ```

use std::collections::BTreeMap;

use fake::{Dummy, Faker};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a generation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GenerationError {
	message: String,
}

impl GenerationError {
	/// Creates a new generation error with a diagnostic message.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	/// Returns the engine's diagnostic message.
	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Engine-specific configuration handed to every populate call.
///
/// # Example
///
/// ```
/// use fabricator::GenerationOptions;
///
/// let options: GenerationOptions =
///     serde_json::from_str(r#"{"seed": 42, "settings": {"locale": "en"}}"#).unwrap();
/// assert_eq!(options.seed, Some(42));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
	/// Seed for the engine's random source. `None` seeds from entropy.
	#[serde(default)]
	pub seed: Option<u64>,

	/// Free-form settings interpreted by custom engines.
	#[serde(default)]
	pub settings: BTreeMap<String, serde_json::Value>,
}

impl GenerationOptions {
	/// Creates default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the random seed.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Adds an engine-specific setting.
	pub fn with_setting(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
		self.settings.insert(name.into(), value);
		self
	}

	/// Returns an engine-specific setting.
	pub fn setting(&self, name: &str) -> Option<&serde_json::Value> {
		self.settings.get(name)
	}
}

/// Populates instances of `T` with synthetic data.
pub trait Engine<T>: Send + Sync {
	/// Fills every settable field of `instance`.
	///
	/// # Errors
	///
	/// Returns an error if a field type is unsupported or a generation hint
	/// is malformed.
	fn populate(&self, instance: &mut T, options: &GenerationOptions)
	-> Result<(), GenerationError>;
}

/// Engine backed by `fake`'s `Dummy<Faker>` implementations.
///
/// The random source is created on first use, from
/// [`GenerationOptions::seed`] when one is set, and then shared by every
/// subsequent call.
#[derive(Debug, Default)]
pub struct FakerEngine {
	rng: OnceCell<Mutex<StdRng>>,
}

impl FakerEngine {
	/// Creates an engine whose random source is not yet seeded.
	pub fn new() -> Self {
		Self::default()
	}

	fn rng(&self, options: &GenerationOptions) -> &Mutex<StdRng> {
		self.rng.get_or_init(|| {
			let rng = match options.seed {
				Some(seed) => StdRng::seed_from_u64(seed),
				None => StdRng::from_entropy(),
			};
			Mutex::new(rng)
		})
	}
}

impl<T> Engine<T> for FakerEngine
where
	T: Dummy<Faker>,
{
	fn populate(
		&self,
		instance: &mut T,
		options: &GenerationOptions,
	) -> Result<(), GenerationError> {
		let mut rng = self.rng(options).lock();
		*instance = T::dummy_with_rng(&Faker, &mut *rng);
		Ok(())
	}
}

/// Engine built from a closure.
///
/// Useful for models that do not implement `Dummy`, or to inject failures.
pub struct FnEngine<F> {
	function: F,
}

impl<F> FnEngine<F> {
	/// Wraps `function` as an engine.
	pub fn new(function: F) -> Self {
		Self { function }
	}
}

impl<T, F> Engine<T> for FnEngine<F>
where
	F: Fn(&mut T, &GenerationOptions) -> Result<(), GenerationError> + Send + Sync,
{
	fn populate(
		&self,
		instance: &mut T,
		options: &GenerationOptions,
	) -> Result<(), GenerationError> {
		(self.function)(instance, options)
	}
}
