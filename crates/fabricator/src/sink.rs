//! Persistence seam.
//!
//! A [`Sink`] receives built instances from `Factory::create*` and returns
//! whatever it stored. Sinks may transform instances on the way, for
//! example by assigning a primary key; the factory passes the result
//! through untouched.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::FabricatorResult;

/// Persistence capability consumed by a factory.
///
/// # Examples
///
/// ```ignore
/// use fabricator::{FabricatorResult, Sink};
/// use async_trait::async_trait;
///
/// struct UserTable {
///     pool: PgPool,
/// }
///
/// #[async_trait]
/// impl Sink<User> for UserTable {
///     async fn save(&self, user: User) -> FabricatorResult<User> {
///         // INSERT ... RETURNING *
///         todo!()
///     }
///
///     async fn save_many(&self, users: Vec<User>) -> FabricatorResult<Vec<User>> {
///         // One multi-row INSERT
///         todo!()
///     }
/// }
/// ```
#[async_trait]
pub trait Sink<T: Send + 'static>: Send + Sync {
	/// Persists a single instance.
	async fn save(&self, instance: T) -> FabricatorResult<T>;

	/// Persists a batch of instances in one call.
	///
	/// The default implementation saves instances one by one and stops at
	/// the first failure. Override it for true batch writes.
	async fn save_many(&self, instances: Vec<T>) -> FabricatorResult<Vec<T>> {
		let mut saved = Vec::with_capacity(instances.len());
		for instance in instances {
			saved.push(self.save(instance).await?);
		}
		Ok(saved)
	}
}

/// Sink built from a single transform function.
///
/// Batches degenerate to one call per element.
pub struct FnSink<F> {
	function: F,
}

impl<F> FnSink<F> {
	/// Wraps `function` as a sink.
	pub fn new(function: F) -> Self {
		Self { function }
	}
}

#[async_trait]
impl<T, F> Sink<T> for FnSink<F>
where
	T: Send + 'static,
	F: Fn(T) -> FabricatorResult<T> + Send + Sync,
{
	async fn save(&self, instance: T) -> FabricatorResult<T> {
		(self.function)(instance)
	}
}

/// In-memory sink, mainly for tests.
///
/// Keeps a copy of every saved instance and counts calls so tests can check
/// that batches reach the sink as a single write.
pub struct MemorySink<T> {
	records: RwLock<Vec<T>>,
	next_key: AtomicU64,
	key_assigner: Option<fn(&mut T, u64)>,
	save_calls: AtomicUsize,
	save_many_calls: AtomicUsize,
}

impl<T> MemorySink<T> {
	/// Creates an empty sink.
	pub fn new() -> Self {
		Self {
			records: RwLock::new(Vec::new()),
			next_key: AtomicU64::new(1),
			key_assigner: None,
			save_calls: AtomicUsize::new(0),
			save_many_calls: AtomicUsize::new(0),
		}
	}

	/// Assigns a key to every saved instance, starting at 1.
	pub fn with_key_assigner(mut self, assigner: fn(&mut T, u64)) -> Self {
		self.key_assigner = Some(assigner);
		self
	}

	/// Returns the number of stored instances.
	pub fn len(&self) -> usize {
		self.records.read().len()
	}

	/// Returns true if nothing has been stored.
	pub fn is_empty(&self) -> bool {
		self.records.read().is_empty()
	}

	/// Returns the number of `save` calls received.
	pub fn save_calls(&self) -> usize {
		self.save_calls.load(Ordering::SeqCst)
	}

	/// Returns the number of `save_many` calls received.
	pub fn save_many_calls(&self) -> usize {
		self.save_many_calls.load(Ordering::SeqCst)
	}

	/// Removes every stored instance. Key assignment continues where it left off.
	pub fn clear(&self) {
		self.records.write().clear();
	}

	fn assign_key(&self, instance: &mut T) {
		if let Some(assigner) = self.key_assigner {
			let key = self.next_key.fetch_add(1, Ordering::SeqCst);
			assigner(instance, key);
		}
	}
}

impl<T: Clone> MemorySink<T> {
	/// Returns a copy of the stored instances, in save order.
	pub fn records(&self) -> Vec<T> {
		self.records.read().clone()
	}
}

impl<T> Default for MemorySink<T> {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl<T> Sink<T> for MemorySink<T>
where
	T: Clone + Send + Sync + 'static,
{
	async fn save(&self, mut instance: T) -> FabricatorResult<T> {
		self.save_calls.fetch_add(1, Ordering::SeqCst);
		self.assign_key(&mut instance);
		self.records.write().push(instance.clone());
		Ok(instance)
	}

	async fn save_many(&self, mut instances: Vec<T>) -> FabricatorResult<Vec<T>> {
		self.save_many_calls.fetch_add(1, Ordering::SeqCst);
		let mut records = self.records.write();
		for instance in instances.iter_mut() {
			self.assign_key(instance);
			records.push(instance.clone());
		}
		Ok(instances)
	}
}
