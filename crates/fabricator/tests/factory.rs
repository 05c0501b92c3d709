//! Build, batch and override behavior of derived models.

use fabricator::prelude::*;
use rstest::{fixture, rstest};

#[derive(Debug, Clone, Default, PartialEq, Model, Dummy)]
pub struct Pet {
	pub name: String,
	pub species: String,
	#[dummy(faker = "1..20")]
	pub age: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Model, Dummy)]
pub struct Person {
	pub id: u64,
	pub first_name: String,
	pub last_name: String,
	pub pets: Vec<Pet>,
	pub favorite_pet: Pet,
}

#[derive(Debug, Clone, Default, PartialEq, Model, Dummy)]
pub struct Account {
	pub email: String,
	#[fabricate(skip)]
	pub password_hash: String,
	#[fabricate(rename = "Nickname")]
	pub nickname: String,
	internal_note: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Model)]
pub enum Status {
	#[default]
	Active,
	Inactive,
}

#[fixture]
fn people() -> Factory<Person> {
	Factory::with_config(
		Person::default(),
		FactoryConfig::new()
			.with_default("first_name", "Moishe")
			.with_default("last_name", "Zuchmir"),
	)
	.unwrap()
}

fn seeded<T>(seed: u64) -> Factory<T>
where
	T: Model + Default + Dummy<fake::Faker>,
{
	Factory::with_config(T::default(), FactoryConfig::new().with_seed(seed)).unwrap()
}

#[rstest]
fn test_new_accepts_records() {
	assert!(Factory::new(Person::default()).is_ok());
	assert!(Factory::new(Pet::default()).is_ok());
}

#[rstest]
fn test_new_rejects_non_records() {
	assert!(matches!(
		Factory::new(100_i64),
		Err(FabricatorError::InvalidModelKind {
			kind: ModelKind::Scalar,
			..
		})
	));
	assert!(matches!(
		Factory::new(vec![Pet::default()]),
		Err(FabricatorError::InvalidModelKind {
			kind: ModelKind::Sequence,
			..
		})
	));
	let keep_status = FnEngine::new(
		|_: &mut Status, _: &GenerationOptions| -> Result<(), GenerationError> { Ok(()) },
	);
	assert!(matches!(
		Factory::with_engine(Status::Active, keep_status, FactoryConfig::new()),
		Err(FabricatorError::InvalidModelKind {
			kind: ModelKind::Enum,
			..
		})
	));
}

#[rstest]
fn test_build_populates_every_field() {
	let factory = Factory::new(Person::default()).unwrap();
	let person = factory.build().unwrap();

	assert_ne!(person.id, 0);
	assert!(!person.first_name.is_empty());
	assert!(!person.last_name.is_empty());
	assert!(!person.favorite_pet.name.is_empty());
	assert!(!person.favorite_pet.species.is_empty());
	assert!(person.pets.iter().all(|pet| !pet.name.is_empty()));
}

#[rstest]
fn test_generation_hints_are_respected() {
	let factory = seeded::<Pet>(11);
	for pet in factory.batch(20).unwrap() {
		assert!((1..20).contains(&pet.age));
	}
}

#[rstest]
fn test_defaults_apply_to_build(people: Factory<Person>) {
	let person = people.build().unwrap();

	assert_eq!(person.first_name, "Moishe");
	assert_eq!(person.last_name, "Zuchmir");
	assert_ne!(person.id, 0);
}

#[rstest]
fn test_call_time_override_wins(people: Factory<Person>) {
	let person = people
		.build_with(&Overrides::new().set("last_name", "Katz"))
		.unwrap();

	assert_eq!(person.first_name, "Moishe");
	assert_eq!(person.last_name, "Katz");
}

#[rstest]
fn test_generator_override_wins_over_literal_default() {
	let factory = Factory::with_config(
		Person::default(),
		FactoryConfig::new().with_default("id", 7_u64),
	)
	.unwrap();

	let person = factory
		.build_with(&Overrides::new().generate("id", |index, _| index + 100))
		.unwrap();
	assert_eq!(person.id, 100);
}

#[rstest]
fn test_nested_override_replaces_whole_value(people: Factory<Person>) {
	let rex = Pet {
		name: "Rex".to_string(),
		species: "dog".to_string(),
		age: 3,
	};
	let person = people
		.build_with(
			&Overrides::new()
				.set("favorite_pet", rex.clone())
				.set("pets", Vec::<Pet>::new()),
		)
		.unwrap();

	assert_eq!(person.favorite_pet, rex);
	assert!(person.pets.is_empty());
}

#[rstest]
fn test_unknown_field_is_ignored() {
	let plain = seeded::<Person>(2024).build().unwrap();
	let overridden = seeded::<Person>(2024)
		.build_with(&Overrides::new().set("no_such_field", "x"))
		.unwrap();

	assert_eq!(plain, overridden);
}

#[rstest]
fn test_non_settable_fields_are_ignored() {
	let plain = seeded::<Account>(5).build().unwrap();
	let overridden = seeded::<Account>(5)
		.build_with(
			&Overrides::new()
				.set("password_hash", "hunter2")
				.set("internal_note", "secret")
				.set("nickname", "not the field name"),
		)
		.unwrap();

	assert_eq!(plain, overridden);
}

#[rstest]
fn test_renamed_field_is_settable() {
	let factory = Factory::new(Account::default()).unwrap();
	let account = factory
		.build_with(&Overrides::new().set("Nickname", "moish"))
		.unwrap();

	assert_eq!(account.nickname, "moish");
	assert_eq!(Account::field_names(), &["email", "Nickname"]);
}

#[rstest]
fn test_type_mismatch_is_reported(people: Factory<Person>) {
	let result = people.build_with(&Overrides::new().set("id", "one"));

	match result {
		Err(FabricatorError::FieldTypeMismatch {
			field,
			expected,
			found,
		}) => {
			assert_eq!(field, "id");
			assert_eq!(expected, "u64");
			assert_eq!(found, "&str");
		}
		other => panic!("expected a type mismatch, got {:?}", other),
	}
}

#[rstest]
fn test_sequence_default_over_batch() {
	let factory = Factory::with_config(
		Person::default(),
		FactoryConfig::new().with_generated_default("id", |index, _| index + 1),
	)
	.unwrap();

	let ids: Vec<u64> = factory
		.batch(5)
		.unwrap()
		.into_iter()
		.map(|person| person.id)
		.collect();

	assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[rstest]
fn test_batch_indexed_overrides(people: Factory<Person>) {
	let overrides = vec![
		Overrides::new().set("last_name", "Katz"),
		Overrides::new(),
		Overrides::new().set("first_name", "Rivka"),
	];

	let batch = people.batch_indexed(4, &overrides).unwrap();

	assert_eq!(batch.len(), 4);
	assert_eq!(batch[0].last_name, "Katz");
	assert_eq!(batch[1].last_name, "Zuchmir");
	assert_eq!(batch[2].first_name, "Rivka");
	assert_eq!(batch[2].last_name, "Zuchmir");
	assert_eq!(batch[3].first_name, "Moishe");
}

#[rstest]
fn test_batch_with_shared_overrides(people: Factory<Person>) {
	let batch = people
		.batch_with(3, &Overrides::new().set("last_name", "Katz"))
		.unwrap();

	assert!(
		batch
			.iter()
			.all(|person| person.first_name == "Moishe" && person.last_name == "Katz")
	);
}

#[rstest]
fn test_empty_batch(people: Factory<Person>) {
	assert!(people.batch(0).unwrap().is_empty());
	assert_eq!(people.counter(), 0);
}

#[rstest]
fn test_counter_law(people: Factory<Person>) {
	assert_eq!(people.counter(), 0);

	people.build().unwrap();
	people.build().unwrap();
	people.batch(3).unwrap();
	assert_eq!(people.counter(), 5);

	people.reset_counter();
	assert_eq!(people.counter(), 0);

	people.set_counter(1_000);
	assert_eq!(people.counter(), 1_000);
}

#[rstest]
fn test_set_counter_controls_sequence() {
	let factory = Factory::with_config(
		Person::default(),
		FactoryConfig::new().with_generated_default("id", |index, _| index),
	)
	.unwrap();

	factory.set_counter(500);
	let ids: Vec<u64> = factory
		.batch(3)
		.unwrap()
		.iter()
		.map(|person| person.id)
		.collect();

	assert_eq!(ids, vec![500, 501, 502]);
}

#[rstest]
fn test_custom_engine() {
	let engine = FnEngine::new(
		|person: &mut Person, options: &GenerationOptions| -> Result<(), GenerationError> {
			person.id = options.seed.unwrap_or_default();
			person.first_name = "Generated".to_string();
			Ok(())
		},
	);
	let factory = Factory::with_engine(
		Person::default(),
		engine,
		FactoryConfig::new().with_seed(77),
	)
	.unwrap();

	let person = factory.build().unwrap();
	assert_eq!(person.id, 77);
	assert_eq!(person.first_name, "Generated");
}

#[rstest]
fn test_field_accessors_on_derived_model() {
	let mut person = Person::default();

	assert_eq!(
		person.set_field("first_name", Box::new("Moishe")),
		FieldAssignment::Applied
	);
	assert_eq!(
		person.field("first_name").and_then(|v| v.downcast_ref::<String>()),
		Some(&"Moishe".to_string())
	);
	assert_eq!(
		Person::field_names(),
		&["id", "first_name", "last_name", "pets", "favorite_pet"]
	);
}
