use std::{cmp::Ordering, collections::BTreeMap};

use serde_json::{Map, Value};
use url::Url;

use crate::{jsonld::prefixed, jsonld::ACTIVITYSTREAMS, AliasMap, Member, ModelError, PropertyDef, Registry};

use super::{PropertyValue, Slot};

/// ordered values of one property on one entity
#[derive(Debug, Clone)]
pub struct PropertyCollection {
	def: &'static PropertyDef,
	alias: String,
	values: Vec<PropertyValue>,
}

impl PartialEq for PropertyCollection {
	fn eq(&self, other: &Self) -> bool {
		self.def.name == other.def.name && self.alias == other.alias && self.values == other.values
	}
}

impl PropertyCollection {
	pub fn new(def: &'static PropertyDef) -> Self {
		Self::with_alias(def, "")
	}

	pub fn with_alias(def: &'static PropertyDef, alias: impl Into<String>) -> Self {
		PropertyCollection { def, alias: alias.into(), values: Vec::new() }
	}

	pub(crate) fn from_iri(def: &'static PropertyDef, alias: impl Into<String>, iri: Url) -> Self {
		let alias = alias.into();
		let values = vec![PropertyValue::attached(def, &alias, Slot::iri(iri), 0)];
		PropertyCollection { def, alias, values }
	}

	/// read this property off a raw object, looking it up under its aliased key
	///
	/// returns None when the key is absent. lists are split into values unless the property is
	/// functional, in which case the whole raw value is read as one
	pub fn deserialize(
		def: &'static PropertyDef,
		object: &Map<String, Value>,
		aliases: &AliasMap,
		registry: &Registry,
	) -> Option<Self> {
		let alias = aliases.activitystreams();
		let raw = object.get(&*prefixed(alias, def.name))?;
		let mut collection = Self::with_alias(def, alias);
		match raw {
			Value::Array(items) if !def.functional => {
				for item in items {
					collection.values.push(PropertyValue::deserialize(def, item, aliases, registry));
				}
			},
			_ => collection.values.push(PropertyValue::deserialize(def, raw, aliases, registry)),
		}
		collection.renumber(0);
		Some(collection)
	}

	pub fn name(&self) -> &'static str {
		self.def.name
	}

	pub fn def(&self) -> &'static PropertyDef {
		self.def
	}

	pub fn alias(&self) -> &str {
		&self.alias
	}

	/// json key this property is written under
	pub fn key(&self) -> String {
		prefixed(&self.alias, self.def.name).into_owned()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	fn check_bounds(&self, index: usize, op: &str) {
		assert!(
			index < self.values.len(),
			"{op}: index {index} out of bounds for property '{}' with {} values",
			self.def.name,
			self.values.len(),
		);
	}

	/// panics if `index` is out of bounds
	pub fn at(&self, index: usize) -> &PropertyValue {
		self.check_bounds(index, "at");
		&self.values[index]
	}

	/// panics if `index` is out of bounds
	pub fn at_mut(&mut self, index: usize) -> &mut PropertyValue {
		self.check_bounds(index, "at_mut");
		&mut self.values[index]
	}

	pub fn iter(&self) -> std::slice::Iter<'_, PropertyValue> {
		self.values.iter()
	}

	pub fn first(&self) -> Option<&PropertyValue> {
		self.values.first()
	}

	pub fn begin(&self) -> Option<Cursor<'_>> {
		self.cursor(0)
	}

	pub fn end(&self) -> Option<Cursor<'_>> {
		self.values.len().checked_sub(1).and_then(|i| self.cursor(i))
	}

	pub fn cursor(&self, index: usize) -> Option<Cursor<'_>> {
		(index < self.values.len()).then_some(Cursor { parent: self, index })
	}

	/// sibling following `value`, found through its stored index
	///
	/// values obtained before a prepend, insert or remove keep their old index and may land on a
	/// different sibling
	pub fn next_of(&self, value: &PropertyValue) -> Option<&PropertyValue> {
		self.values.get(value.index()? + 1)
	}

	/// sibling preceding `value`, found through its stored index
	pub fn prev_of(&self, value: &PropertyValue) -> Option<&PropertyValue> {
		self.values.get(value.index()?.checked_sub(1)?)
	}

	fn member_slot(&self, member: Member) -> Result<Slot, ModelError> {
		let kind = member.kind();
		if !self.def.allows(kind) {
			return Err(ModelError::KindNotAllowed { property: self.def.name, kind });
		}
		Ok(Slot::Member(member))
	}

	fn place(&mut self, index: usize, slot: Slot) -> Result<(), ModelError> {
		if self.def.functional && !self.values.is_empty() {
			return Err(ModelError::FunctionalOverflow(self.def.name));
		}
		assert!(
			index <= self.values.len(),
			"insert: index {index} out of bounds for property '{}' with {} values",
			self.def.name,
			self.values.len(),
		);
		self.values.insert(index, PropertyValue::attached(self.def, &self.alias, slot, index));
		self.renumber(index + 1);
		Ok(())
	}

	pub fn append(&mut self, member: impl Into<Member>) -> Result<(), ModelError> {
		let slot = self.member_slot(member.into())?;
		self.place(self.values.len(), slot)
	}

	pub fn prepend(&mut self, member: impl Into<Member>) -> Result<(), ModelError> {
		let slot = self.member_slot(member.into())?;
		self.place(0, slot)
	}

	/// panics if `index` is greater than the length
	pub fn insert(&mut self, index: usize, member: impl Into<Member>) -> Result<(), ModelError> {
		let slot = self.member_slot(member.into())?;
		self.place(index, slot)
	}

	/// replace the value at `index`, panics if out of bounds
	pub fn set(&mut self, index: usize, member: impl Into<Member>) -> Result<(), ModelError> {
		self.check_bounds(index, "set");
		let slot = self.member_slot(member.into())?;
		self.values[index] = PropertyValue::attached(self.def, &self.alias, slot, index);
		Ok(())
	}

	pub fn append_iri(&mut self, iri: Url) -> Result<(), ModelError> {
		self.place(self.values.len(), Slot::iri(iri))
	}

	pub fn prepend_iri(&mut self, iri: Url) -> Result<(), ModelError> {
		self.place(0, Slot::iri(iri))
	}

	pub fn insert_iri(&mut self, index: usize, iri: Url) -> Result<(), ModelError> {
		self.place(index, Slot::iri(iri))
	}

	pub fn set_iri(&mut self, index: usize, iri: Url) {
		self.check_bounds(index, "set_iri");
		self.values[index] = PropertyValue::attached(self.def, &self.alias, Slot::iri(iri), index);
	}

	/// detach and return the value at `index`, panics if out of bounds
	pub fn remove(&mut self, index: usize) -> PropertyValue {
		self.check_bounds(index, "remove");
		let mut value = self.values.remove(index);
		value.set_index(None);
		self.renumber(index);
		value
	}

	pub fn swap(&mut self, i: usize, j: usize) {
		self.check_bounds(i, "swap");
		self.check_bounds(j, "swap");
		self.values.swap(i, j);
		self.values[i].set_index(Some(i));
		self.values[j].set_index(Some(j));
	}

	pub fn kind_index(&self, index: usize) -> i32 {
		self.at(index).kind_index()
	}

	pub fn less(&self, i: usize, j: usize) -> bool {
		self.at(i).less_than(self.at(j))
	}

	/// stable sort by value ordering
	pub fn sort(&mut self) {
		self.values.sort_by(ordering);
		self.renumber(0);
	}

	/// lexicographic over values, a strict prefix is less
	pub fn less_than(&self, other: &PropertyCollection) -> bool {
		for (a, b) in self.values.iter().zip(other.values.iter()) {
			match ordering(a, b) {
				Ordering::Less => return true,
				Ordering::Greater => return false,
				Ordering::Equal => {},
			}
		}
		self.values.len() < other.values.len()
	}

	/// a single value is written bare, anything else as a list
	pub fn serialize(&self) -> Value {
		match self.values.as_slice() {
			[single] => single.serialize(),
			values => Value::Array(values.iter().map(PropertyValue::serialize).collect()),
		}
	}

	pub fn json_ld_context(&self) -> BTreeMap<String, String> {
		let mut ctx = BTreeMap::from([(ACTIVITYSTREAMS.to_string(), self.alias.clone())]);
		for value in &self.values {
			for (uri, alias) in value.json_ld_context() {
				ctx.entry(uri).or_insert(alias);
			}
		}
		ctx
	}

	pub(crate) fn normalize(&mut self) {
		for value in self.values.iter_mut() {
			if let Some(entity) = value.member_mut().and_then(Member::entity_mut) {
				entity.normalize();
			}
		}
		if !self.def.functional {
			self.sort();
		}
	}

	fn renumber(&mut self, from: usize) {
		for (i, value) in self.values.iter_mut().enumerate().skip(from) {
			value.set_index(Some(i));
		}
	}
}

fn ordering(a: &PropertyValue, b: &PropertyValue) -> Ordering {
	if a.less_than(b) {
		Ordering::Less
	} else if b.less_than(a) {
		Ordering::Greater
	} else {
		Ordering::Equal
	}
}

impl<'a> IntoIterator for &'a PropertyCollection {
	type Item = &'a PropertyValue;
	type IntoIter = std::slice::Iter<'a, PropertyValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.values.iter()
	}
}

/// position inside a collection; siblings are reached through the owning collection
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
	parent: &'a PropertyCollection,
	index: usize,
}

impl<'a> Cursor<'a> {
	pub fn index(&self) -> usize {
		self.index
	}

	pub fn value(&self) -> &'a PropertyValue {
		let value = &self.parent.values[self.index];
		debug_assert_eq!(value.index(), Some(self.index), "stale index on '{}'", value.name());
		value
	}

	pub fn next(&self) -> Option<Cursor<'a>> {
		self.parent.cursor(self.index + 1)
	}

	pub fn prev(&self) -> Option<Cursor<'a>> {
		self.index.checked_sub(1).and_then(|i| self.parent.cursor(i))
	}
}

impl std::ops::Deref for Cursor<'_> {
	type Target = PropertyValue;

	fn deref(&self) -> &Self::Target {
		self.value()
	}
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;
	use crate::{vocab::props, Note, Person};

	fn read(def: &'static PropertyDef, object: Value) -> Option<PropertyCollection> {
		let object = object.as_object().cloned().unwrap_or_default();
		PropertyCollection::deserialize(def, &object, &AliasMap::default(), &Registry::activitystreams())
	}

	fn indices(collection: &PropertyCollection) -> Vec<Option<usize>> {
		collection.iter().map(PropertyValue::index).collect()
	}

	#[test]
	fn absent_key_is_none() {
		assert!(read(&props::TO, json!({ "cc": "https://example.org/a" })).is_none());
	}

	#[test]
	fn lists_are_split_and_numbered() {
		let to = read(&props::TO, json!({ "to": ["https://example.org/a", "https://example.org/b"] }))
			.expect("to is present");
		assert_eq!(to.len(), 2);
		assert_eq!(indices(&to), vec![Some(0), Some(1)]);
		assert_eq!(to.serialize(), json!(["https://example.org/a", "https://example.org/b"]));
	}

	#[test]
	fn single_values_serialize_bare() {
		let to = read(&props::TO, json!({ "to": ["https://example.org/a"] })).expect("to is present");
		assert_eq!(to.serialize(), json!("https://example.org/a"));
		let empty = read(&props::TO, json!({ "to": [] })).expect("to is present");
		assert_eq!(empty.serialize(), json!([]));
	}

	#[test]
	fn aliased_key_is_looked_up() {
		let object = json!({ "as:name": "aliased", "name": "plain" });
		let aliases = AliasMap::from_context(&json!({ "as": ACTIVITYSTREAMS }));
		let name = PropertyCollection::deserialize(
			&props::NAME,
			object.as_object().expect("is an object"),
			&aliases,
			&Registry::activitystreams(),
		)
			.expect("name is present");
		assert_eq!(name.at(0).get_string(), Some("aliased"));
		assert_eq!(name.key(), "as:name");
	}

	#[test]
	fn functional_lists_are_one_value() {
		let media = read(&props::MEDIA_TYPE, json!({ "mediaType": ["text/html", "text/plain"] }))
			.expect("mediaType is present");
		assert_eq!(media.len(), 1);
		assert!(media.at(0).is_unknown());
	}

	#[test]
	fn functional_rejects_a_second_value() {
		let mut media = PropertyCollection::new(&props::MEDIA_TYPE);
		media.append("text/html").expect("first value fits");
		assert_eq!(media.append("text/plain"), Err(ModelError::FunctionalOverflow("mediaType")));
	}

	#[test]
	fn prepend_and_remove_renumber() {
		let mut items = PropertyCollection::new(&props::ITEMS);
		items.append_note(Note::new()).expect("items accepts notes");
		items.append_person(Person::new()).expect("items accepts persons");
		items.prepend_iri(Url::parse("https://example.org/first").expect("valid url")).expect("not functional");
		assert_eq!(indices(&items), vec![Some(0), Some(1), Some(2)]);
		assert!(items.at(0).is_iri());
		assert!(items.at(1).is_note());

		let removed = items.remove(1);
		assert!(removed.is_note());
		assert_eq!(removed.index(), None);
		assert_eq!(indices(&items), vec![Some(0), Some(1)]);
		assert!(items.at(1).is_person());
	}

	#[test]
	fn middle_insert_renumbers_the_tail() {
		let mut items = PropertyCollection::new(&props::ITEMS);
		for i in 0..4 {
			items.append_iri(Url::parse(&format!("https://example.org/{i}")).expect("valid url")).expect("not functional");
		}
		items.insert_note(2, Note::new()).expect("items accepts notes");
		assert_eq!(indices(&items), vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
		assert!(items.at(2).is_note());
		assert_eq!(items.at(3).iri_str(), Some("https://example.org/2"));
		assert_eq!(items.at(4).iri_str(), Some("https://example.org/3"));

		items.insert_iri(5, Url::parse("https://example.org/last").expect("valid url")).expect("not functional");
		assert_eq!(items.at(5).index(), Some(5));
		assert_eq!(items.end().map(|c| c.index()), Some(5));
	}

	#[test]
	fn stale_values_see_shifted_siblings() {
		let mut items = PropertyCollection::new(&props::ITEMS);
		items.append("a").expect_err("items only holds types");
		items.append_note(Note::new()).expect("items accepts notes");
		items.append_person(Person::new()).expect("items accepts persons");
		let held = items.at(0).clone();
		assert!(items.next_of(&held).is_some_and(PropertyValue::is_person));
		items.prepend_iri(Url::parse("https://example.org/zero").expect("valid url")).expect("not functional");
		assert!(items.next_of(&held).is_some_and(PropertyValue::is_note));
	}

	#[test]
	fn cursors_walk_both_ways() {
		let to = read(&props::TO, json!({ "to": ["https://example.org/a", "https://example.org/b"] }))
			.expect("to is present");
		let first = to.begin().expect("not empty");
		let second = first.next().expect("has two values");
		assert_eq!(second.index(), 1);
		assert!(second.next().is_none());
		assert_eq!(second.prev().map(|c| c.index()), Some(0));
		assert!(first.prev().is_none());
		assert_eq!(to.end().map(|c| c.index()), Some(1));
	}

	#[test]
	fn swap_keeps_indices_consistent() {
		let mut to = read(&props::TO, json!({ "to": ["https://example.org/a", "https://example.org/b"] }))
			.expect("to is present");
		to.swap(0, 1);
		assert_eq!(indices(&to), vec![Some(0), Some(1)]);
		assert_eq!(to.at(0).serialize(), json!("https://example.org/b"));
	}

	#[test]
	fn sort_is_stable_and_puts_iris_first() {
		let mut items = read(&props::ITEMS, json!({ "items": [
			{ "type": "Person", "name": "b" },
			"https://example.org/z",
			{ "type": "Note" },
			"https://example.org/a",
			{ "type": "Person", "name": "a" },
		]}))
			.expect("items is present");
		items.sort();
		assert_eq!(indices(&items), (0..5).map(Some).collect::<Vec<_>>());
		assert_eq!(items.at(0).serialize(), json!("https://example.org/a"));
		assert_eq!(items.at(1).serialize(), json!("https://example.org/z"));
		assert!(items.at(2).is_note());
		assert_eq!(items.at(3).get_person().and_then(|p| p.get_str("name")), Some("a"));
		assert!(items.less(0, 1));
		assert!(!items.less(1, 0));
	}

	#[test]
	fn shorter_prefix_is_less() {
		let short = read(&props::TO, json!({ "to": ["https://example.org/a"] })).expect("present");
		let long = read(&props::TO, json!({ "to": ["https://example.org/a", "https://example.org/b"] })).expect("present");
		assert!(short.less_than(&long));
		assert!(!long.less_than(&short));
		assert!(!short.less_than(&short));
	}

	#[test]
	#[should_panic]
	fn at_out_of_bounds_panics() {
		PropertyCollection::new(&props::TO).at(0);
	}
}
