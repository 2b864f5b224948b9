use std::{
	cmp::Ordering,
	collections::{BTreeMap, BTreeSet},
};

use serde_json::{Map, Value};
use url::Url;

use crate::{
	jsonld::{prefixed, ACTIVITYSTREAMS},
	vocab::props,
	AliasMap, DeserializeError, ModelError, PropertyCollection, Registry, TypeName,
};

/// instance of one vocabulary type: its declared properties plus whatever else the document carried
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
	type_name: TypeName,
	alias: String,
	additional_types: Vec<String>,
	/// where the own type sat in a multi valued "type"
	type_position: usize,
	properties: BTreeMap<&'static str, PropertyCollection>,
	unknown: Map<String, Value>,
}

impl Entity {
	pub fn new(type_name: TypeName) -> Self {
		Entity {
			type_name,
			alias: String::new(),
			additional_types: Vec::new(),
			type_position: 0,
			properties: BTreeMap::new(),
			unknown: Map::new(),
		}
	}

	/// read a raw object as `type_name`, which must appear in its "type" field
	pub fn deserialize(
		type_name: TypeName,
		object: &Map<String, Value>,
		aliases: &AliasMap,
		registry: &Registry,
	) -> Result<Self, DeserializeError> {
		let alias = aliases.activitystreams();
		let prefix = prefixed(alias, "");
		let unprefixed = |s: &str| -> bool { s.strip_prefix(&*prefix).unwrap_or(s) == type_name.as_str() };

		let raw_type = object.get("type").ok_or(DeserializeError::MissingField("type"))?;
		let (additional_types, type_position) = match raw_type {
			Value::String(s) if unprefixed(s.as_str()) => (Vec::new(), 0),
			Value::String(s) => return Err(DeserializeError::TypeMismatch { expected: type_name, found: s.clone() }),
			Value::Array(list) => {
				let names: Vec<&str> = list.iter().filter_map(Value::as_str).collect();
				let Some(pos) = names.iter().position(|s| unprefixed(*s)) else {
					return Err(DeserializeError::TypeMismatch { expected: type_name, found: raw_type.to_string() });
				};
				let others = names.into_iter()
					.enumerate()
					.filter(|(i, _)| *i != pos)
					.map(|(_, s)| s.to_string())
					.collect();
				(others, pos)
			},
			other => return Err(DeserializeError::InvalidType(other.to_string())),
		};

		let mut entity = Entity {
			type_name,
			alias: alias.to_string(),
			additional_types,
			type_position,
			properties: BTreeMap::new(),
			unknown: Map::new(),
		};

		for def in type_name.properties() {
			if let Some(collection) = PropertyCollection::deserialize(def, object, aliases, registry) {
				entity.properties.insert(def.name, collection);
			}
		}

		let known: BTreeSet<String> = entity.properties.values().map(PropertyCollection::key).collect();
		for (key, value) in object {
			if key == "type" || key == "@context" || known.contains(key) {
				continue;
			}
			entity.unknown.insert(key.clone(), value.clone());
		}

		Ok(entity)
	}

	pub fn type_name(&self) -> TypeName {
		self.type_name
	}

	/// alias used for the ActivityStreams vocabulary when this entity was read
	pub fn alias(&self) -> &str {
		&self.alias
	}

	/// other entries of a multi valued "type", as written
	pub fn additional_types(&self) -> &[String] {
		&self.additional_types
	}

	pub fn property(&self, name: &str) -> Option<&PropertyCollection> {
		self.properties.get(name)
	}

	pub fn property_mut(&mut self, name: &str) -> Option<&mut PropertyCollection> {
		self.properties.get_mut(name)
	}

	/// collection for a declared property, created empty if missing
	pub fn property_or_default(&mut self, name: &str) -> Result<&mut PropertyCollection, ModelError> {
		let def = self.type_name.property(name).ok_or_else(|| ModelError::UndeclaredProperty {
			type_name: self.type_name,
			property: name.to_string(),
		})?;
		let alias = self.alias.clone();
		Ok(self.properties.entry(def.name).or_insert_with(|| PropertyCollection::with_alias(def, alias)))
	}

	/// replace a whole property, returning the previous collection
	pub fn set_property(&mut self, collection: PropertyCollection) -> Result<Option<PropertyCollection>, ModelError> {
		if self.type_name.property(collection.name()).is_none() {
			return Err(ModelError::UndeclaredProperty {
				type_name: self.type_name,
				property: collection.name().to_string(),
			});
		}
		Ok(self.properties.insert(collection.name(), collection))
	}

	pub fn remove_property(&mut self, name: &str) -> Option<PropertyCollection> {
		self.properties.remove(name)
	}

	pub fn properties(&self) -> impl Iterator<Item = &PropertyCollection> {
		self.properties.values()
	}

	/// raw fields which are not declared properties of this type
	pub fn unknown(&self) -> &Map<String, Value> {
		&self.unknown
	}

	pub fn set_unknown(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
		self.unknown.insert(key.into(), value)
	}

	pub fn id(&self) -> Option<&Url> {
		self.property(props::ID.name)?.first()?.iri()
	}

	pub fn set_id(&mut self, iri: Url) {
		let id = PropertyCollection::from_iri(&props::ID, self.alias.clone(), iri);
		self.properties.insert(props::ID.name, id);
	}

	/// first string value of given property
	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.property(name)?.iter().find_map(|v| v.get_string())
	}

	pub fn serialize(&self) -> Value {
		Value::Object(self.to_map())
	}

	pub(crate) fn to_map(&self) -> Map<String, Value> {
		let mut map = self.unknown.clone();
		let type_name = prefixed(&self.alias, self.type_name.as_str()).into_owned();
		let type_value = if self.additional_types.is_empty() {
			Value::String(type_name)
		} else {
			let mut types: Vec<Value> = self.additional_types.iter().cloned().map(Value::String).collect();
			types.insert(self.type_position.min(types.len()), Value::String(type_name));
			Value::Array(types)
		};
		map.insert("type".to_string(), type_value);
		for collection in self.properties.values() {
			map.insert(collection.key(), collection.serialize());
		}
		map
	}

	/// vocabularies used by this entity and everything nested in it, first seen alias wins
	pub fn json_ld_context(&self) -> BTreeMap<String, String> {
		let mut ctx = BTreeMap::from([(ACTIVITYSTREAMS.to_string(), self.alias.clone())]);
		for collection in self.properties.values() {
			for (uri, alias) in collection.json_ld_context() {
				ctx.entry(uri).or_insert(alias);
			}
		}
		ctx
	}

	pub fn less_than(&self, other: &Entity) -> bool {
		self.compare(other) == Ordering::Less
	}

	/// type first, then every property by name; a missing property sorts before a present one
	fn compare(&self, other: &Entity) -> Ordering {
		self.type_name.cmp(&other.type_name).then_with(|| {
			let names: BTreeSet<&str> = self.properties.keys().chain(other.properties.keys()).copied().collect();
			for name in names {
				let ord = match (self.properties.get(name), other.properties.get(name)) {
					(None, None) => Ordering::Equal,
					(None, Some(_)) => Ordering::Less,
					(Some(_), None) => Ordering::Greater,
					(Some(a), Some(b)) if a.less_than(b) => Ordering::Less,
					(Some(a), Some(b)) if b.less_than(a) => Ordering::Greater,
					(Some(_), Some(_)) => Ordering::Equal,
				};
				if ord != Ordering::Equal {
					return ord;
				}
			}
			Ordering::Equal
		})
	}

	/// sort every non functional property, recursively
	pub fn normalize(&mut self) {
		for collection in self.properties.values_mut() {
			collection.normalize();
		}
	}
}
