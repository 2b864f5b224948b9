use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::{AliasMap, DeserializeError, Entity, TypeName};

pub type Deserializer = Box<dyn Fn(&Map<String, Value>, &AliasMap, &Registry) -> Result<Entity, DeserializeError> + Send + Sync>;

/// type name -> deserializer, consulted whenever a type needs to be read out of raw json
///
/// nested values are read through the same registry, so replacing an entry affects every level
#[derive(Default)]
pub struct Registry {
	deserializers: HashMap<TypeName, Deserializer>,
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut types: Vec<&TypeName> = self.deserializers.keys().collect();
		types.sort();
		f.debug_struct("Registry").field("types", &types).finish()
	}
}

impl Registry {
	/// an empty registry, every lookup fails until something is registered
	pub fn new() -> Self {
		Self::default()
	}

	/// registry covering the whole ActivityStreams vocabulary
	pub fn activitystreams() -> Self {
		let mut registry = Self::new();
		for type_name in TypeName::ALL.iter().copied() {
			registry.register(type_name, move |object, aliases, registry| {
				Entity::deserialize(type_name, object, aliases, registry)
			});
		}
		registry
	}

	/// returns the previously registered deserializer, if any
	pub fn register<F>(&mut self, type_name: TypeName, deserializer: F) -> Option<Deserializer>
	where
		F: Fn(&Map<String, Value>, &AliasMap, &Registry) -> Result<Entity, DeserializeError> + Send + Sync + 'static,
	{
		self.deserializers.insert(type_name, Box::new(deserializer))
	}

	pub fn contains(&self, type_name: TypeName) -> bool {
		self.deserializers.contains_key(&type_name)
	}

	pub fn get(&self, type_name: TypeName) -> Option<&Deserializer> {
		self.deserializers.get(&type_name)
	}

	/// read `object` as `type_name`, failing if the registered deserializer hands back something else
	pub fn deserialize(&self, type_name: TypeName, object: &Map<String, Value>, aliases: &AliasMap) -> Result<Entity, DeserializeError> {
		let deserializer = self.get(type_name).ok_or(DeserializeError::Unregistered(type_name))?;
		let entity = deserializer(object, aliases, self)?;
		if entity.type_name() != type_name {
			return Err(DeserializeError::TypeMismatch {
				expected: type_name,
				found: entity.type_name().to_string(),
			});
		}
		Ok(entity)
	}
}
