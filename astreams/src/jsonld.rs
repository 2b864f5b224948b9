use std::{borrow::Cow, collections::BTreeMap};

use serde_json::Value;

use crate::{ContextConfig, Entity};

/// canonical vocabulary uri, the one aliases are looked up for
pub const ACTIVITYSTREAMS: &str = "https://www.w3.org/TR/activitystreams-vocabulary";

/// namespace uri most documents actually put in their @context
pub const ACTIVITYSTREAMS_NS: &str = "https://www.w3.org/ns/activitystreams";

/// http and https spellings of an absolute web uri
fn scheme_forms(uri: &str) -> Option<(String, String)> {
	if let Some(rest) = uri.strip_prefix("http://") {
		Some((uri.to_string(), format!("https://{rest}")))
	} else if let Some(rest) = uri.strip_prefix("https://") {
		Some((format!("http://{rest}"), uri.to_string()))
	} else {
		None
	}
}

/// `"{alias}:{name}"`, or just `name` when unaliased
pub(crate) fn prefixed<'a>(alias: &str, name: &'a str) -> Cow<'a, str> {
	if alias.is_empty() {
		Cow::Borrowed(name)
	} else {
		Cow::Owned(format!("{alias}:{name}"))
	}
}

/// vocabulary uri -> alias, as declared by a document's @context
///
/// an empty alias means the vocabulary is used unprefixed. entries of object contexts are also kept
/// verbatim (alias -> uri), so lookups by alias keep working
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap(BTreeMap<String, String>);

impl AliasMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// build from a raw @context value with default settings
	pub fn from_context(context: &Value) -> Self {
		Self::parse(context, &ContextConfig::default())
	}

	pub fn parse(context: &Value, cfg: &ContextConfig) -> Self {
		let mut map = AliasMap::default();
		map.merge(context, cfg);
		map
	}

	fn merge(&mut self, context: &Value, cfg: &ContextConfig) {
		match context {
			Value::String(uri) => match scheme_forms(uri) {
				Some((http, https)) => {
					self.0.insert(http, String::new());
					self.0.insert(https, String::new());
				},
				None => {
					self.0.insert(uri.clone(), String::new());
				},
			},
			// later entries win on conflicts
			Value::Array(entries) => {
				for entry in entries {
					self.merge(entry, cfg);
				}
			},
			Value::Object(entries) => {
				for (key, value) in entries {
					let Some(value) = value.as_str() else {
						tracing::trace!("skipping non-string @context entry '{key}'");
						continue;
					};
					self.0.insert(key.clone(), value.to_string());
					if !cfg.reverse_mappings {
						continue;
					}
					let alias = match key.as_str() {
						"@vocab" => "",
						k if k.starts_with('@') => continue,
						k => k,
					};
					if let Some((http, https)) = scheme_forms(value) {
						self.0.insert(http, alias.to_string());
						self.0.insert(https, alias.to_string());
					}
				},
			},
			_ => tracing::trace!("ignoring @context entry {context}"),
		}
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	pub fn insert(&mut self, uri: impl Into<String>, alias: impl Into<String>) -> Option<String> {
		self.0.insert(uri.into(), alias.into())
	}

	/// alias for a vocabulary, trying the https spelling first and then the http one
	pub fn alias_for(&self, vocabulary: &str) -> Option<&str> {
		match scheme_forms(vocabulary) {
			Some((http, https)) => self.get(&https).or_else(|| self.get(&http)),
			None => self.get(vocabulary),
		}
	}

	/// alias under which the ActivityStreams vocabulary appears, empty when unprefixed
	pub fn activitystreams(&self) -> &str {
		self.alias_for(ACTIVITYSTREAMS)
			.or_else(|| self.alias_for(ACTIVITYSTREAMS_NS))
			.unwrap_or_default()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

/// build an @context value out of vocabulary uri -> alias pairs
///
/// unaliased vocabularies are listed as plain uris, aliased ones are grouped in a single object
pub fn context_value(vocabularies: &BTreeMap<String, String>) -> Value {
	let mut entries = Vec::new();
	let mut aliased = serde_json::Map::new();
	for (uri, alias) in vocabularies {
		if alias.is_empty() {
			entries.push(Value::String(uri.clone()));
		} else {
			aliased.insert(alias.clone(), Value::String(uri.clone()));
		}
	}
	if !aliased.is_empty() {
		entries.push(Value::Object(aliased));
	}
	if entries.len() == 1 {
		entries.remove(0)
	} else {
		Value::Array(entries)
	}
}

pub trait LD {
	/// serialize as a standalone json-ld document, with an @context covering every vocabulary used
	fn ld_context(&self) -> Value;
}

impl LD for Entity {
	fn ld_context(&self) -> Value {
		let mut doc = self.to_map();
		doc.insert("@context".to_string(), context_value(&self.json_ld_context()));
		Value::Object(doc)
	}
}
