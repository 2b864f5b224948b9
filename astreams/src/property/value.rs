use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use url::Url;

use crate::{
	jsonld::{prefixed, ACTIVITYSTREAMS}, AliasMap, Entity, Kind, Member, ModelError, PropertyDef, Registry, TypeName,
};

use super::{IRI_KIND_INDEX, NO_KIND_INDEX};

/// an IRI is anything parsing as an absolute url with a hierarchical path
fn parse_iri(raw: &str) -> Option<Url> {
	Url::parse(raw).ok().filter(|u| !u.cannot_be_a_base())
}

/// entity kinds named by a raw object's "type", in document order, limited to the declared ones
fn listed_kinds(def: &PropertyDef, raw: &Value, aliases: &AliasMap) -> Vec<Kind> {
	let prefix = prefixed(aliases.activitystreams(), "");
	let names: Vec<&str> = match raw.get("type") {
		Some(Value::String(s)) => vec![s.as_str()],
		Some(Value::Array(list)) => list.iter().filter_map(Value::as_str).collect(),
		_ => return Vec::new(),
	};
	names.into_iter()
		.filter_map(|s| TypeName::try_from(s.strip_prefix(&*prefix).unwrap_or(s)).ok())
		.map(Kind::Type)
		.filter(|k| def.allows(*k))
		.collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum Slot {
	#[default]
	Empty,
	Member(Member),
	/// `raw` is the text as read, written back untouched
	Iri { raw: String, url: Url },
	Unknown(Value),
}

impl Slot {
	pub(crate) fn iri(url: Url) -> Self {
		Slot::Iri { raw: url.to_string(), url }
	}
}

/// one value of a property: at most one of its declared kinds, an IRI, or an unrecognized raw value
#[derive(Debug, Clone)]
pub struct PropertyValue {
	def: &'static PropertyDef,
	slot: Slot,
	alias: String,
	index: Option<usize>,
}

impl PartialEq for PropertyValue {
	fn eq(&self, other: &Self) -> bool {
		self.def.name == other.def.name && self.alias == other.alias && self.slot == other.slot
	}
}

impl PropertyValue {
	pub fn new(def: &'static PropertyDef) -> Self {
		PropertyValue { def, slot: Slot::Empty, alias: String::new(), index: None }
	}

	pub(crate) fn attached(def: &'static PropertyDef, alias: &str, slot: Slot, index: usize) -> Self {
		PropertyValue { def, slot, alias: alias.to_string(), index: Some(index) }
	}

	/// read one raw json value: IRIs first, then the types it names, then each declared kind in
	/// order, else kept as unknown
	pub fn deserialize(def: &'static PropertyDef, raw: &Value, aliases: &AliasMap, registry: &Registry) -> Self {
		PropertyValue {
			def,
			slot: Self::classify(def, raw, aliases, registry),
			alias: aliases.activitystreams().to_string(),
			index: None,
		}
	}

	fn classify(def: &'static PropertyDef, raw: &Value, aliases: &AliasMap, registry: &Registry) -> Slot {
		if let Some(text) = raw.as_str() {
			if let Some(url) = parse_iri(text) {
				return Slot::Iri { raw: text.to_string(), url };
			}
		}
		let listed = listed_kinds(def, raw, aliases);
		for kind in listed.iter().chain(def.kinds.iter().filter(|k| !listed.contains(k))) {
			if let Some(member) = Member::deserialize(*kind, raw, aliases, registry) {
				return Slot::Member(member);
			}
		}
		tracing::debug!("keeping unrecognized value of '{}' as is", def.name);
		Slot::Unknown(raw.clone())
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

	/// position inside the owning collection, None when detached
	pub fn index(&self) -> Option<usize> {
		self.index
	}

	pub(crate) fn set_index(&mut self, index: Option<usize>) {
		self.index = index;
	}

	/// true if holding a known kind or an IRI; unknown values don't count
	pub fn has_any(&self) -> bool {
		matches!(self.slot, Slot::Member(_) | Slot::Iri { .. })
	}

	pub fn is_empty(&self) -> bool {
		matches!(self.slot, Slot::Empty)
	}

	pub fn kind(&self) -> Option<Kind> {
		self.member().map(Member::kind)
	}

	pub fn is(&self, kind: Kind) -> bool {
		self.kind() == Some(kind)
	}

	pub fn member(&self) -> Option<&Member> {
		match &self.slot {
			Slot::Member(m) => Some(m),
			_ => None,
		}
	}

	pub(crate) fn member_mut(&mut self) -> Option<&mut Member> {
		match &mut self.slot {
			Slot::Member(m) => Some(m),
			_ => None,
		}
	}

	pub fn entity(&self) -> Option<&Entity> {
		self.member().and_then(Member::entity)
	}

	pub fn get_type(&self, type_name: TypeName) -> Option<&Entity> {
		self.entity().filter(|e| e.type_name() == type_name)
	}

	/// replace whatever this value holds; fails if the property doesn't declare the member's kind
	pub fn set(&mut self, member: impl Into<Member>) -> Result<(), ModelError> {
		let member = member.into();
		let kind = member.kind();
		if !self.def.allows(kind) {
			return Err(ModelError::KindNotAllowed { property: self.def.name, kind });
		}
		self.slot = Slot::Member(member);
		Ok(())
	}

	pub fn clear(&mut self) {
		self.slot = Slot::Empty;
	}

	pub fn is_iri(&self) -> bool {
		matches!(self.slot, Slot::Iri { .. })
	}

	pub fn iri(&self) -> Option<&Url> {
		match &self.slot {
			Slot::Iri { url, .. } => Some(url),
			_ => None,
		}
	}

	/// the IRI exactly as it appeared in the document
	pub fn iri_str(&self) -> Option<&str> {
		match &self.slot {
			Slot::Iri { raw, .. } => Some(raw),
			_ => None,
		}
	}

	pub fn set_iri(&mut self, iri: Url) {
		self.slot = Slot::iri(iri);
	}

	pub fn is_unknown(&self) -> bool {
		matches!(self.slot, Slot::Unknown(_))
	}

	pub fn unknown(&self) -> Option<&Value> {
		match &self.slot {
			Slot::Unknown(raw) => Some(raw),
			_ => None,
		}
	}

	pub fn set_unknown(&mut self, raw: Value) {
		self.slot = Slot::Unknown(raw);
	}

	pub fn is_string(&self) -> bool {
		self.is(Kind::String)
	}

	pub fn get_string(&self) -> Option<&str> {
		match self.member()? {
			Member::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn get_boolean(&self) -> Option<bool> {
		match self.member()? {
			Member::Boolean(b) => Some(*b),
			_ => None,
		}
	}

	pub fn get_date_time(&self) -> Option<DateTime<Utc>> {
		match self.member()? {
			Member::DateTime(t) => Some(*t),
			_ => None,
		}
	}

	pub fn get_float(&self) -> Option<f64> {
		match self.member()? {
			Member::Float(f) => Some(*f),
			_ => None,
		}
	}

	pub fn get_non_negative_integer(&self) -> Option<u64> {
		match self.member()? {
			Member::NonNegativeInteger(n) => Some(*n),
			_ => None,
		}
	}

	/// position of the held kind among the declared ones; IRIs and empty values get sentinels
	pub fn kind_index(&self) -> i32 {
		match &self.slot {
			Slot::Iri { .. } => IRI_KIND_INDEX,
			Slot::Member(m) => self.def.kind_position(m.kind())
				.map_or(NO_KIND_INDEX, |i| i as i32),
			Slot::Empty | Slot::Unknown(_) => NO_KIND_INDEX,
		}
	}

	/// orders by kind index first, then by the held values
	pub fn less_than(&self, other: &PropertyValue) -> bool {
		let (a, b) = (self.kind_index(), other.kind_index());
		if a != b {
			return a < b;
		}
		match (&self.slot, &other.slot) {
			(Slot::Member(x), Slot::Member(y)) => x.less_than(y),
			(Slot::Iri { raw: x, .. }, Slot::Iri { raw: y, .. }) => x < y,
			_ => false,
		}
	}

	pub fn serialize(&self) -> Value {
		match &self.slot {
			Slot::Empty => Value::Null,
			Slot::Member(m) => m.serialize(),
			Slot::Iri { raw, .. } => Value::String(raw.clone()),
			Slot::Unknown(raw) => raw.clone(),
		}
	}

	/// vocabularies used by this value, first seen alias wins
	pub fn json_ld_context(&self) -> BTreeMap<String, String> {
		let mut ctx = BTreeMap::from([(ACTIVITYSTREAMS.to_string(), self.alias.clone())]);
		if let Slot::Member(m) = &self.slot {
			for (uri, alias) in m.json_ld_context() {
				ctx.entry(uri).or_insert(alias);
			}
		}
		ctx
	}
}
