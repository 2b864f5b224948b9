use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::{AliasMap, Entity, Registry, TypeName};

/// one alternative a property may hold: a vocabulary type or an xsd literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
	Type(TypeName),
	String,
	Boolean,
	DateTime,
	Float,
	NonNegativeInteger,
}

impl std::fmt::Display for Kind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Kind::Type(t) => write!(f, "{t}"),
			Kind::String => f.write_str("xsd:string"),
			Kind::Boolean => f.write_str("xsd:boolean"),
			Kind::DateTime => f.write_str("xsd:dateTime"),
			Kind::Float => f.write_str("xsd:float"),
			Kind::NonNegativeInteger => f.write_str("xsd:nonNegativeInteger"),
		}
	}
}

impl From<TypeName> for Kind {
	fn from(value: TypeName) -> Self {
		Kind::Type(value)
	}
}

/// concrete content of a property value, tagged by its kind
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
	Type(Box<Entity>),
	String(String),
	Boolean(bool),
	DateTime(DateTime<Utc>),
	Float(f64),
	NonNegativeInteger(u64),
}

impl Member {
	pub fn kind(&self) -> Kind {
		match self {
			Member::Type(e) => Kind::Type(e.type_name()),
			Member::String(_) => Kind::String,
			Member::Boolean(_) => Kind::Boolean,
			Member::DateTime(_) => Kind::DateTime,
			Member::Float(_) => Kind::Float,
			Member::NonNegativeInteger(_) => Kind::NonNegativeInteger,
		}
	}

	pub fn entity(&self) -> Option<&Entity> {
		match self {
			Member::Type(e) => Some(e),
			_ => None,
		}
	}

	pub(crate) fn entity_mut(&mut self) -> Option<&mut Entity> {
		match self {
			Member::Type(e) => Some(e),
			_ => None,
		}
	}

	/// read a raw json value as given kind, None if its shape doesn't fit
	pub(crate) fn deserialize(kind: Kind, raw: &Value, aliases: &AliasMap, registry: &Registry) -> Option<Member> {
		match (kind, raw) {
			(Kind::Type(t), Value::Object(map)) => match registry.deserialize(t, map, aliases) {
				Ok(entity) => Some(Member::Type(Box::new(entity))),
				Err(e) => {
					tracing::trace!("value is not a {t}: {e}");
					None
				},
			},
			(Kind::String, Value::String(s)) => Some(Member::String(s.clone())),
			(Kind::Boolean, Value::Bool(b)) => Some(Member::Boolean(*b)),
			(Kind::DateTime, Value::String(s)) => DateTime::parse_from_rfc3339(s)
				.ok()
				.map(|t| Member::DateTime(t.with_timezone(&Utc))),
			(Kind::Float, Value::Number(n)) => n.as_f64().map(Member::Float),
			(Kind::NonNegativeInteger, Value::Number(n)) => n.as_u64().map(Member::NonNegativeInteger),
			_ => None,
		}
	}

	pub fn serialize(&self) -> Value {
		match self {
			Member::Type(e) => e.serialize(),
			Member::String(s) => Value::String(s.clone()),
			Member::Boolean(b) => Value::Bool(*b),
			Member::DateTime(t) => Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
			Member::Float(f) => serde_json::Number::from_f64(*f)
				.map(Value::Number)
				.unwrap_or(Value::Null),
			Member::NonNegativeInteger(n) => Value::Number((*n).into()),
		}
	}

	/// ordering within one kind; members of different kinds fall back to kind order
	pub fn less_than(&self, other: &Member) -> bool {
		match (self, other) {
			(Member::Type(a), Member::Type(b)) => a.less_than(b),
			(Member::String(a), Member::String(b)) => a < b,
			(Member::Boolean(a), Member::Boolean(b)) => a < b,
			(Member::DateTime(a), Member::DateTime(b)) => a < b,
			(Member::Float(a), Member::Float(b)) => a < b,
			(Member::NonNegativeInteger(a), Member::NonNegativeInteger(b)) => a < b,
			_ => self.kind() < other.kind(),
		}
	}

	pub fn json_ld_context(&self) -> BTreeMap<String, String> {
		match self {
			Member::Type(e) => e.json_ld_context(),
			_ => BTreeMap::new(),
		}
	}
}

impl From<Entity> for Member {
	fn from(value: Entity) -> Self {
		Member::Type(Box::new(value))
	}
}

impl From<String> for Member {
	fn from(value: String) -> Self {
		Member::String(value)
	}
}

impl From<&str> for Member {
	fn from(value: &str) -> Self {
		Member::String(value.to_string())
	}
}

impl From<bool> for Member {
	fn from(value: bool) -> Self {
		Member::Boolean(value)
	}
}

impl From<DateTime<Utc>> for Member {
	fn from(value: DateTime<Utc>) -> Self {
		Member::DateTime(value)
	}
}

impl From<f64> for Member {
	fn from(value: f64) -> Self {
		Member::Float(value)
	}
}

impl From<u64> for Member {
	fn from(value: u64) -> Self {
		Member::NonNegativeInteger(value)
	}
}
