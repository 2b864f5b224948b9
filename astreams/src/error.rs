use crate::{Kind, TypeName};

/// whatever a resolver callback fails with, handed back verbatim to the caller of `resolve`
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
	#[error("cannot determine ActivityStreams type: missing field '{0}'")]
	MissingField(&'static str),

	#[error("unhandled ActivityStreams type: {0}")]
	UnhandledType(String),

	#[error("no callback registered for ActivityStreams type {0}")]
	NoCallbackMatch(TypeName),

	#[error("callback for '{0}' can never be invoked: not an ActivityStreams type")]
	InvalidCallbackSignature(String),

	#[error("deserialization failed: {0}")]
	Deserialize(#[from] DeserializeError),

	#[error("callback failed: {0}")]
	Callback(CallbackError),
}

impl ResolveError {
	/// true for errors which only mean "this candidate type is not supported here"
	pub fn is_unhandled(&self) -> bool {
		matches!(self, ResolveError::UnhandledType(_))
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeserializeError {
	#[error("missing field '{0}'")]
	MissingField(&'static str),

	#[error("'type' must be a string or a list of strings, got {0}")]
	InvalidType(String),

	#[error("'type' does not name {expected}: {found}")]
	TypeMismatch {
		expected: TypeName,
		found: String,
	},

	#[error("no deserializer registered for {0}")]
	Unregistered(TypeName),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
	#[error("property '{property}' does not accept {kind} values")]
	KindNotAllowed {
		property: &'static str,
		kind: Kind,
	},

	#[error("{type_name} does not declare property '{property}'")]
	UndeclaredProperty {
		type_name: TypeName,
		property: String,
	},

	#[error("functional property '{0}' already holds a value")]
	FunctionalOverflow(&'static str),
}
