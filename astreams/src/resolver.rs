use serde_json::{Map, Value};

use crate::{
	vocab::Vocabulary, AliasMap, CallbackError, Config, ContextConfig, Entity, Registry, ResolveError,
	ResolverConfig, TypeName,
};

type Handler<'a, C> = Box<dyn Fn(&C, Entity) -> Result<(), CallbackError> + 'a>;

/// a handler for one vocabulary type, receiving the caller's context and the deserialized value
pub struct Callback<'a, C = ()> {
	accepts: String,
	handler: Handler<'a, C>,
}

impl<'a, C> Callback<'a, C> {
	/// typed handler: the accepted type is taken from the handler's argument
	pub fn on<T, F>(handler: F) -> Self
	where
		C: 'a,
		T: Vocabulary + 'a,
		F: Fn(&C, T) -> Result<(), CallbackError> + 'a,
	{
		Callback {
			accepts: T::TYPE_NAME.to_string(),
			handler: Box::new(move |ctx: &C, entity: Entity| -> Result<(), CallbackError> {
				let value = T::from_entity(entity)
					.map_err(|e| format!("expected {}, got {}", T::TYPE_NAME, e.type_name()))?;
				handler(ctx, value)
			}),
		}
	}

	/// handler for a type given by name, checked when the resolver is built
	pub fn named<F>(accepts: impl Into<String>, handler: F) -> Self
	where
		F: Fn(&C, Entity) -> Result<(), CallbackError> + 'a,
	{
		Callback { accepts: accepts.into(), handler: Box::new(handler) }
	}

	pub fn accepts(&self) -> &str {
		&self.accepts
	}
}

impl<C> std::fmt::Debug for Callback<'_, C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback").field("accepts", &self.accepts).finish_non_exhaustive()
	}
}

/// dispatches raw json objects to the first callback accepting their ActivityStreams type
pub struct Resolver<'a, C = ()> {
	registry: &'a Registry,
	callbacks: Vec<(TypeName, Handler<'a, C>)>,
	context: ContextConfig,
	config: ResolverConfig,
}

impl<'a, C> Resolver<'a, C> {
	/// fails if any callback accepts something outside the vocabulary
	pub fn new(registry: &'a Registry, callbacks: impl IntoIterator<Item = Callback<'a, C>>) -> Result<Self, ResolveError> {
		let callbacks = callbacks
			.into_iter()
			.map(|cb| match TypeName::try_from(cb.accepts.as_str()) {
				Ok(type_name) => Ok((type_name, cb.handler)),
				Err(_) => Err(ResolveError::InvalidCallbackSignature(cb.accepts)),
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Resolver {
			registry,
			callbacks,
			context: ContextConfig::default(),
			config: ResolverConfig::default(),
		})
	}

	pub fn with_config(mut self, config: &Config) -> Self {
		self.context = config.context.clone();
		self.config = config.resolver.clone();
		self
	}

	pub fn callbacks(&self) -> usize {
		self.callbacks.len()
	}

	/// like [`Resolver::resolve`], for any json value
	pub fn resolve_value(&self, ctx: &C, value: &Value) -> Result<(), ResolveError> {
		match value.as_object() {
			Some(object) => self.resolve(ctx, object),
			None => Err(ResolveError::MissingField("type")),
		}
	}

	/// deserialize `object` as the first of its types this resolver knows, and hand it to the
	/// matching callback
	///
	/// only unknown type names fall through to the next candidate: deserialization errors and
	/// types without a callback stop resolution right away
	pub fn resolve(&self, ctx: &C, object: &Map<String, Value>) -> Result<(), ResolveError> {
		let raw_type = object.get("type").ok_or(ResolveError::MissingField("type"))?;
		let context = object.get("@context").ok_or(ResolveError::MissingField("@context"))?;
		let aliases = AliasMap::parse(context, &self.context);

		match raw_type {
			Value::String(candidate) => self.dispatch(ctx, object, &aliases, candidate),
			Value::Array(candidates) => {
				for candidate in candidates.iter().filter_map(Value::as_str) {
					match self.dispatch(ctx, object, &aliases, candidate) {
						Err(e) if e.is_unhandled() => tracing::debug!("skipping type candidate: {e}"),
						res => return res,
					}
				}
				Err(ResolveError::UnhandledType(raw_type.to_string()))
			},
			other => Err(ResolveError::UnhandledType(other.to_string())),
		}
	}

	fn dispatch(&self, ctx: &C, object: &Map<String, Value>, aliases: &AliasMap, candidate: &str) -> Result<(), ResolveError> {
		let alias = aliases.activitystreams();
		let name = if alias.is_empty() {
			Some(candidate)
		} else {
			candidate.strip_prefix(alias).and_then(|rest| rest.strip_prefix(':'))
		};
		let Some(type_name) = name.and_then(|n| TypeName::try_from(n).ok()) else {
			return Err(ResolveError::UnhandledType(candidate.to_string()));
		};

		let mut entity = self.registry.deserialize(type_name, object, aliases)?;
		if self.config.normalize {
			entity.normalize();
		}

		let Some((_, handler)) = self.callbacks.iter().find(|(t, _)| *t == type_name) else {
			return Err(ResolveError::NoCallbackMatch(type_name));
		};
		tracing::debug!("dispatching {type_name} to callback");
		handler(ctx, entity).map_err(ResolveError::Callback)
	}
}

#[cfg(test)]
mod test {
	use std::cell::RefCell;

	use serde_json::json;

	use super::*;
	use crate::{Note, Object, Person};

	type Seen = RefCell<Vec<String>>;

	fn record_notes<'a>() -> Callback<'a, Seen> {
		Callback::on(|seen: &Seen, note: Note| {
			seen.borrow_mut().push(format!("note:{}", note.get_str("content").unwrap_or_default()));
			Ok(())
		})
	}

	fn record_objects<'a>() -> Callback<'a, Seen> {
		Callback::on(|seen: &Seen, _: Object| {
			seen.borrow_mut().push("object".to_string());
			Ok(())
		})
	}

	fn resolve(callbacks: Vec<Callback<'_, Seen>>, doc: Value) -> (Result<(), ResolveError>, Vec<String>) {
		let registry = Registry::activitystreams();
		let resolver = Resolver::new(&registry, callbacks).expect("valid callbacks");
		let seen = Seen::default();
		let res = resolver.resolve_value(&seen, &doc);
		(res, seen.into_inner())
	}

	#[test]
	fn unaliased_note_reaches_its_callback() {
		let (res, seen) = resolve(vec![record_notes()], json!({
			"@context": "https://www.w3.org/TR/activitystreams-vocabulary",
			"type": "Note",
			"content": "hi",
		}));
		assert!(res.is_ok());
		assert_eq!(seen, vec!["note:hi"]);
	}

	#[test]
	fn aliased_note_reaches_its_callback() {
		let (res, seen) = resolve(vec![record_notes()], json!({
			"@context": { "as": "https://www.w3.org/TR/activitystreams-vocabulary" },
			"type": "as:Note",
			"as:content": "hi",
		}));
		assert!(res.is_ok());
		assert_eq!(seen, vec!["note:hi"]);
	}

	#[test]
	fn aliased_context_needs_prefixed_types() {
		let (res, seen) = resolve(vec![record_notes()], json!({
			"@context": { "as": "https://www.w3.org/TR/activitystreams-vocabulary" },
			"type": "Note",
		}));
		assert!(matches!(res, Err(ResolveError::UnhandledType(t)) if t == "Note"));
		assert!(seen.is_empty());
	}

	#[test]
	fn missing_callback_is_fatal_for_first_candidate() {
		let (res, seen) = resolve(vec![record_objects()], json!({
			"@context": "https://www.w3.org/ns/activitystreams",
			"type": ["Note", "Object"],
		}));
		assert!(matches!(res, Err(ResolveError::NoCallbackMatch(TypeName::Note))));
		assert!(seen.is_empty());
	}

	#[test]
	fn unknown_candidates_fall_through() {
		let (res, seen) = resolve(vec![record_notes(), record_objects()], json!({
			"@context": "https://www.w3.org/ns/activitystreams",
			"type": ["Hashtag", "Note", "Object"],
			"content": "tagged",
		}));
		assert!(res.is_ok());
		assert_eq!(seen, vec!["note:tagged"]);
	}

	#[test]
	fn bogus_type_is_unhandled() {
		let (res, _) = resolve(vec![record_notes()], json!({
			"@context": "https://www.w3.org/ns/activitystreams",
			"type": "Bogus",
		}));
		assert!(matches!(res, Err(ResolveError::UnhandledType(t)) if t == "Bogus"));

		let (res, _) = resolve(vec![record_notes()], json!({
			"@context": "https://www.w3.org/ns/activitystreams",
			"type": ["Bogus", "AlsoBogus"],
		}));
		assert!(matches!(res, Err(ResolveError::UnhandledType(_))));

		let (res, _) = resolve(vec![record_notes()], json!({
			"@context": "https://www.w3.org/ns/activitystreams",
			"type": { "not": "a type" },
		}));
		assert!(matches!(res, Err(ResolveError::UnhandledType(_))));
	}

	#[test]
	fn missing_fields_are_fatal() {
		let (res, _) = resolve(vec![record_notes()], json!({ "type": "Note" }));
		assert!(matches!(res, Err(ResolveError::MissingField("@context"))));

		let (res, _) = resolve(vec![record_notes()], json!({ "@context": "https://www.w3.org/ns/activitystreams" }));
		assert!(matches!(res, Err(ResolveError::MissingField("type"))));

		let (res, _) = resolve(vec![record_notes()], json!("Note"));
		assert!(matches!(res, Err(ResolveError::MissingField("type"))));
	}

	#[test]
	fn first_matching_callback_wins() {
		let second = Callback::on(|seen: &Seen, _: Note| {
			seen.borrow_mut().push("second".to_string());
			Ok(())
		});
		let (res, seen) = resolve(vec![record_notes(), second], json!({
			"@context": "https://www.w3.org/ns/activitystreams",
			"type": "Note",
		}));
		assert!(res.is_ok());
		assert_eq!(seen, vec!["note:"]);
	}

	#[test]
	fn deserialization_errors_are_fatal() {
		let mut registry = Registry::activitystreams();
		registry.register(TypeName::Note, |_, _, _| Err(crate::DeserializeError::MissingField("content")));
		let resolver = Resolver::new(&registry, vec![record_notes(), record_objects()]).expect("valid callbacks");
		let seen = Seen::default();
		let res = resolver.resolve_value(&seen, &json!({
			"@context": "https://www.w3.org/ns/activitystreams",
			"type": ["Note", "Object"],
		}));
		assert!(matches!(res, Err(ResolveError::Deserialize(_))));
		assert!(seen.borrow().is_empty());
	}

	#[test]
	fn callback_errors_are_surfaced() {
		let failing = Callback::on(|_: &Seen, _: Person| Err("not today".into()));
		let (res, _) = resolve(vec![failing], json!({
			"@context": "https://www.w3.org/ns/activitystreams",
			"type": "Person",
		}));
		assert!(matches!(res, Err(ResolveError::Callback(e)) if e.to_string() == "not today"));
	}

	#[test]
	fn unknown_callback_types_fail_construction() {
		let registry = Registry::activitystreams();
		let res = Resolver::<()>::new(&registry, vec![
			Callback::named("Hashtag", |_, _| Ok(())),
		]);
		assert!(matches!(res, Err(ResolveError::InvalidCallbackSignature(t)) if t == "Hashtag"));
	}

	#[test]
	fn named_callbacks_receive_entities() {
		let registry = Registry::activitystreams();
		let seen = RefCell::new(None);
		let resolver = Resolver::new(&registry, vec![
			Callback::named("Activity", |seen: &RefCell<Option<TypeName>>, entity: Entity| {
				*seen.borrow_mut() = Some(entity.type_name());
				Ok(())
			}),
		])
			.expect("valid callbacks");
		resolver
			.resolve_value(&seen, &json!({ "@context": "https://www.w3.org/ns/activitystreams", "type": "Activity" }))
			.expect("activity is handled");
		assert_eq!(seen.into_inner(), Some(TypeName::Activity));
	}

	#[test]
	fn normalization_is_opt_in() {
		let registry = Registry::activitystreams();
		let config: Config = toml::from_str("[resolver]\nnormalize = true").expect("valid config");
		let seen = RefCell::new(Vec::new());
		let resolver = Resolver::new(&registry, vec![
			Callback::on(|seen: &RefCell<Vec<Value>>, note: Note| {
				seen.borrow_mut().push(note.serialize()["to"].clone());
				Ok(())
			}),
		])
			.expect("valid callbacks")
			.with_config(&config);
		resolver
			.resolve_value(&seen, &json!({
				"@context": "https://www.w3.org/ns/activitystreams",
				"type": "Note",
				"to": ["https://example.org/b", "https://example.org/a"],
			}))
			.expect("note is handled");
		assert_eq!(seen.into_inner(), vec![json!(["https://example.org/a", "https://example.org/b"])]);
	}

	#[test]
	fn ld_output_resolves_again() {
		let registry = Registry::activitystreams();
		let out = RefCell::new(Vec::new());
		let resolver = Resolver::new(&registry, vec![
			Callback::on(|out: &RefCell<Vec<Value>>, note: Note| {
				out.borrow_mut().push(crate::LD::ld_context(&*note));
				Ok(())
			}),
		])
			.expect("valid callbacks");

		let doc = json!({
			"@context": { "as": "https://www.w3.org/TR/activitystreams-vocabulary" },
			"type": "as:Note",
			"as:content": "again",
		});
		resolver.resolve_value(&out, &doc).expect("aliased note is handled");
		let first = out.borrow()[0].clone();
		assert_eq!(first, doc);

		resolver.resolve_value(&out, &first).expect("printed note is handled too");
		assert_eq!(out.borrow()[1], first);
	}
}
