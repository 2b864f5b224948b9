mod macros;
pub use macros::TypeValueError;

mod error;
pub use error::{CallbackError, DeserializeError, ModelError, ResolveError};

mod config;
pub use config::{Config, ContextConfig, ResolverConfig};

pub mod jsonld;
pub use jsonld::{AliasMap, LD};

mod kind;
pub use kind::{Kind, Member};

pub mod property;
pub use property::{Cursor, PropertyCollection, PropertyDef, PropertyValue};

mod entity;
pub use entity::Entity;

pub mod vocab;
pub use vocab::{
	TypeName, Vocabulary,
	Object, Link, Accept, Activity, Add, Announce, Application, Arrive, Article, Audio, Block,
	Collection, CollectionPage, Create, Delete, Dislike, Document, Event, Flag, Follow, Group,
	Ignore, Image, IntransitiveActivity, Invite, Join, Leave, Like, Listen, Mention, Move, Note,
	Offer, OrderedCollection, OrderedCollectionPage, Organization, Page, Person, Place, Profile,
	Question, Read, Reject, Relationship, Remove, Service, TentativeAccept, TentativeReject,
	Tombstone, Travel, Undo, Update, Video, View,
};

mod registry;
pub use registry::{Deserializer, Registry};

mod resolver;
pub use resolver::{Callback, Resolver};
