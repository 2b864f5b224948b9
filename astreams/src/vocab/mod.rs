pub mod props;

use crate::{Entity, PropertyDef};

crate::macros::vocabulary! {
	Object,
	Link,
	Accept,
	Activity,
	Add,
	Announce,
	Application,
	Arrive,
	Article,
	Audio,
	Block,
	Collection,
	CollectionPage,
	Create,
	Delete,
	Dislike,
	Document,
	Event,
	Flag,
	Follow,
	Group,
	Ignore,
	Image,
	IntransitiveActivity,
	Invite,
	Join,
	Leave,
	Like,
	Listen,
	Mention,
	Move,
	Note,
	Offer,
	OrderedCollection,
	OrderedCollectionPage,
	Organization,
	Page,
	Person,
	Place,
	Profile,
	Question,
	Read,
	Reject,
	Relationship,
	Remove,
	Service,
	TentativeAccept,
	TentativeReject,
	Tombstone,
	Travel,
	Undo,
	Update,
	Video,
	View,
}

/// a typed view over an [`Entity`] of one fixed vocabulary type
pub trait Vocabulary: Sized + std::ops::Deref<Target = Entity> {
	const TYPE_NAME: TypeName;

	/// gives the entity back untouched if it holds a different type
	fn from_entity(entity: Entity) -> Result<Self, Entity>;

	fn into_entity(self) -> Entity;
}

impl TypeName {
	/// property groups declared by this type, inherited ones included
	pub fn property_groups(self) -> &'static [&'static [&'static PropertyDef]] {
		use props::*;
		match self {
			TypeName::Link | TypeName::Mention => &[LINK_PROPERTIES],

			TypeName::Object
			| TypeName::Article
			| TypeName::Audio
			| TypeName::Document
			| TypeName::Event
			| TypeName::Image
			| TypeName::Note
			| TypeName::Page
			| TypeName::Video => &[OBJECT_PROPERTIES],

			TypeName::Application
			| TypeName::Group
			| TypeName::Organization
			| TypeName::Person
			| TypeName::Service => &[OBJECT_PROPERTIES, ACTOR_PROPERTIES],

			TypeName::IntransitiveActivity
			| TypeName::Arrive
			| TypeName::Travel => &[OBJECT_PROPERTIES, ACTIVITY_PROPERTIES],

			TypeName::Question => &[OBJECT_PROPERTIES, ACTIVITY_PROPERTIES, QUESTION_PROPERTIES],

			TypeName::Activity
			| TypeName::Accept
			| TypeName::Add
			| TypeName::Announce
			| TypeName::Block
			| TypeName::Create
			| TypeName::Delete
			| TypeName::Dislike
			| TypeName::Flag
			| TypeName::Follow
			| TypeName::Ignore
			| TypeName::Invite
			| TypeName::Join
			| TypeName::Leave
			| TypeName::Like
			| TypeName::Listen
			| TypeName::Move
			| TypeName::Offer
			| TypeName::Read
			| TypeName::Reject
			| TypeName::Remove
			| TypeName::TentativeAccept
			| TypeName::TentativeReject
			| TypeName::Undo
			| TypeName::Update
			| TypeName::View => &[OBJECT_PROPERTIES, ACTIVITY_PROPERTIES, TRANSITIVE_PROPERTIES],

			TypeName::Collection => &[OBJECT_PROPERTIES, COLLECTION_PROPERTIES, ITEMS_PROPERTIES],
			TypeName::OrderedCollection => &[OBJECT_PROPERTIES, COLLECTION_PROPERTIES, ORDERED_ITEMS_PROPERTIES],
			TypeName::CollectionPage => &[OBJECT_PROPERTIES, COLLECTION_PROPERTIES, ITEMS_PROPERTIES, PAGE_PROPERTIES],
			TypeName::OrderedCollectionPage => &[
				OBJECT_PROPERTIES,
				COLLECTION_PROPERTIES,
				ORDERED_ITEMS_PROPERTIES,
				PAGE_PROPERTIES,
				ORDERED_PAGE_PROPERTIES,
			],

			TypeName::Place => &[OBJECT_PROPERTIES, PLACE_PROPERTIES],
			TypeName::Profile => &[OBJECT_PROPERTIES, PROFILE_PROPERTIES],
			TypeName::Relationship => &[OBJECT_PROPERTIES, RELATIONSHIP_PROPERTIES],
			TypeName::Tombstone => &[OBJECT_PROPERTIES, TOMBSTONE_PROPERTIES],
		}
	}

	pub fn properties(self) -> impl Iterator<Item = &'static PropertyDef> {
		self.property_groups().iter().flat_map(|group| group.iter().copied())
	}

	pub fn property(self, name: &str) -> Option<&'static PropertyDef> {
		self.properties().find(|p| p.name == name)
	}
}

#[cfg(test)]
mod test {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn type_names_round_trip_through_strings() {
		for t in TypeName::ALL {
			assert_eq!(TypeName::try_from(t.as_str()), Ok(*t));
		}
		assert_eq!(TypeName::ALL.len(), 54);
		assert!(TypeName::try_from("Hashtag").is_err());
		assert_eq!(TypeName::OrderedCollectionPage.to_string(), "OrderedCollectionPage");
	}

	#[test]
	fn no_type_declares_a_property_twice() {
		for t in TypeName::ALL {
			let mut seen = HashSet::new();
			for p in t.properties() {
				assert!(seen.insert(p.name), "{t} declares '{}' twice", p.name);
			}
			assert!(t.property("id").is_some(), "{t} has no id");
		}
	}

	#[test]
	fn families_pick_their_groups() {
		assert!(TypeName::Follow.property("object").is_some());
		assert!(TypeName::Arrive.property("object").is_none());
		assert!(TypeName::Person.property("inbox").is_some());
		assert!(TypeName::Note.property("inbox").is_none());
		assert!(TypeName::Mention.property("href").is_some());
		assert!(TypeName::Mention.property("content").is_none());
		assert!(TypeName::OrderedCollectionPage.property("startIndex").is_some());
	}

	#[test]
	fn typed_views_only_wrap_their_own_type() {
		let note = Note::new();
		assert_eq!(note.type_name(), TypeName::Note);
		let entity = note.into_entity();
		let entity = Person::from_entity(entity).expect_err("a note is not a person");
		assert!(Note::from_entity(entity).is_ok());
	}
}
