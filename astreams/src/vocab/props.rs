use crate::{Kind, PropertyDef};

use super::{TypeName, ANY_TYPE};

const fn t(name: TypeName) -> Kind {
	Kind::Type(name)
}

const NONE: &[Kind] = &[];
const STRING: &[Kind] = &[Kind::String];
const DATE_TIME: &[Kind] = &[Kind::DateTime];
const FLOAT: &[Kind] = &[Kind::Float];
const NON_NEGATIVE_INTEGER: &[Kind] = &[Kind::NonNegativeInteger];
const CLOSED_KINDS: &[Kind] = &[Kind::DateTime, Kind::Boolean];
const IMAGE_KINDS: &[Kind] = &[t(TypeName::Image), t(TypeName::Link), t(TypeName::Mention)];
const LINK_KINDS: &[Kind] = &[t(TypeName::Link), t(TypeName::Mention)];
const ORDERED_COLLECTION_KINDS: &[Kind] = &[t(TypeName::OrderedCollection), t(TypeName::OrderedCollectionPage)];
const COLLECTION_KINDS: &[Kind] = &[
	t(TypeName::Collection),
	t(TypeName::CollectionPage),
	t(TypeName::OrderedCollection),
	t(TypeName::OrderedCollectionPage),
];
const PAGE_KINDS: &[Kind] = &[
	t(TypeName::CollectionPage),
	t(TypeName::Link),
	t(TypeName::Mention),
	t(TypeName::OrderedCollectionPage),
];
const PART_OF_KINDS: &[Kind] = &[
	t(TypeName::Collection),
	t(TypeName::CollectionPage),
	t(TypeName::Link),
	t(TypeName::Mention),
	t(TypeName::OrderedCollection),
	t(TypeName::OrderedCollectionPage),
];

macro_rules! property {
	($konst:ident, $name:literal, $kinds:expr) => {
		pub const $konst: PropertyDef = PropertyDef { name: $name, kinds: $kinds, functional: false };
	};
	($konst:ident, $name:literal, $kinds:expr, functional) => {
		pub const $konst: PropertyDef = PropertyDef { name: $name, kinds: $kinds, functional: true };
	};
}

// ids and hrefs only ever hold IRIs
property!(ID, "id", NONE, functional);
property!(HREF, "href", NONE, functional);

property!(ACCURACY, "accuracy", FLOAT, functional);
property!(ACTOR, "actor", ANY_TYPE);
property!(ALTITUDE, "altitude", FLOAT, functional);
property!(ANY_OF, "anyOf", ANY_TYPE);
property!(ATTACHMENT, "attachment", ANY_TYPE);
property!(ATTRIBUTED_TO, "attributedTo", ANY_TYPE);
property!(AUDIENCE, "audience", ANY_TYPE);
property!(BCC, "bcc", ANY_TYPE);
property!(BTO, "bto", ANY_TYPE);
property!(CC, "cc", ANY_TYPE);
property!(CLOSED, "closed", CLOSED_KINDS);
property!(CONTENT, "content", STRING);
property!(CONTEXT, "context", ANY_TYPE);
property!(CURRENT, "current", PAGE_KINDS, functional);
property!(DELETED, "deleted", DATE_TIME, functional);
property!(DESCRIBES, "describes", ANY_TYPE, functional);
property!(END_TIME, "endTime", DATE_TIME, functional);
property!(FIRST, "first", PAGE_KINDS, functional);
property!(FOLLOWERS, "followers", COLLECTION_KINDS, functional);
property!(FOLLOWING, "following", COLLECTION_KINDS, functional);
property!(FORMER_TYPE, "formerType", STRING);
property!(GENERATOR, "generator", ANY_TYPE);
property!(HEIGHT, "height", NON_NEGATIVE_INTEGER, functional);
property!(HREFLANG, "hreflang", STRING, functional);
property!(ICON, "icon", IMAGE_KINDS);
property!(IMAGE, "image", IMAGE_KINDS);
property!(INBOX, "inbox", ORDERED_COLLECTION_KINDS, functional);
property!(IN_REPLY_TO, "inReplyTo", ANY_TYPE);
property!(INSTRUMENT, "instrument", ANY_TYPE);
property!(ITEMS, "items", ANY_TYPE);
property!(LAST, "last", PAGE_KINDS, functional);
property!(LATITUDE, "latitude", FLOAT, functional);
property!(LIKED, "liked", COLLECTION_KINDS, functional);
property!(LIKES, "likes", COLLECTION_KINDS, functional);
property!(LOCATION, "location", ANY_TYPE);
property!(LONGITUDE, "longitude", FLOAT, functional);
property!(MEDIA_TYPE, "mediaType", STRING, functional);
property!(NAME, "name", STRING);
property!(NEXT, "next", PAGE_KINDS, functional);
property!(OBJECT, "object", ANY_TYPE);
property!(ONE_OF, "oneOf", ANY_TYPE);
property!(ORDERED_ITEMS, "orderedItems", ANY_TYPE);
property!(ORIGIN, "origin", ANY_TYPE);
property!(OUTBOX, "outbox", ORDERED_COLLECTION_KINDS, functional);
property!(PART_OF, "partOf", PART_OF_KINDS, functional);
property!(PREFERRED_USERNAME, "preferredUsername", STRING, functional);
property!(PREV, "prev", PAGE_KINDS, functional);
property!(PREVIEW, "preview", ANY_TYPE);
property!(PUBLISHED, "published", DATE_TIME, functional);
property!(RADIUS, "radius", FLOAT, functional);
property!(REL, "rel", STRING);
property!(RELATIONSHIP, "relationship", ANY_TYPE);
property!(REPLIES, "replies", COLLECTION_KINDS, functional);
property!(RESULT, "result", ANY_TYPE);
property!(SHARES, "shares", COLLECTION_KINDS, functional);
property!(START_INDEX, "startIndex", NON_NEGATIVE_INTEGER, functional);
property!(START_TIME, "startTime", DATE_TIME, functional);
property!(SUBJECT, "subject", ANY_TYPE, functional);
property!(SUMMARY, "summary", STRING);
property!(TAG, "tag", ANY_TYPE);
property!(TARGET, "target", ANY_TYPE);
property!(TO, "to", ANY_TYPE);
property!(TOTAL_ITEMS, "totalItems", NON_NEGATIVE_INTEGER, functional);
property!(UNITS, "units", STRING, functional);
property!(UPDATED, "updated", DATE_TIME, functional);
property!(URL, "url", LINK_KINDS);
property!(WIDTH, "width", NON_NEGATIVE_INTEGER, functional);

pub const OBJECT_PROPERTIES: &[&PropertyDef] = &[
	&ID, &ATTACHMENT, &ATTRIBUTED_TO, &AUDIENCE, &BCC, &BTO, &CC, &CONTENT, &CONTEXT, &END_TIME,
	&GENERATOR, &ICON, &IMAGE, &IN_REPLY_TO, &LIKES, &LOCATION, &MEDIA_TYPE, &NAME, &PREVIEW,
	&PUBLISHED, &REPLIES, &SHARES, &START_TIME, &SUMMARY, &TAG, &TO, &UPDATED, &URL,
];

pub const LINK_PROPERTIES: &[&PropertyDef] = &[
	&ID, &HREF, &HEIGHT, &HREFLANG, &MEDIA_TYPE, &NAME, &PREVIEW, &REL, &WIDTH,
];

pub const ACTIVITY_PROPERTIES: &[&PropertyDef] = &[&ACTOR, &INSTRUMENT, &ORIGIN, &RESULT, &TARGET];

pub const TRANSITIVE_PROPERTIES: &[&PropertyDef] = &[&OBJECT];

pub const QUESTION_PROPERTIES: &[&PropertyDef] = &[&ANY_OF, &CLOSED, &ONE_OF];

pub const ACTOR_PROPERTIES: &[&PropertyDef] = &[
	&FOLLOWERS, &FOLLOWING, &INBOX, &LIKED, &OUTBOX, &PREFERRED_USERNAME,
];

pub const COLLECTION_PROPERTIES: &[&PropertyDef] = &[&CURRENT, &FIRST, &LAST, &TOTAL_ITEMS];

pub const ITEMS_PROPERTIES: &[&PropertyDef] = &[&ITEMS];

pub const ORDERED_ITEMS_PROPERTIES: &[&PropertyDef] = &[&ORDERED_ITEMS];

pub const PAGE_PROPERTIES: &[&PropertyDef] = &[&NEXT, &PART_OF, &PREV];

pub const ORDERED_PAGE_PROPERTIES: &[&PropertyDef] = &[&START_INDEX];

pub const PLACE_PROPERTIES: &[&PropertyDef] = &[
	&ACCURACY, &ALTITUDE, &LATITUDE, &LONGITUDE, &RADIUS, &UNITS,
];

pub const PROFILE_PROPERTIES: &[&PropertyDef] = &[&DESCRIBES];

pub const RELATIONSHIP_PROPERTIES: &[&PropertyDef] = &[&OBJECT, &RELATIONSHIP, &SUBJECT];

pub const TOMBSTONE_PROPERTIES: &[&PropertyDef] = &[&DELETED, &FORMER_TYPE];
