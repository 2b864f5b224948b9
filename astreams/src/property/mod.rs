mod value;
pub use value::PropertyValue;
pub(crate) use value::Slot;

mod collection;
pub use collection::{Cursor, PropertyCollection};

use crate::Kind;

/// kind index of a value holding an IRI
pub const IRI_KIND_INDEX: i32 = -2;

/// kind index of an empty or unrecognized value
pub const NO_KIND_INDEX: i32 = -1;

/// static description of one vocabulary property
#[derive(Debug, PartialEq, Eq)]
pub struct PropertyDef {
	pub name: &'static str,
	/// accepted kinds, in declared order: this order drives both deserialization attempts and sorting
	pub kinds: &'static [Kind],
	/// functional properties hold at most one value
	pub functional: bool,
}

impl PropertyDef {
	pub fn allows(&self, kind: Kind) -> bool {
		self.kinds.contains(&kind)
	}

	pub fn kind_position(&self, kind: Kind) -> Option<usize> {
		self.kinds.iter().position(|k| *k == kind)
	}
}
