#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid type value '{0}'")]
pub struct TypeValueError(pub String);

macro_rules! strenum {
	( $(#[$meta:meta])* pub enum $enum_name:ident { $($flat:ident),* $(,)? } ) => {
		$(#[$meta])*
		#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
		pub enum $enum_name {
			$($flat,)*
		}

		impl $enum_name {
			/// every variant, in declaration order
			pub const ALL: &'static [$enum_name] = &[$(Self::$flat,)*];

			pub fn as_str(&self) -> &'static str {
				match self {
					$(Self::$flat => stringify!($flat),)*
				}
			}
		}

		impl AsRef<str> for $enum_name {
			fn as_ref(&self) -> &str {
				self.as_str()
			}
		}

		impl std::fmt::Display for $enum_name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl TryFrom<&str> for $enum_name {
			type Error = $crate::macros::TypeValueError;

			fn try_from(value: &str) -> Result<Self, Self::Error> {
				match value {
					$(stringify!($flat) => Ok(Self::$flat),)*
					_ => Err($crate::macros::TypeValueError(value.to_string())),
				}
			}
		}
	};
}

pub(crate) use strenum;

/// builds the closed type set: the `TypeName` enum, one newtype per vocabulary type, and the
/// per-type accessors on property values and collections
macro_rules! vocabulary {
	( $($name:ident),* $(,)? ) => {
		$crate::macros::strenum! {
			/// every type of the ActivityStreams vocabulary
			pub enum TypeName { $($name),* }
		}

		/// every vocabulary type as a property kind, in declared order
		pub const ANY_TYPE: &[$crate::Kind] = &[$($crate::Kind::Type(TypeName::$name),)*];

		$(
			#[doc = concat!("ActivityStreams `", stringify!($name), "`")]
			#[derive(Debug, Clone, PartialEq)]
			pub struct $name($crate::Entity);

			impl $name {
				pub fn new() -> Self {
					Self($crate::Entity::new(TypeName::$name))
				}
			}

			impl Default for $name {
				fn default() -> Self {
					Self::new()
				}
			}

			impl $crate::vocab::Vocabulary for $name {
				const TYPE_NAME: TypeName = TypeName::$name;

				fn from_entity(entity: $crate::Entity) -> Result<Self, $crate::Entity> {
					if entity.type_name() == TypeName::$name {
						Ok(Self(entity))
					} else {
						Err(entity)
					}
				}

				fn into_entity(self) -> $crate::Entity {
					self.0
				}
			}

			impl std::ops::Deref for $name {
				type Target = $crate::Entity;

				fn deref(&self) -> &Self::Target {
					&self.0
				}
			}

			impl std::ops::DerefMut for $name {
				fn deref_mut(&mut self) -> &mut Self::Target {
					&mut self.0
				}
			}

			impl From<$name> for $crate::Member {
				fn from(value: $name) -> Self {
					$crate::Member::Type(Box::new(value.0))
				}
			}
		)*

		paste::paste! {
			impl $crate::PropertyValue {
				$(
					#[doc = concat!("true if this value holds a `", stringify!($name), "`")]
					pub fn [< is_ $name:snake >](&self) -> bool {
						self.is($crate::Kind::Type(TypeName::$name))
					}

					#[doc = concat!("the held `", stringify!($name), "`, if that is what this value holds")]
					pub fn [< get_ $name:snake >](&self) -> Option<&$crate::Entity> {
						self.get_type(TypeName::$name)
					}

					pub fn [< set_ $name:snake >](&mut self, value: $name) -> Result<(), $crate::ModelError> {
						self.set(value)
					}
				)*
			}

			impl $crate::PropertyCollection {
				$(
					pub fn [< append_ $name:snake >](&mut self, value: $name) -> Result<(), $crate::ModelError> {
						self.append(value)
					}

					pub fn [< prepend_ $name:snake >](&mut self, value: $name) -> Result<(), $crate::ModelError> {
						self.prepend(value)
					}

					pub fn [< insert_ $name:snake >](&mut self, index: usize, value: $name) -> Result<(), $crate::ModelError> {
						self.insert(index, value)
					}

					pub fn [< set_ $name:snake >](&mut self, index: usize, value: $name) -> Result<(), $crate::ModelError> {
						self.set(index, value)
					}
				)*
			}
		}
	};
}

pub(crate) use vocabulary;
