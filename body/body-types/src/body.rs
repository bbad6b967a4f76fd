//! Gender and body-type selectors handed off by the intake wizard.

use serde::{Deserialize, Serialize};

/// Gender selector choosing which measurement schema applies.
///
/// The two schemas may have disjoint or overlapping measurement names;
/// consumers must not assume a universal name set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male measurement schema.
    Male,
    /// Female measurement schema.
    Female,
}

impl Gender {
    /// All genders, in a stable order.
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    /// Returns the lowercase identifier used in asset paths and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Body-type tag selecting which pre-authored asset variant is loaded.
///
/// The tag participates in the shape code: each variant has a stable
/// one-character code used as the code prefix.
///
/// # Examples
///
/// ```
/// use body_types::BodyType;
///
/// assert_eq!(BodyType::Average.tag(), 'a');
/// assert_eq!(BodyType::from_tag('s'), Some(BodyType::Slim));
/// assert_eq!(BodyType::from_tag('x'), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    /// Average build (the default asset).
    #[default]
    Average,
    /// Fuller bust variant.
    Bust,
    /// Slim variant.
    Slim,
    /// Athletic variant.
    Athletic,
}

impl BodyType {
    /// All body types, in a stable order.
    pub const ALL: [Self; 4] = [Self::Average, Self::Bust, Self::Slim, Self::Athletic];

    /// Returns the lowercase identifier used in asset paths and payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Bust => "bust",
            Self::Slim => "slim",
            Self::Athletic => "athletic",
        }
    }

    /// Returns the one-character code tag for this body type.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Average => 'a',
            Self::Bust => 'b',
            Self::Slim => 's',
            Self::Athletic => 't',
        }
    }

    /// Looks up a body type from its code tag.
    ///
    /// Returns `None` for unknown tags.
    #[must_use]
    pub const fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'a' => Some(Self::Average),
            'b' => Some(Self::Bust),
            's' => Some(Self::Slim),
            't' => Some(Self::Athletic),
            _ => None,
        }
    }
}
