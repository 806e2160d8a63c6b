//! crates/clog/src/tag.rs
//! Redaction markers wrapped around values embedded in log messages.

use std::fmt;
use std::str::FromStr;

/// Classification of a value for downstream redaction tooling.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentTag {
    /// Data owned by users (documents, keys, names).
    UserData,
    /// Data describing user data (bucket names, sizes).
    MetaData,
    /// Data describing the system (hosts, ports, paths).
    SystemData,
}

impl ContentTag {
    /// Returns the marker name, `ud`, `md` or `sd`.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::UserData => "ud",
            Self::MetaData => "md",
            Self::SystemData => "sd",
        }
    }

    /// Maps the numeric category codes 0, 1 and 2.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::UserData),
            1 => Some(Self::MetaData),
            2 => Some(Self::SystemData),
            _ => None,
        }
    }
}

impl fmt::Display for ContentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Error returned when a marker name is not `ud`, `md` or `sd`.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown content tag: {0:?}")]
pub struct ParseContentTagError(String);

impl FromStr for ContentTag {
    type Err = ParseContentTagError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "ud" => Ok(Self::UserData),
            "md" => Ok(Self::MetaData),
            "sd" => Ok(Self::SystemData),
            other => Err(ParseContentTagError(other.to_owned())),
        }
    }
}

/// Value rendered between `<tag>` and `</tag>` markers.
///
/// Without a category the value renders unmodified.
#[derive(Clone, Copy, Debug)]
pub struct Tagged<T> {
    category: Option<ContentTag>,
    value: T,
}

impl<T> Tagged<T> {
    /// Returns the category, if recognized.
    #[must_use]
    pub const fn category(&self) -> Option<ContentTag> {
        self.category
    }

    /// Returns the wrapped value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: fmt::Display> fmt::Display for Tagged<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Some(tag) => write!(f, "<{tag}>{}</{tag}>", self.value),
            None => self.value.fmt(f),
        }
    }
}

/// Wraps `value` in the markers of `category`.
///
/// # Examples
///
/// ```
/// use clog::{ContentTag, tag};
///
/// let line = format!("opened {}", tag(ContentTag::UserData, "secret.txt"));
/// assert_eq!(line, "opened <ud>secret.txt</ud>");
/// ```
pub fn tag<T: fmt::Display>(category: ContentTag, value: T) -> Tagged<T> {
    Tagged {
        category: Some(category),
        value,
    }
}

/// Wraps `value` using a numeric category code; unknown codes leave the value
/// unmodified.
pub fn tag_code<T: fmt::Display>(code: u8, value: T) -> Tagged<T> {
    Tagged {
        category: ContentTag::from_code(code),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_category_uses_its_marker() {
        assert_eq!(tag(ContentTag::UserData, "u").to_string(), "<ud>u</ud>");
        assert_eq!(tag(ContentTag::MetaData, 42).to_string(), "<md>42</md>");
        assert_eq!(
            tag(ContentTag::SystemData, "host:8091").to_string(),
            "<sd>host:8091</sd>"
        );
    }

    #[test]
    fn unknown_code_is_identity() {
        assert_eq!(tag_code(7, "raw").to_string(), "raw");
        assert_eq!(tag_code(7, "raw").category(), None);
        assert_eq!(tag_code(1, "m").to_string(), "<md>m</md>");
    }

    #[test]
    fn markers_parse_back() {
        for category in [
            ContentTag::UserData,
            ContentTag::MetaData,
            ContentTag::SystemData,
        ] {
            assert_eq!(category.marker().parse::<ContentTag>(), Ok(category));
        }
        assert!("xx".parse::<ContentTag>().is_err());
    }

    #[test]
    fn untagged_value_keeps_format_spec() {
        assert_eq!(format!("{:>5}", tag_code(9, "ab")), "   ab");
    }

    #[test]
    fn into_inner_returns_value() {
        assert_eq!(tag(ContentTag::UserData, 5u8).into_inner(), 5);
    }
}
