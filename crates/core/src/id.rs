//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a shopping list.
///
/// Ids are supplied by the caller on creation; the store never synthesises
/// one. A body without an id decodes to the default, `0`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(i64);

impl ListId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ListId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Parses only the canonical decimal rendering of an id.
///
/// `"7"` and `"-3"` parse; `"07"`, `"+7"` and `" 7"` do not, because no list
/// renders its id that way.
impl FromStr for ListId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = i64::from_str(s).map_err(|e| DomainError::invalid_id(format!("ListId: {e}")))?;
        if value.to_string() != s {
            return Err(DomainError::invalid_id(format!("ListId: non-canonical '{s}'")));
        }
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_decimal() {
        assert_eq!("42".parse::<ListId>().unwrap(), ListId::new(42));
        assert_eq!("-3".parse::<ListId>().unwrap(), ListId::new(-3));
        assert_eq!("0".parse::<ListId>().unwrap(), ListId::new(0));
    }

    #[test]
    fn rejects_non_canonical_forms() {
        for raw in ["07", "+7", " 7", "7 ", "", "seven", "-0", "1.0"] {
            let err = raw.parse::<ListId>().unwrap_err();
            assert!(matches!(err, DomainError::InvalidId(_)), "accepted {raw:?}");
        }
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&ListId::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: ListId = serde_json::from_str("5").unwrap();
        assert_eq!(back, ListId::new(5));
    }
}
