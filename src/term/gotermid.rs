use core::fmt::Debug;
use std::fmt::Display;

use crate::{GoError, GoResult, MAX_GO_ID_INTEGER};

/// The identifier of a GO term, e.g. `GO:0008150`
///
/// Internally the id is stored as the integer part only, so ids are
/// cheap to copy, hash and compare.
#[derive(Copy, Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GoTermId {
    inner: u32,
}

impl GoTermId {
    /// Constructs a [`GoTermId`] from its integer part
    ///
    /// # Examples
    ///
    /// ```
    /// use goassoc::GoTermId;
    ///
    /// let id = GoTermId::from_u32(8150);
    /// assert_eq!(id.to_string(), "GO:0008150");
    /// ```
    pub const fn from_u32(inner: u32) -> Self {
        Self { inner }
    }

    /// Returns the integer part of the id
    pub fn as_u32(&self) -> u32 {
        self.inner
    }

    /// Returns `true` if `s` is a well-formed GO id (`GO:` followed by 7 digits)
    ///
    /// # Examples
    ///
    /// ```
    /// use goassoc::GoTermId;
    ///
    /// assert!(GoTermId::is_valid("GO:0003993"));
    /// assert!(!GoTermId::is_valid("GO:3993"));
    /// assert!(!GoTermId::is_valid("go:0003993"));
    /// ```
    pub fn is_valid(s: &str) -> bool {
        s.len() == 10 && s.starts_with("GO:") && s[3..].bytes().all(|b| b.is_ascii_digit())
    }
}

impl TryFrom<&str> for GoTermId {
    type Error = GoError;
    /// Parses a GO id in the form `GO:0000000`
    ///
    /// # Errors
    ///
    /// [`GoError::InvalidGoId`] if the string is not a well-formed GO id
    fn try_from(s: &str) -> GoResult<Self> {
        if !GoTermId::is_valid(s) {
            return Err(GoError::InvalidGoId(s.to_string()));
        }
        let inner = s[3..].parse::<u32>()?;
        if inner > MAX_GO_ID_INTEGER {
            return Err(GoError::InvalidGoId(s.to_string()));
        }
        Ok(GoTermId { inner })
    }
}

impl From<u32> for GoTermId {
    fn from(inner: u32) -> Self {
        Self { inner }
    }
}

impl Debug for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoTermId({self})")
    }
}

impl Display for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GO:{:07}", self.inner)
    }
}

impl PartialEq<str> for GoTermId {
    fn eq(&self, other: &str) -> bool {
        GoTermId::try_from(other).map_or(false, |other| *self == other)
    }
}

impl PartialEq<&str> for GoTermId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_valid() {
        let id = GoTermId::try_from("GO:0003993").unwrap();
        assert_eq!(id.as_u32(), 3993);
        assert_eq!(id.to_string(), "GO:0003993");
        assert_eq!(id, "GO:0003993");
    }

    #[test]
    fn parse_invalid() {
        assert!(GoTermId::try_from("GO:000399").is_err());
        assert!(GoTermId::try_from("GO:00039934").is_err());
        assert!(GoTermId::try_from("HP:0003993").is_err());
        assert!(GoTermId::try_from("GO:000399A").is_err());
        assert!(GoTermId::try_from("").is_err());
    }

    #[test]
    fn ordering_follows_integer() {
        let a = GoTermId::from(5u32);
        let b = GoTermId::from(50u32);
        assert!(a < b);
        assert_ne!(GoTermId::from(5u32), "GO:0000050");
    }
}
