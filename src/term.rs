//! [`GoTerm`]s are the nodes of the Gene Ontology DAG
//!
//! This module contains the id type [`GoTermId`], the set type [`GoGroup`],
//! the [`Namespace`] of a term and the [`Relationship`]s that connect
//! terms besides plain `is_a`.

use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;

use crate::{GoError, GoResult, BP_ROOT, CC_ROOT, MF_ROOT};

mod goterm;
mod gotermid;
mod group;
pub(crate) mod internal;

pub use goterm::GoTerm;
pub use gotermid::GoTermId;
pub use group::{GoGroup, GoTermIds};

/// The three sub-ontologies of GO
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Namespace {
    /// `biological_process`
    BP,
    /// `molecular_function`
    MF,
    /// `cellular_component`
    CC,
}

impl Namespace {
    /// All namespaces, in the usual `BP`, `MF`, `CC` order
    pub const ALL: [Namespace; 3] = [Namespace::BP, Namespace::MF, Namespace::CC];

    /// Returns the long name used in OBO files, e.g. `biological_process`
    pub fn long_name(&self) -> &'static str {
        match self {
            Namespace::BP => "biological_process",
            Namespace::MF => "molecular_function",
            Namespace::CC => "cellular_component",
        }
    }

    /// Returns the root term of the namespace
    pub fn root(&self) -> GoTermId {
        match self {
            Namespace::BP => BP_ROOT,
            Namespace::MF => MF_ROOT,
            Namespace::CC => CC_ROOT,
        }
    }

    /// Parses the single letter GAF aspect (`P`, `F` or `C`)
    ///
    /// # Examples
    ///
    /// ```
    /// use goassoc::Namespace;
    ///
    /// assert_eq!(Namespace::from_aspect("F"), Some(Namespace::MF));
    /// assert_eq!(Namespace::from_aspect("X"), None);
    /// ```
    pub fn from_aspect(aspect: &str) -> Option<Self> {
        match aspect {
            "P" => Some(Namespace::BP),
            "F" => Some(Namespace::MF),
            "C" => Some(Namespace::CC),
            _ => None,
        }
    }

    /// Parses the `Category` column of NCBI's `gene2go`
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            "Process" => Some(Namespace::BP),
            "Function" => Some(Namespace::MF),
            "Component" => Some(Namespace::CC),
            _ => None,
        }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let abbr = match self {
            Namespace::BP => "BP",
            Namespace::MF => "MF",
            Namespace::CC => "CC",
        };
        write!(f, "{abbr}")
    }
}

impl FromStr for Namespace {
    type Err = GoError;
    /// Accepts the abbreviation (`BP`) or the long name (`biological_process`)
    fn from_str(s: &str) -> GoResult<Self> {
        match s {
            "BP" | "biological_process" => Ok(Namespace::BP),
            "MF" | "molecular_function" => Ok(Namespace::MF),
            "CC" | "cellular_component" => Ok(Namespace::CC),
            _ => Err(GoError::InvalidInput(format!("unknown namespace {s}"))),
        }
    }
}

/// Typed edges between GO terms other than `is_a`
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Relationship {
    /// `part_of`
    PartOf,
    /// `regulates`
    Regulates,
    /// `positively_regulates`
    PositivelyRegulates,
    /// `negatively_regulates`
    NegativelyRegulates,
    /// `occurs_in`
    OccursIn,
    /// `has_part`
    HasPart,
    /// `happens_during`
    HappensDuring,
    /// `ends_during`
    EndsDuring,
}

impl Relationship {
    /// Every relationship type known to the crate
    pub const ALL: [Relationship; 8] = [
        Relationship::PartOf,
        Relationship::Regulates,
        Relationship::PositivelyRegulates,
        Relationship::NegativelyRegulates,
        Relationship::OccursIn,
        Relationship::HasPart,
        Relationship::HappensDuring,
        Relationship::EndsDuring,
    ];

    /// Returns the OBO name of the relationship, e.g. `part_of`
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::PartOf => "part_of",
            Relationship::Regulates => "regulates",
            Relationship::PositivelyRegulates => "positively_regulates",
            Relationship::NegativelyRegulates => "negatively_regulates",
            Relationship::OccursIn => "occurs_in",
            Relationship::HasPart => "has_part",
            Relationship::HappensDuring => "happens_during",
            Relationship::EndsDuring => "ends_during",
        }
    }

    /// Returns a set containing every relationship type
    pub fn all() -> Relationships {
        Relationship::ALL.into_iter().collect()
    }
}

impl Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = GoError;
    fn from_str(s: &str) -> GoResult<Self> {
        Relationship::ALL
            .into_iter()
            .find(|rel| rel.as_str() == s)
            .ok_or_else(|| GoError::InvalidInput(format!("unknown relationship {s}")))
    }
}

/// A set of [`Relationship`] types to follow in addition to `is_a`
///
/// An empty set means "`is_a` only".
pub type Relationships = HashSet<Relationship>;
