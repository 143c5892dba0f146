//! `goassoc` reads Gene Ontology annotation files and turns them into
//! gene ↔ GO term associations, term counts and information content.
//!
//! The pipeline is:
//!
//! 1. A format reader ([`parser::gaf::GafReader`], [`parser::gpad::GpadReader`],
//!    [`parser::gene2go::Gene2GoReader`] or [`parser::id2gos::IdToGosReader`])
//!    turns a file into uniform [`Annotation`] records.
//! 2. [`AnnoReader`] filters the records through [`AnnotationOptions`],
//!    splits them by [`Namespace`] and folds them into gene → GO maps,
//!    optionally propagating every annotation to all ancestor terms.
//! 3. [`TermCounts`] counts the genes annotated to every term of the
//!    [`Ontology`] (directly or through a descendant) and derives the
//!    information content used by [`similarity`].
//!
//! # Examples
//!
//! ```
//! use goassoc::{AnnoReader, AnnotationOptions, Namespace, Ontology, Relationships, TermCounts};
//! use goassoc::parser::id2gos::IdToGosReader;
//! use goassoc::parser::AnnotationSource;
//!
//! let mut ontology = Ontology::default();
//! ontology.insert_term(8150u32, "biological_process", Namespace::BP);
//! ontology.insert_term(1u32, "child a", Namespace::BP);
//! ontology.insert_term(2u32, "child b", Namespace::BP);
//! ontology.add_parent(8150u32, 1u32).unwrap();
//! ontology.add_parent(8150u32, 2u32).unwrap();
//! ontology.create_cache();
//!
//! let data = "geneA\tGO:0000001;GO:0000002\ngeneB\tGO:0000002\n";
//! let annotations = IdToGosReader::default()
//!     .parse(&mut data.as_bytes(), "memory")
//!     .unwrap();
//!
//! let reader = AnnoReader::new(annotations).with_godag(&ontology);
//! let id2gos = reader.get_id2gos(None, &AnnotationOptions::default()).unwrap();
//!
//! let counts = TermCounts::new(&ontology, &id2gos, &Relationships::new());
//! assert_eq!(counts.get_count(8150u32), 2);
//! assert_eq!(counts.get_count(1u32), 1);
//! ```

use core::fmt::Debug;
use std::num::ParseIntError;
use thiserror::Error;

pub mod annotations;
pub mod evidence;
pub mod parser;
pub mod similarity;
pub mod term;
pub mod termcounts;
mod ontology;

pub use annotations::{AnnoReader, Annotation, AnnotationOptions, DatabaseId, Direction};
pub use evidence::EvidenceCode;
pub use ontology::Ontology;
pub use parser::{AnnotationSource, Annotations};
pub use term::{GoGroup, GoTerm, GoTermId, Namespace, Relationship, Relationships};
pub use termcounts::TermCounts;

const DEFAULT_NUM_PARENTS: usize = 4;
const DEFAULT_NUM_ALL_PARENTS: usize = 30;
const MAX_GO_ID_INTEGER: u32 = 9_999_999;

/// Root term of the `biological_process` namespace
pub const BP_ROOT: GoTermId = GoTermId::from_u32(8150);
/// Root term of the `molecular_function` namespace
pub const MF_ROOT: GoTermId = GoTermId::from_u32(3674);
/// Root term of the `cellular_component` namespace
pub const CC_ROOT: GoTermId = GoTermId::from_u32(5575);

/// Main Error type for this crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GoError {
    /// The term, gene or record does not exist
    #[error("term does not exist")]
    DoesNotExist,
    /// Parsing an integer failed
    #[error("unable to parse Integer")]
    ParseIntError,
    /// A string does not describe a valid GO term id (`GO:0000000`)
    #[error("invalid GO term id: {0}")]
    InvalidGoId(String),
    /// Input data is not structured the way it should be
    #[error("invalid input data: {0}")]
    InvalidInput(String),
    /// The file could not be opened
    #[error("cannot open file {0}")]
    CannotOpenFile(String),
    /// Reading from the underlying source failed mid-stream
    #[error("unable to read {0}")]
    Io(String),
    /// A data line does not have the number of columns required by the
    /// declared format version. This aborts the whole parse.
    #[error(
        "{file}:{line_no}: expected {expected} columns, found {found}: {line}"
    )]
    ColumnCount {
        /// Name of the parsed file or stream
        file: String,
        /// 1-based line number
        line_no: usize,
        /// Number of columns of the format version
        expected: usize,
        /// Number of columns in the line
        found: usize,
        /// The raw line
        line: String,
    },
    /// An operation needs the GO DAG but none was supplied
    #[error("a GO DAG is required to {0}")]
    MissingGoDag(String),
}

impl From<ParseIntError> for GoError {
    fn from(_: ParseIntError) -> Self {
        GoError::ParseIntError
    }
}

/// Shortcut for `Result<T, GoError>`
pub type GoResult<T> = Result<T, GoError>;
