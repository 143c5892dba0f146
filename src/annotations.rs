//! Annotations link genes and gene products to GO terms
//!
//! This module contains the uniform [`Annotation`] record that every
//! format reader produces, the filter policy [`AnnotationOptions`] and
//! [`AnnoReader`], which turns filtered records into association maps.
//!
//! The underlying principle is the same for all formats:
//! - Each record links one [`DatabaseId`] to one GO term
//! - Qualifiers and evidence code decide if a record is used at all
//! - Records are reduced into gene → GO ([`Id2Gos`]) or GO → gene
//!   ([`Go2Ids`]) maps, optionally split by namespace

mod options;
mod reader;
mod record;

pub use options::{AnnotationOptions, Direction};
pub use reader::{invert, AnnoReader, Association, Go2Ids, Id2Gos};
pub use record::{
    Annotation, DatabaseId, Extension, Extensions, FormatDetails, GafDetails, Gene2GoDetails,
    GpadDetails, Qualifiers, Taxa, KNOWN_QUALIFIERS,
};
