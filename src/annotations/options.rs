use std::collections::HashSet;

use crate::annotations::{Annotation, Qualifiers};
use crate::evidence::{self, EvidenceCode};
use crate::term::Relationships;
use crate::GoResult;

/// The direction of an association map
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Direction {
    /// gene → set of GO terms
    #[default]
    GeneToGo,
    /// GO term → set of genes
    GoToGene,
}

/// The filter policy that decides which annotations are kept
///
/// An annotation is kept if it passes two gates:
///
/// 1. **Qualifier and ND gate**: By default, negated annotations (qualifier
///    `NOT`) and annotations with evidence `ND` ("No biological Data") are
///    dropped. [`AnnotationOptions::with_keep_not`] and
///    [`AnnotationOptions::with_keep_nd`] each waive one of the two
///    conditions.
/// 2. **Evidence gate**: If an include and/or exclude list was set, the
///    evidence code must be part of the accepted codes. Lists can contain
///    codes and group names (e.g. `Experimental`). A code that is excluded
///    is never accepted, even if it is also included.
///
/// # Examples
///
/// ```
/// use goassoc::{AnnotationOptions, EvidenceCode};
/// use goassoc::annotations::Qualifiers;
///
/// let options = AnnotationOptions::default();
/// let not = Qualifiers::new(["NOT"]);
/// let ida = EvidenceCode::new("IDA");
///
/// assert!(!options.keep(&not, Some(&ida)));
///
/// let options = options.with_keep_not(true);
/// assert!(options.keep(&not, Some(&ida)));
///
/// let options = AnnotationOptions::default()
///     .with_evidence_include(["Experimental"]).unwrap()
///     .with_evidence_exclude(["IDA"]).unwrap();
/// assert!(!options.keep(&Qualifiers::default(), Some(&ida)));
/// assert!(options.keep(&Qualifiers::default(), Some(&EvidenceCode::new("IMP"))));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AnnotationOptions {
    evidence_include: Option<HashSet<EvidenceCode>>,
    evidence_exclude: Option<HashSet<EvidenceCode>>,
    accepted: Option<HashSet<EvidenceCode>>,
    keep_nd: bool,
    keep_not: bool,
    direction: Direction,
    propagate_counts: bool,
    relationships: Relationships,
}

impl AnnotationOptions {
    /// Only keep annotations with one of the evidence codes or groups
    ///
    /// # Errors
    ///
    /// [`crate::GoError::InvalidInput`] if an entry is neither a known
    /// evidence code nor a group name
    pub fn with_evidence_include<I, S>(mut self, items: I) -> GoResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.evidence_include = Some(evidence::expand(items)?);
        self.update_accepted();
        Ok(self)
    }

    /// Drop annotations with one of the evidence codes or groups
    ///
    /// # Errors
    ///
    /// [`crate::GoError::InvalidInput`] if an entry is neither a known
    /// evidence code nor a group name
    pub fn with_evidence_exclude<I, S>(mut self, items: I) -> GoResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.evidence_exclude = Some(evidence::expand(items)?);
        self.update_accepted();
        Ok(self)
    }

    /// Keep annotations with evidence `ND`
    #[must_use]
    pub fn with_keep_nd(mut self, keep_nd: bool) -> Self {
        self.keep_nd = keep_nd;
        self
    }

    /// Keep negated (`NOT`) annotations
    #[must_use]
    pub fn with_keep_not(mut self, keep_not: bool) -> Self {
        self.keep_not = keep_not;
        self
    }

    /// Sets the [`Direction`] of the produced association
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Propagate each annotation to all ancestors of the annotated term
    #[must_use]
    pub fn with_propagate_counts(mut self, propagate_counts: bool) -> Self {
        self.propagate_counts = propagate_counts;
        self
    }

    /// Relationship types to follow in addition to `is_a` when propagating
    #[must_use]
    pub fn with_relationships(mut self, relationships: Relationships) -> Self {
        self.relationships = relationships;
        self
    }

    /// Returns `true` if `ND` annotations are kept
    pub fn keep_nd(&self) -> bool {
        self.keep_nd
    }

    /// Returns `true` if `NOT` annotations are kept
    pub fn keep_not(&self) -> bool {
        self.keep_not
    }

    /// Returns the [`Direction`] of the association
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if annotations are propagated to ancestors
    pub fn propagate_counts(&self) -> bool {
        self.propagate_counts
    }

    /// Returns the relationship types followed during propagation
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Returns the accepted evidence codes
    ///
    /// `None` means that no evidence filter is set and every code
    /// passes the evidence gate.
    pub fn accepted_evidence(&self) -> Option<&HashSet<EvidenceCode>> {
        self.accepted.as_ref()
    }

    /// Decides if an annotation with the qualifiers and evidence is kept
    ///
    /// A record without evidence code fails the evidence gate whenever
    /// an evidence filter is set.
    pub fn keep(&self, qualifiers: &Qualifiers, evidence: Option<&EvidenceCode>) -> bool {
        if !self.keep_not && qualifiers.is_not() {
            return false;
        }
        if !self.keep_nd && evidence.map_or(false, EvidenceCode::is_nd) {
            return false;
        }
        match &self.accepted {
            None => true,
            Some(accepted) => evidence.map_or(false, |code| accepted.contains(code)),
        }
    }

    /// Shortcut for [`AnnotationOptions::keep`] on an [`Annotation`]
    pub fn keep_annotation(&self, annotation: &Annotation) -> bool {
        self.keep(&annotation.qualifiers, annotation.evidence_code.as_ref())
    }

    fn update_accepted(&mut self) {
        self.accepted =
            evidence::effective_set(self.evidence_include.as_ref(), self.evidence_exclude.as_ref());
    }
}
