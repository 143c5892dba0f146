use std::collections::HashMap;

use crate::term::internal::GoTermInternal;
use crate::term::{GoGroup, GoTermId, GoTermIds, Namespace, Relationship};
use crate::{GoError, GoResult, Ontology};

/// The `GoTerm` represents a single term from the Gene Ontology
///
/// It is a cheap, copyable view into the [`Ontology`] and provides
/// access to the term's metadata and its position in the DAG.
#[derive(Debug, Clone, Copy)]
pub struct GoTerm<'a> {
    id: &'a GoTermId,
    name: &'a str,
    namespace: Namespace,
    parents: &'a GoGroup,
    all_parents: &'a GoGroup,
    children: &'a GoGroup,
    relationships: &'a HashMap<Relationship, GoGroup>,
    alt_ids: &'a GoGroup,
    depth: Option<usize>,
    level: Option<usize>,
    obsolete: bool,
    ontology: &'a Ontology,
}

impl<'a> GoTerm<'a> {
    /// Constructs a new [`GoTerm`]
    ///
    /// Alternate ids resolve to their main term.
    ///
    /// # Errors
    ///
    /// If the given [`GoTermId`] does not match an existing term
    /// it returns [`GoError::DoesNotExist`]
    pub fn try_new(ontology: &'a Ontology, term: GoTermId) -> GoResult<GoTerm<'a>> {
        let term = ontology.get(term).ok_or(GoError::DoesNotExist)?;
        Ok(GoTerm::new(ontology, term))
    }

    pub(crate) fn new(ontology: &'a Ontology, term: &'a GoTermInternal) -> GoTerm<'a> {
        GoTerm {
            id: term.id(),
            name: term.name(),
            namespace: term.namespace(),
            parents: term.parents(),
            all_parents: term.all_parents(),
            children: term.children(),
            relationships: term.relationships(),
            alt_ids: term.alt_ids(),
            depth: term.depth(),
            level: term.level(),
            obsolete: term.obsolete(),
            ontology,
        }
    }

    /// Returns the main [`GoTermId`] of the term
    ///
    /// e.g.: `GO:0008150`
    pub fn id(&self) -> &GoTermId {
        self.id
    }

    /// Returns the name of the term
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns the [`Namespace`] of the term
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Returns the length of the longest `is_a` path to the namespace root
    ///
    /// Root terms have a depth of `0`. The value is only meaningful after
    /// [`Ontology::create_cache`] and is `0` before.
    pub fn depth(&self) -> usize {
        self.depth.unwrap_or_default()
    }

    /// Returns the length of the shortest `is_a` path to the namespace root
    pub fn level(&self) -> usize {
        self.level.unwrap_or_default()
    }

    /// Returns `true` if the term is obsolete
    pub fn is_obsolete(&self) -> bool {
        self.obsolete
    }

    /// Returns the alternate ids that were merged into this term
    pub fn alt_ids(&self) -> &GoGroup {
        self.alt_ids
    }

    /// Returns the [`GoTermId`]s of the direct `is_a` parents
    pub fn parent_ids(&self) -> &GoGroup {
        self.parents
    }

    /// Returns the [`GoTermId`]s of all direct and indirect `is_a` parents
    pub fn all_parent_ids(&self) -> &GoGroup {
        self.all_parents
    }

    /// Returns the [`GoTermId`]s of the direct `is_a` children
    pub fn children_ids(&self) -> &GoGroup {
        self.children
    }

    /// Returns the targets of all outgoing edges of the given relationship type
    pub fn relationship_ids(&self, relationship: Relationship) -> Option<&GoGroup> {
        self.relationships.get(&relationship)
    }

    /// Returns an iterator of the direct `is_a` parents
    pub fn parents(&self) -> GoTerms<'a> {
        GoTerms::new(self.parents, self.ontology)
    }

    /// Returns an iterator of the direct `is_a` children
    pub fn children(&self) -> GoTerms<'a> {
        GoTerms::new(self.children, self.ontology)
    }

    /// Returns an iterator of all direct and indirect `is_a` parents
    pub fn all_parents(&self) -> GoTerms<'a> {
        GoTerms::new(self.all_parents, self.ontology)
    }

    /// Returns the [`GoTermId`]s that are `is_a` ancestors of both `self`
    /// **and** `other`
    ///
    /// A term counts as its own ancestor here, so if one term is an
    /// ancestor of the other, it is part of the result.
    pub fn common_ancestor_ids(&self, other: &GoTerm) -> GoGroup {
        let mut res = self.all_parent_ids() & other.all_parent_ids();

        if other.all_parent_ids().contains(self.id()) || self.id() == other.id() {
            res.insert(*self.id());
        }

        if self.all_parent_ids().contains(other.id()) {
            res.insert(*other.id());
        }

        res
    }

    /// Returns `true` if `self` is a child (direct or indirect) of `other`
    pub fn child_of(&self, other: &GoTerm) -> bool {
        self.all_parent_ids().contains(other.id())
    }

    /// Returns `true` if `self` is a parent (direct or indirect) of `other`
    pub fn parent_of(&self, other: &GoTerm) -> bool {
        other.child_of(self)
    }
}

impl PartialEq for GoTerm<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// An iterator of [`GoTerm`]s, created from the ids of a [`GoGroup`]
pub struct GoTerms<'a> {
    ids: GoTermIds<'a>,
    ontology: &'a Ontology,
}

impl<'a> GoTerms<'a> {
    pub(crate) fn new(group: &'a GoGroup, ontology: &'a Ontology) -> Self {
        GoTerms {
            ids: group.iter(),
            ontology,
        }
    }
}

impl<'a> Iterator for GoTerms<'a> {
    type Item = GoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        for id in self.ids.by_ref() {
            if let Some(term) = self.ontology.get(id) {
                return Some(GoTerm::new(self.ontology, term));
            }
        }
        None
    }
}

impl std::fmt::Debug for GoTerms<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoTerms")
    }
}
