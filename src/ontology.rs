use core::fmt::Debug;
use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, trace};

use crate::term::internal::GoTermInternal;
use crate::term::{GoGroup, GoTerm, Namespace, Relationship, Relationships};
use crate::{GoError, GoResult, GoTermId};

mod termarena;
use termarena::Arena;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `Ontology` is the GO DAG that annotations are resolved against
///
/// It stores every [`GoTerm`] together with its `is_a` parents, typed
/// relationship edges ([`Relationship`]), alternate ids and the obsolete
/// flag. It answers the questions the rest of the crate asks about terms:
/// the namespace of a term, its depth, and the closure of its ancestors
/// along `is_a` and an optional set of relationship types.
///
/// # Examples
///
/// ```
/// use goassoc::{Namespace, Ontology, Relationship, Relationships};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term(8150u32, "biological_process", Namespace::BP);
/// ontology.insert_term(1u32, "Foo", Namespace::BP);
/// ontology.insert_term(2u32, "Bar", Namespace::BP);
/// ontology.insert_term(3u32, "Baz", Namespace::BP);
///
/// ontology.add_parent(8150u32, 1u32).unwrap();
/// ontology.add_parent(8150u32, 2u32).unwrap();
/// ontology.add_parent(1u32, 3u32).unwrap();
/// ontology.add_relationship(3u32, Relationship::PartOf, 2u32).unwrap();
/// ontology.create_cache();
///
/// let term = ontology.term(3u32).unwrap();
/// assert_eq!(term.depth(), 2);
///
/// let is_a = ontology.ancestors(3u32, &Relationships::new()).unwrap();
/// assert_eq!(is_a.len(), 2);
///
/// let part_of: Relationships = [Relationship::PartOf].into_iter().collect();
/// let with_part_of = ontology.ancestors(3u32, &part_of).unwrap();
/// assert_eq!(with_part_of.len(), 3);
/// ```
///
/// # Construction
///
/// Parsing OBO files is not part of this crate. The DAG is built
/// step by step:
///
/// 1. construct an empty Ontology [`Ontology::default`]
/// 2. Add all terms [`Ontology::insert_term`]
/// 3. Connect terms to their parents [`Ontology::add_parent`] and
///     add other edges with [`Ontology::add_relationship`]
/// 4. Register merged ids [`Ontology::add_alt_id`] and mark retired
///     terms [`Ontology::set_obsolete`]
/// 5. Cache all ancestors, depth and level [`Ontology::create_cache`]
///
/// # Layout
///
/// ```mermaid
/// erDiagram
///     ONTOLOGY ||--|{ GOTERM : contains
///     GOTERM ||--|{ GOTERM : is_a
///     GOTERM }o--o{ GOTERM : relationship
///     GOTERM ||--o{ ALTID : merged
///     GOTERM {
///         GoTermId id
///         str name
///         Namespace namespace
///         GoGroup parents
///         GoGroup all_parents
///         usize depth
///         usize level
///         bool obsolete
///     }
///     ALTID {
///         GoTermId id
///     }
/// ```
#[derive(Default)]
pub struct Ontology {
    go_terms: Arena,
    cache_valid: bool,
}

impl Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ontology with {} terms", self.go_terms.len())
    }
}

/// Public API of the Ontology
impl Ontology {
    /// Returns the number of terms in the Ontology
    ///
    /// Alternate ids are not counted
    pub fn len(&self) -> usize {
        self.go_terms.len()
    }

    /// Returns `true` if the Ontology does not contain any terms
    ///
    /// # Examples
    ///
    /// ```
    /// use goassoc::Ontology;
    /// let ontology = Ontology::default();
    /// assert!(ontology.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the id is a main id or an alternate id of a term
    pub fn contains<I: Into<GoTermId>>(&self, term_id: I) -> bool {
        self.go_terms.main_id(term_id.into()).is_some()
    }

    /// Returns the [`GoTerm`] of the provided [`GoTermId`]
    ///
    /// Alternate ids resolve to their main term. If no such term is
    /// present, `None` is returned.
    pub fn term<I: Into<GoTermId>>(&self, term_id: I) -> Option<GoTerm<'_>> {
        GoTerm::try_new(self, term_id.into()).ok()
    }

    /// Returns an Iterator of all [`GoTerm`]s of the Ontology
    pub fn terms(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Returns the main id of a term
    ///
    /// This is the id itself for main ids, the merged term for
    /// alternate ids and `None` for unknown ids.
    ///
    /// # Examples
    ///
    /// ```
    /// use goassoc::{GoTermId, Namespace, Ontology};
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term(1u32, "Foo", Namespace::CC);
    /// ontology.add_alt_id(1u32, 99u32).unwrap();
    ///
    /// assert_eq!(ontology.main_id(99u32), Some(GoTermId::from(1u32)));
    /// assert_eq!(ontology.main_id(1u32), Some(GoTermId::from(1u32)));
    /// assert_eq!(ontology.main_id(2u32), None);
    /// ```
    pub fn main_id<I: Into<GoTermId>>(&self, term_id: I) -> Option<GoTermId> {
        self.go_terms.main_id(term_id.into())
    }

    /// Returns an iterator of `(alternate id, main id)` pairs
    pub fn alt_ids(&self) -> impl Iterator<Item = (GoTermId, GoTermId)> + '_ {
        self.go_terms.alt_ids().iter().map(|(alt, main)| (*alt, *main))
    }

    /// Returns the [`Namespace`] of the term
    pub fn namespace<I: Into<GoTermId>>(&self, term_id: I) -> Option<Namespace> {
        self.get(term_id).map(GoTermInternal::namespace)
    }

    /// Returns the depth (longest `is_a` path to the root) of the term
    ///
    /// `None` if the term is unknown or [`Ontology::create_cache`] was
    /// not called yet.
    pub fn depth<I: Into<GoTermId>>(&self, term_id: I) -> Option<usize> {
        self.get(term_id).and_then(GoTermInternal::depth)
    }

    /// Returns `true` if the term is marked as obsolete
    pub fn is_obsolete<I: Into<GoTermId>>(&self, term_id: I) -> Option<bool> {
        self.get(term_id).map(GoTermInternal::obsolete)
    }

    /// Returns all ancestors of the term
    ///
    /// Ancestors are the terms reachable via `is_a` edges and via every
    /// edge whose type is in `relationships`. The term itself is not
    /// part of the result. Alternate ids resolve to the main term.
    ///
    /// Returns `None` if the term does not exist.
    pub fn ancestors<I: Into<GoTermId>>(
        &self,
        term_id: I,
        relationships: &Relationships,
    ) -> Option<GoGroup> {
        let term = self.get(term_id)?;
        if relationships.is_empty() && self.cache_valid {
            return Some(term.all_parents().clone());
        }

        let mut seen: HashSet<GoTermId> = HashSet::new();
        let mut queue: VecDeque<GoTermId> = VecDeque::new();
        self.enqueue_edges(term, relationships, &mut queue);

        while let Some(next) = queue.pop_front() {
            if !seen.insert(next) {
                continue;
            }
            if let Some(next_term) = self.get(next) {
                self.enqueue_edges(next_term, relationships, &mut queue);
            }
        }
        seen.remove(term.id());
        Some(GoGroup::from(seen))
    }

    /// Returns the ancestors of every term, keyed by main id
    ///
    /// See [`Ontology::ancestors`] for the semantics of `relationships`
    pub fn go2ancestors(&self, relationships: &Relationships) -> HashMap<GoTermId, GoGroup> {
        let mut res = HashMap::with_capacity(self.len());
        for id in self.go_terms.keys() {
            if let Some(ancestors) = self.ancestors(*id, relationships) {
                res.insert(*id, ancestors);
            }
        }
        debug!(
            "Calculated ancestors of {} terms along is_a and {} relationships",
            res.len(),
            relationships.len()
        );
        res
    }
}

/// Methods to add data to the Ontology
impl Ontology {
    /// Creates and inserts a new term into the ontology
    ///
    /// This method does not link the term to its parents.
    /// Inserting an existing id replaces the term.
    ///
    /// # Examples
    ///
    /// ```
    /// use goassoc::{Namespace, Ontology};
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term(1u32, "FooBar", Namespace::MF);
    ///
    /// assert_eq!(ontology.len(), 1);
    /// ```
    pub fn insert_term<I: Into<GoTermId>, N: Into<String>>(
        &mut self,
        term_id: I,
        name: N,
        namespace: Namespace,
    ) {
        let term = GoTermInternal::new(term_id.into(), name.into(), namespace);
        self.go_terms.insert(term);
        self.cache_valid = false;
    }

    /// Adds an `is_a` connection from a term to its parent
    ///
    /// # Errors
    ///
    /// [`GoError::DoesNotExist`] if `parent_id` or `child_id` is not
    /// present in the Ontology
    ///
    /// # Examples
    ///
    /// ```
    /// use goassoc::{Namespace, Ontology};
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term(1u32, "Foo", Namespace::BP);
    /// ontology.insert_term(2u32, "Bar", Namespace::BP);
    ///
    /// ontology.add_parent(1u32, 2u32).unwrap();
    ///
    /// assert!(ontology.term(2u32).unwrap().parent_ids().contains(&1u32.into()));
    /// assert!(ontology.add_parent(1u32, 3u32).is_err());
    /// ```
    pub fn add_parent<I: Into<GoTermId>, J: Into<GoTermId>>(
        &mut self,
        parent_id: I,
        child_id: J,
    ) -> GoResult<()> {
        let parent_id = self.main_id(parent_id).ok_or(GoError::DoesNotExist)?;
        let child_id = self.main_id(child_id).ok_or(GoError::DoesNotExist)?;

        self.get_mut(parent_id)?.add_child(child_id);
        self.get_mut(child_id)?.add_parent(parent_id);
        self.cache_valid = false;
        Ok(())
    }

    /// Adds a typed edge `child --relationship--> target`
    ///
    /// Relationship edges are only followed by [`Ontology::ancestors`]
    /// when the relationship type is requested.
    ///
    /// # Errors
    ///
    /// [`GoError::DoesNotExist`] if one of the terms is not present
    pub fn add_relationship<I: Into<GoTermId>, J: Into<GoTermId>>(
        &mut self,
        child_id: I,
        relationship: Relationship,
        target_id: J,
    ) -> GoResult<()> {
        let target_id = self.main_id(target_id).ok_or(GoError::DoesNotExist)?;
        let child_id = self.main_id(child_id).ok_or(GoError::DoesNotExist)?;
        self.get_mut(child_id)?
            .add_relationship(relationship, target_id);
        Ok(())
    }

    /// Registers `alt_id` as an alternate id of the term `main_id`
    ///
    /// # Errors
    ///
    /// - [`GoError::DoesNotExist`] if `main_id` is not present
    /// - [`GoError::InvalidInput`] if `alt_id` is itself a main term
    pub fn add_alt_id<I: Into<GoTermId>, J: Into<GoTermId>>(
        &mut self,
        main_id: I,
        alt_id: J,
    ) -> GoResult<()> {
        let main_id = self.main_id(main_id).ok_or(GoError::DoesNotExist)?;
        let alt_id = alt_id.into();
        if self.go_terms.get(alt_id).map_or(false, |t| *t.id() == alt_id) {
            return Err(GoError::InvalidInput(format!(
                "{alt_id} is a main term and cannot be an alternate id of {main_id}"
            )));
        }
        self.get_mut(main_id)?.add_alt_id(alt_id);
        self.go_terms.add_alt_id(main_id, alt_id);
        Ok(())
    }

    /// Marks the term as obsolete
    ///
    /// # Errors
    ///
    /// [`GoError::DoesNotExist`] if the term is not present
    pub fn set_obsolete<I: Into<GoTermId>>(&mut self, term_id: I) -> GoResult<()> {
        *self.get_mut(term_id)?.obsolete_mut() = true;
        Ok(())
    }

    /// Creates and caches the `all_parents`, `depth` and `level` values
    /// of every term
    ///
    /// Call this once all terms and `is_a` edges are added. Adding terms
    /// or parents afterwards invalidates the cache and requires
    /// another call.
    ///
    /// # Examples
    ///
    /// ```
    /// use goassoc::{Namespace, Ontology};
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term(1u32, "Root", Namespace::BP);
    /// ontology.insert_term(2u32, "Foo", Namespace::BP);
    /// ontology.insert_term(3u32, "Bar", Namespace::BP);
    ///
    /// ontology.add_parent(1u32, 2u32).unwrap();
    /// ontology.add_parent(2u32, 3u32).unwrap();
    ///
    /// // At this point #3 does not have info about grandparents
    /// assert!(!ontology.term(3u32).unwrap().all_parent_ids().contains(&1u32.into()));
    ///
    /// ontology.create_cache();
    /// assert!(ontology.term(3u32).unwrap().all_parent_ids().contains(&1u32.into()));
    /// assert_eq!(ontology.depth(3u32), Some(2));
    /// ```
    pub fn create_cache(&mut self) {
        for term in self.go_terms.values_mut() {
            *term.all_parents_mut() = GoGroup::default();
            *term.depth_mut() = None;
            *term.level_mut() = None;
        }

        let term_ids: Vec<GoTermId> = self.go_terms.keys().copied().collect();
        let mut visiting = HashSet::new();
        for id in &term_ids {
            self.create_cache_of_grandparents(*id, &mut visiting);
        }
        for id in &term_ids {
            self.cache_depth(*id, &mut visiting);
        }
        self.cache_valid = true;
        debug!("Created cache of {} terms", term_ids.len());
    }
}

/// Crate-only functions for helping with building the Ontology
impl Ontology {
    /// Returns the `GoTermInternal` with the given `GoTermId`
    ///
    /// Alternate ids resolve to the main term
    pub(crate) fn get<I: Into<GoTermId>>(&self, term_id: I) -> Option<&GoTermInternal> {
        self.go_terms.get(term_id.into())
    }

    fn get_mut<I: Into<GoTermId>>(&mut self, term_id: I) -> GoResult<&mut GoTermInternal> {
        self.go_terms
            .get_mut(term_id.into())
            .ok_or(GoError::DoesNotExist)
    }

    fn enqueue_edges(
        &self,
        term: &GoTermInternal,
        relationships: &Relationships,
        queue: &mut VecDeque<GoTermId>,
    ) {
        queue.extend(term.parents());
        for relationship in relationships {
            if let Some(targets) = term.relationships().get(relationship) {
                queue.extend(targets);
            }
        }
    }

    /// Caches the direct and indirect `is_a` parents of the term
    ///
    /// The recursion bubbles up to the roots and caches `all_parents`
    /// for every term on the way back down. It stops at terms that are
    /// already cached. `visiting` holds the terms of the current path, so
    /// an `is_a` cycle stops the recursion instead of overflowing the stack.
    fn create_cache_of_grandparents(
        &mut self,
        term_id: GoTermId,
        visiting: &mut HashSet<GoTermId>,
    ) {
        let Some(term) = self.go_terms.get(term_id) else {
            return;
        };
        if !term.all_parents().is_empty() || !visiting.insert(term_id) {
            return;
        }
        let parents = term.parents().clone();

        let mut res = parents.clone();
        for parent in &parents {
            let cached = self
                .go_terms
                .get(parent)
                .map_or(true, GoTermInternal::parents_cached);
            if !cached {
                self.create_cache_of_grandparents(parent, visiting);
            }
            if let Some(parent_term) = self.go_terms.get(parent) {
                res = &res | parent_term.all_parents();
            }
        }
        visiting.remove(&term_id);

        if let Some(term) = self.go_terms.get_mut(term_id) {
            *term.all_parents_mut() = res;
        }
    }

    /// Caches `(depth, level)` of the term
    ///
    /// Returns `None` if the term is unknown or part of an `is_a` cycle
    /// on the current path.
    fn cache_depth(
        &mut self,
        term_id: GoTermId,
        visiting: &mut HashSet<GoTermId>,
    ) -> Option<(usize, usize)> {
        let term = self.go_terms.get(term_id)?;
        if let (Some(depth), Some(level)) = (term.depth(), term.level()) {
            return Some((depth, level));
        }
        if !visiting.insert(term_id) {
            trace!("is_a cycle through {term_id}");
            return None;
        }
        let parents = term.parents().clone();

        let mut depth: Option<usize> = None;
        let mut level: Option<usize> = None;
        for parent in &parents {
            if let Some((parent_depth, parent_level)) = self.cache_depth(parent, visiting) {
                depth = Some(depth.map_or(parent_depth + 1, |d| d.max(parent_depth + 1)));
                level = Some(level.map_or(parent_level + 1, |l| l.min(parent_level + 1)));
            }
        }
        visiting.remove(&term_id);

        let depth = depth.unwrap_or(0);
        let level = level.unwrap_or(0);
        if let Some(term) = self.go_terms.get_mut(term_id) {
            *term.depth_mut() = Some(depth);
            *term.level_mut() = Some(level);
        }
        Some((depth, level))
    }
}

/// Iterates the Ontology and yields [`GoTerm`]s
pub struct Iter<'a> {
    inner: std::collections::hash_map::Values<'a, GoTermId, GoTermInternal>,
    ontology: &'a Ontology,
}

impl<'a> std::iter::Iterator for Iter<'a> {
    type Item = GoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|term| GoTerm::new(self.ontology, term))
    }
}

impl<'a> IntoIterator for &'a Ontology {
    type Item = GoTerm<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.go_terms.values(),
            ontology: self,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// ```text
    ///        8150
    ///       /    \
    ///      1      2
    ///     / \    /
    ///    3   4--+
    ///    |
    ///    5  (5 part_of 2)
    /// ```
    fn ontology() -> Ontology {
        let mut ont = Ontology::default();
        ont.insert_term(8150u32, "biological_process", Namespace::BP);
        for id in 1u32..=5 {
            ont.insert_term(id, format!("term {id}"), Namespace::BP);
        }
        ont.add_parent(8150u32, 1u32).unwrap();
        ont.add_parent(8150u32, 2u32).unwrap();
        ont.add_parent(1u32, 3u32).unwrap();
        ont.add_parent(1u32, 4u32).unwrap();
        ont.add_parent(2u32, 4u32).unwrap();
        ont.add_parent(3u32, 5u32).unwrap();
        ont.add_relationship(5u32, Relationship::PartOf, 2u32)
            .unwrap();
        ont.create_cache();
        ont
    }

    #[test]
    fn all_parents_are_cached() {
        let ont = ontology();
        let term = ont.term(5u32).unwrap();
        let expected: GoGroup = vec![1u32.into(), 3u32.into(), 8150u32.into()].into();
        assert_eq!(term.all_parent_ids(), &expected);

        let term = ont.term(4u32).unwrap();
        assert_eq!(term.all_parent_ids().len(), 3);
    }

    #[test]
    fn depth_and_level() {
        let mut ont = ontology();
        assert_eq!(ont.depth(8150u32), Some(0));
        assert_eq!(ont.depth(5u32), Some(3));

        // 6 has a long and a short path to the root
        ont.insert_term(6u32, "shortcut", Namespace::BP);
        ont.add_parent(5u32, 6u32).unwrap();
        ont.add_parent(8150u32, 6u32).unwrap();
        ont.create_cache();

        let term = ont.term(6u32).unwrap();
        assert_eq!(term.depth(), 4);
        assert_eq!(term.level(), 1);
    }

    #[test]
    fn ancestors_with_relationships() {
        let ont = ontology();
        let is_a = ont.ancestors(5u32, &Relationships::new()).unwrap();
        assert!(!is_a.contains(&2u32.into()));

        let part_of: Relationships = [Relationship::PartOf].into_iter().collect();
        let all = ont.ancestors(5u32, &part_of).unwrap();
        assert!(all.contains(&2u32.into()));
        assert!(all.contains(&8150u32.into()));
        assert!(!all.contains(&5u32.into()));

        let regulates: Relationships = [Relationship::Regulates].into_iter().collect();
        assert_eq!(ont.ancestors(5u32, &regulates).unwrap(), is_a);

        assert!(ont.ancestors(77u32, &part_of).is_none());
    }

    #[test]
    fn relationship_cycles_terminate() {
        let mut ont = ontology();
        ont.add_relationship(2u32, Relationship::PartOf, 5u32)
            .unwrap();
        let part_of: Relationships = [Relationship::PartOf].into_iter().collect();

        let ancestors = ont.ancestors(5u32, &part_of).unwrap();
        assert!(!ancestors.contains(&5u32.into()));
        assert_eq!(ancestors.len(), 4);

        let ancestors = ont.ancestors(2u32, &part_of).unwrap();
        assert!(ancestors.contains(&5u32.into()));
    }

    #[test]
    fn is_a_cycles_terminate() {
        let mut ont = Ontology::default();
        ont.insert_term(1u32, "a", Namespace::MF);
        ont.insert_term(2u32, "b", Namespace::MF);
        ont.add_parent(1u32, 2u32).unwrap();
        ont.add_parent(2u32, 1u32).unwrap();
        ont.create_cache();
        assert!(ont.depth(1u32).is_some());
        assert!(ont.ancestors(1u32, &Relationships::new()).is_some());
    }

    #[test]
    fn alt_ids_resolve() {
        let mut ont = ontology();
        ont.add_alt_id(4u32, 9u32).unwrap();

        assert!(ont.contains(9u32));
        assert_eq!(ont.term(9u32).unwrap().id(), &GoTermId::from(4u32));
        assert_eq!(ont.namespace(9u32), Some(Namespace::BP));
        assert_eq!(
            ont.ancestors(9u32, &Relationships::new()),
            ont.ancestors(4u32, &Relationships::new())
        );
        assert_eq!(ont.alt_ids().count(), 1);

        assert!(ont.add_alt_id(4u32, 3u32).is_err());
        assert!(ont.add_alt_id(99u32, 98u32).is_err());
    }

    #[test]
    fn go2ancestors_covers_main_ids() {
        let mut ont = ontology();
        ont.add_alt_id(4u32, 9u32).unwrap();
        let go2anc = ont.go2ancestors(&Relationships::new());
        assert_eq!(go2anc.len(), 6);
        assert!(go2anc[&GoTermId::from(8150u32)].is_empty());
        assert!(!go2anc.contains_key(&GoTermId::from(9u32)));
    }

    #[test]
    fn obsolete_flag() {
        let mut ont = ontology();
        assert_eq!(ont.is_obsolete(3u32), Some(false));
        ont.set_obsolete(3u32).unwrap();
        assert_eq!(ont.is_obsolete(3u32), Some(true));
        assert!(ont.term(3u32).unwrap().is_obsolete());
        assert!(ont.set_obsolete(42u32).is_err());
    }
}
