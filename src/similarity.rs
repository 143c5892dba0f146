//! Semantic similarity between GO terms
//!
//! The information content based measures [`Resnik`] and [`Lin`] implement
//! the [`Similarity`] trait. The same scores, together with the DAG based
//! branch distance, are also available as free functions.
//!
//! All functions resolve alternate ids to their main term. Common
//! ancestors are calculated along `is_a` edges only, a term counts as its
//! own ancestor.

use crate::term::{GoGroup, GoTermId, Relationships};
use crate::{Ontology, TermCounts};

mod defaults;

pub use defaults::{Lin, Resnik};

/// Trait for similarity score calculation between 2 GO terms
pub trait Similarity {
    /// Calculates the similarity between term a and term b
    ///
    /// Returns `None` if the score is undefined, e.g. for terms of
    /// different namespaces.
    fn calculate(&self, a: GoTermId, b: GoTermId) -> Option<f64>;
}

/// Returns the `is_a` ancestors shared by all terms, including the terms
/// themselves
///
/// The result is empty if any of the terms is unknown.
///
/// # Examples
///
/// ```
/// use goassoc::{GoTermId, Namespace, Ontology};
/// use goassoc::similarity::common_parent_go_ids;
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term(8150u32, "root", Namespace::BP);
/// ontology.insert_term(1u32, "a", Namespace::BP);
/// ontology.insert_term(2u32, "b", Namespace::BP);
/// ontology.add_parent(8150u32, 1u32).unwrap();
/// ontology.add_parent(1u32, 2u32).unwrap();
/// ontology.create_cache();
///
/// let common = common_parent_go_ids(&[GoTermId::from(1u32), GoTermId::from(2u32)], &ontology);
/// assert_eq!(common.len(), 2);
/// assert!(common.contains(&GoTermId::from(1u32)));
/// ```
pub fn common_parent_go_ids(term_ids: &[GoTermId], ontology: &Ontology) -> GoGroup {
    let is_a = Relationships::new();
    let mut res: Option<GoGroup> = None;
    for term_id in term_ids {
        let (Some(main_id), Some(mut ancestors)) = (
            ontology.main_id(*term_id),
            ontology.ancestors(*term_id, &is_a),
        ) else {
            return GoGroup::new();
        };
        ancestors.insert(main_id);
        res = Some(match res {
            Some(common) => &common & &ancestors,
            None => ancestors,
        });
    }
    res.unwrap_or_default()
}

/// Returns the common ancestor with the largest depth
///
/// If several common ancestors share the largest depth, which of them
/// is returned is unspecified.
pub fn deepest_common_ancestor(term_ids: &[GoTermId], ontology: &Ontology) -> Option<GoTermId> {
    common_parent_go_ids(term_ids, ontology)
        .iter()
        .max_by_key(|id| ontology.depth(*id).unwrap_or_default())
}

/// Returns the information content of the term
pub fn information_content(term_id: GoTermId, termcounts: &TermCounts) -> f64 {
    termcounts.information_content(term_id)
}

/// Resnik similarity, the information content of the deepest common ancestor
///
/// `None` if the terms are unknown, belong to different namespaces or
/// have no common ancestor.
pub fn resnik_sim(
    a: GoTermId,
    b: GoTermId,
    ontology: &Ontology,
    termcounts: &TermCounts,
) -> Option<f64> {
    if ontology.namespace(a)? != ontology.namespace(b)? {
        return None;
    }
    let ancestor = deepest_common_ancestor(&[a, b], ontology)?;
    Some(termcounts.information_content(ancestor))
}

/// Lin similarity, `2 * resnik / (IC(a) + IC(b))`
///
/// If both terms have an information content of `0`, identical terms
/// have a similarity of `1.0` and all others `0.0`.
///
/// # Examples
///
/// ```
/// use std::collections::{HashMap, HashSet};
/// use goassoc::{DatabaseId, GoTermId, Namespace, Ontology, Relationships, TermCounts};
/// use goassoc::similarity::lin_sim;
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term(8150u32, "root", Namespace::BP);
/// ontology.insert_term(1u32, "a", Namespace::BP);
/// ontology.insert_term(2u32, "b", Namespace::BP);
/// ontology.add_parent(8150u32, 1u32).unwrap();
/// ontology.add_parent(8150u32, 2u32).unwrap();
/// ontology.create_cache();
///
/// let mut id2gos = HashMap::new();
/// id2gos.insert(DatabaseId::from("geneA"), HashSet::from([GoTermId::from(1u32)]));
/// id2gos.insert(DatabaseId::from("geneB"), HashSet::from([GoTermId::from(2u32)]));
/// let counts = TermCounts::new(&ontology, &id2gos, &Relationships::new());
///
/// let a = GoTermId::from(1u32);
/// let b = GoTermId::from(2u32);
/// assert_eq!(lin_sim(a, a, &ontology, &counts), Some(1.0));
/// assert_eq!(lin_sim(a, b, &ontology, &counts), Some(0.0));
/// ```
pub fn lin_sim(a: GoTermId, b: GoTermId, ontology: &Ontology, termcounts: &TermCounts) -> Option<f64> {
    let resnik = resnik_sim(a, b, ontology, termcounts)?;
    let ic_sum = termcounts.information_content(a) + termcounts.information_content(b);
    if ic_sum == 0.0 {
        if ontology.main_id(a) == ontology.main_id(b) {
            return Some(1.0);
        }
        return Some(0.0);
    }
    Some(2.0 * resnik / ic_sum)
}

/// Returns the number of `is_a` edges between the terms and their deepest
/// common ancestor, based on the depth of the terms
///
/// Terms of different namespaces have no common ancestor. For them the
/// distance is `depth(a) + depth(b) + branch_distance` if a
/// `branch_distance` is given, otherwise `None`.
pub fn min_branch_length(
    a: GoTermId,
    b: GoTermId,
    ontology: &Ontology,
    branch_distance: Option<usize>,
) -> Option<usize> {
    let depth_a = ontology.depth(a)?;
    let depth_b = ontology.depth(b)?;
    if ontology.namespace(a)? == ontology.namespace(b)? {
        let ancestor = deepest_common_ancestor(&[a, b], ontology)?;
        let depth = ontology.depth(ancestor)?;
        Some(depth_a.saturating_sub(depth) + depth_b.saturating_sub(depth))
    } else {
        branch_distance.map(|dist| depth_a + depth_b + dist)
    }
}

/// Alias of [`min_branch_length`]
pub fn semantic_distance(
    a: GoTermId,
    b: GoTermId,
    ontology: &Ontology,
    branch_distance: Option<usize>,
) -> Option<usize> {
    min_branch_length(a, b, ontology, branch_distance)
}

/// Returns `1 / semantic_distance`
///
/// Identical terms have a distance of `0` and a similarity of `1.0`.
pub fn semantic_similarity(
    a: GoTermId,
    b: GoTermId,
    ontology: &Ontology,
    branch_distance: Option<usize>,
) -> Option<f64> {
    let distance = semantic_distance(a, b, ontology, branch_distance)?;
    if distance == 0 {
        return Some(1.0);
    }
    let distance = u32::try_from(distance).map_or(f64::from(u32::MAX), f64::from);
    Some(1.0 / distance)
}
