//! Gene counts per GO term and the derived information content
//!
//! A gene counts towards a term if it is annotated to the term itself or
//! to any of its descendants. The count of a namespace root therefore is
//! the number of annotated genes in that namespace and serves as the
//! denominator of the term frequency.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::annotations::{DatabaseId, Id2Gos};
use crate::term::{GoGroup, GoTermId, Namespace, Relationships};
use crate::Ontology;

/// Number of genes annotated to each GO term, propagated up the DAG
///
/// Construct once per ontology, association and relationship set. The
/// struct is read-only afterwards.
///
/// Alternate GO ids share the counts of their main term. GO ids of the
/// association that are not part of the ontology are counted for
/// themselves only, see [`TermCounts::unknown_go_ids`].
///
/// # Examples
///
/// ```
/// use std::collections::{HashMap, HashSet};
/// use goassoc::{DatabaseId, GoTermId, Namespace, Ontology, Relationships, TermCounts};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term(3674u32, "molecular_function", Namespace::MF);
/// ontology.insert_term(1u32, "a", Namespace::MF);
/// ontology.insert_term(2u32, "b", Namespace::MF);
/// ontology.add_parent(3674u32, 1u32).unwrap();
/// ontology.add_parent(3674u32, 2u32).unwrap();
/// ontology.create_cache();
///
/// let mut id2gos = HashMap::new();
/// id2gos.insert(
///     DatabaseId::from("geneA"),
///     HashSet::from([GoTermId::from(1u32), GoTermId::from(2u32)]),
/// );
/// id2gos.insert(DatabaseId::from("geneB"), HashSet::from([GoTermId::from(2u32)]));
///
/// let counts = TermCounts::new(&ontology, &id2gos, &Relationships::new());
/// assert_eq!(counts.get_count(3674u32), 2);
/// assert_eq!(counts.get_total_count(Namespace::MF), 2);
/// assert_eq!(counts.get_term_freq(1u32), 0.5);
/// assert_eq!(counts.information_content(3674u32), 0.0);
/// ```
#[derive(Debug)]
pub struct TermCounts<'a> {
    ontology: &'a Ontology,
    go2genes: HashMap<GoTermId, HashSet<DatabaseId>>,
    aspect_counts: HashMap<Namespace, usize>,
    unknown: GoGroup,
}

impl<'a> TermCounts<'a> {
    /// Counts the genes of `id2gos` for every term of `ontology`
    ///
    /// Annotations are propagated along `is_a` and along every edge type
    /// in `relationships`.
    pub fn new(ontology: &'a Ontology, id2gos: &Id2Gos, relationships: &Relationships) -> Self {
        let mut ancestors_cache: HashMap<GoTermId, GoGroup> = HashMap::new();
        let mut unknown = GoGroup::new();
        let mut go2genes: HashMap<GoTermId, HashSet<DatabaseId>> = HashMap::new();

        for (gene, go_ids) in id2gos {
            // union per gene, so shared ancestors count the gene once
            let mut expanded: HashSet<GoTermId> = HashSet::with_capacity(go_ids.len() * 8);
            for go_id in go_ids {
                let Some(main_id) = ontology.main_id(*go_id) else {
                    unknown.insert(*go_id);
                    expanded.insert(*go_id);
                    continue;
                };
                expanded.insert(main_id);
                let ancestors = ancestors_cache.entry(main_id).or_insert_with(|| {
                    ontology
                        .ancestors(main_id, relationships)
                        .unwrap_or_default()
                });
                expanded.extend(ancestors.iter());
            }
            for go_id in expanded {
                go2genes.entry(go_id).or_default().insert(gene.clone());
            }
        }

        if !unknown.is_empty() {
            debug!("{} annotated GO ids are not part of the ontology", unknown.len());
        }

        let aspect_counts = Namespace::ALL
            .into_iter()
            .map(|namespace| {
                let count = go2genes.get(&namespace.root()).map_or(0, HashSet::len);
                (namespace, count)
            })
            .collect();

        debug!(
            "Counted {} genes on {} GO terms",
            id2gos.len(),
            go2genes.len()
        );

        Self {
            ontology,
            go2genes,
            aspect_counts,
            unknown,
        }
    }

    /// Returns the ontology the counts are based on
    pub fn ontology(&self) -> &'a Ontology {
        self.ontology
    }

    fn key(&self, term_id: GoTermId) -> GoTermId {
        self.ontology.main_id(term_id).unwrap_or(term_id)
    }

    /// Returns the number of genes annotated to the term or a descendant
    ///
    /// Alternate ids return the count of their main term.
    pub fn get_count<I: Into<GoTermId>>(&self, term_id: I) -> usize {
        self.genes(term_id).map_or(0, HashSet::len)
    }

    /// Returns the genes annotated to the term or a descendant
    pub fn genes<I: Into<GoTermId>>(&self, term_id: I) -> Option<&HashSet<DatabaseId>> {
        self.go2genes.get(&self.key(term_id.into()))
    }

    /// Returns the number of genes annotated in the namespace
    pub fn get_total_count(&self, namespace: Namespace) -> usize {
        self.aspect_counts.get(&namespace).copied().unwrap_or_default()
    }

    /// Returns the fraction of genes of the namespace that are annotated
    /// to the term
    ///
    /// `0.0` if the term is unknown or its namespace has no annotations.
    pub fn get_term_freq<I: Into<GoTermId>>(&self, term_id: I) -> f64 {
        let term_id = term_id.into();
        let Some(namespace) = self.ontology.namespace(term_id) else {
            return 0.0;
        };
        let total = self.get_total_count(namespace);
        if total == 0 {
            return 0.0;
        }
        count_to_f64(self.get_count(term_id)) / count_to_f64(total)
    }

    /// Returns the information content `-ln(frequency)` of the term
    ///
    /// Terms without annotations have an information content of `0.0`.
    pub fn information_content<I: Into<GoTermId>>(&self, term_id: I) -> f64 {
        let freq = self.get_term_freq(term_id);
        if freq > 0.0 {
            -freq.ln()
        } else {
            0.0
        }
    }

    /// Returns the annotated GO ids that are not part of the ontology
    pub fn unknown_go_ids(&self) -> &GoGroup {
        &self.unknown
    }

    /// Returns the number of terms with at least one gene
    pub fn len(&self) -> usize {
        self.go2genes.len()
    }

    /// Returns `true` if no term has any gene
    pub fn is_empty(&self) -> bool {
        self.go2genes.is_empty()
    }

    /// Returns an iterator of `(term, count)` over all counted terms
    ///
    /// Only main ids are returned, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (GoTermId, usize)> + '_ {
        self.go2genes.iter().map(|(id, genes)| (*id, genes.len()))
    }
}

fn count_to_f64(n: usize) -> f64 {
    u32::try_from(n).map_or(f64::from(u32::MAX), f64::from)
}
