//! Information content based similarity measures

use crate::similarity::{lin_sim, resnik_sim, Similarity};
use crate::term::GoTermId;
use crate::TermCounts;

/// Similarity score from Resnik
///
/// For a detailed description see [Resnik P, Proceedings of the 14th IJCAI, (1995)](https://www.ijcai.org/Proceedings/95-1/Papers/059.pdf)
#[derive(Debug)]
pub struct Resnik<'a> {
    termcounts: &'a TermCounts<'a>,
}

impl<'a> Resnik<'a> {
    /// Constructs a new struct to calculate the Resnik based similarity scores
    /// between two terms
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use goassoc::{Ontology, Relationships, TermCounts};
    /// use goassoc::similarity::{Resnik, Similarity};
    ///
    /// let ontology = Ontology::default();
    /// let counts = TermCounts::new(&ontology, &HashMap::new(), &Relationships::new());
    ///
    /// let resnik = Resnik::new(&counts);
    /// assert_eq!(resnik.calculate(1u32.into(), 2u32.into()), None);
    /// ```
    pub fn new(termcounts: &'a TermCounts<'a>) -> Self {
        Self { termcounts }
    }
}

impl Similarity for Resnik<'_> {
    fn calculate(&self, a: GoTermId, b: GoTermId) -> Option<f64> {
        resnik_sim(a, b, self.termcounts.ontology(), self.termcounts)
    }
}

/// Similarity score from Lin
///
/// For a detailed description see [Lin D, Proceedings of the 15th ICML, (1998)](https://dl.acm.org/doi/10.5555/645527.657297)
#[derive(Debug)]
pub struct Lin<'a> {
    termcounts: &'a TermCounts<'a>,
}

impl<'a> Lin<'a> {
    /// Constructs a new struct to calculate the Lin based similarity scores
    /// between two terms
    pub fn new(termcounts: &'a TermCounts<'a>) -> Self {
        Self { termcounts }
    }
}

impl Similarity for Lin<'_> {
    fn calculate(&self, a: GoTermId, b: GoTermId) -> Option<f64> {
        lin_sim(a, b, self.termcounts.ontology(), self.termcounts)
    }
}
