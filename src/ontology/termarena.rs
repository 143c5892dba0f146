use std::collections::hash_map::{Keys, Values, ValuesMut};
use std::collections::HashMap;

use crate::term::internal::GoTermInternal;
use crate::GoTermId;

/// Id-keyed storage of all terms of the DAG
///
/// Alternate ids are not stored as terms of their own, they point
/// to the main id instead.
pub(crate) struct Arena {
    terms: HashMap<GoTermId, GoTermInternal>,
    alt_ids: HashMap<GoTermId, GoTermId>,
}

impl Arena {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn insert(&mut self, term: GoTermInternal) {
        let id = *term.id();
        self.terms.insert(id, term);
    }

    /// Resolves `id` to the main id of a stored term
    pub fn main_id(&self, id: GoTermId) -> Option<GoTermId> {
        if self.terms.contains_key(&id) {
            Some(id)
        } else {
            self.alt_ids.get(&id).copied()
        }
    }

    pub fn add_alt_id(&mut self, main: GoTermId, alt: GoTermId) {
        self.alt_ids.insert(alt, main);
    }

    pub fn alt_ids(&self) -> &HashMap<GoTermId, GoTermId> {
        &self.alt_ids
    }

    pub fn get(&self, id: GoTermId) -> Option<&GoTermInternal> {
        self.terms.get(&self.main_id(id)?)
    }

    pub fn get_mut(&mut self, id: GoTermId) -> Option<&mut GoTermInternal> {
        let main = self.main_id(id)?;
        self.terms.get_mut(&main)
    }

    pub fn values(&self) -> Values<'_, GoTermId, GoTermInternal> {
        self.terms.values()
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, GoTermId, GoTermInternal> {
        self.terms.values_mut()
    }

    pub fn keys(&self) -> Keys<'_, GoTermId, GoTermInternal> {
        self.terms.keys()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            terms: HashMap::with_capacity(50_000),
            alt_ids: HashMap::new(),
        }
    }
}
