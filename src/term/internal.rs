use std::collections::HashMap;

use crate::term::{GoGroup, GoTermId, Namespace, Relationship};
use crate::{DEFAULT_NUM_ALL_PARENTS, DEFAULT_NUM_PARENTS};

#[derive(Debug, Clone)]
pub(crate) struct GoTermInternal {
    id: GoTermId,
    name: String,
    namespace: Namespace,
    parents: GoGroup,
    all_parents: GoGroup,
    children: GoGroup,
    relationships: HashMap<Relationship, GoGroup>,
    alt_ids: GoGroup,
    depth: Option<usize>,
    level: Option<usize>,
    obsolete: bool,
}

impl GoTermInternal {
    pub fn new(id: GoTermId, name: String, namespace: Namespace) -> GoTermInternal {
        GoTermInternal {
            id,
            name,
            namespace,
            parents: GoGroup::with_capacity(DEFAULT_NUM_PARENTS),
            all_parents: GoGroup::with_capacity(DEFAULT_NUM_ALL_PARENTS),
            children: GoGroup::with_capacity(DEFAULT_NUM_PARENTS),
            relationships: HashMap::new(),
            alt_ids: GoGroup::default(),
            depth: None,
            level: None,
            obsolete: false,
        }
    }

    pub fn id(&self) -> &GoTermId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn parents(&self) -> &GoGroup {
        &self.parents
    }

    pub fn children(&self) -> &GoGroup {
        &self.children
    }

    pub fn all_parents(&self) -> &GoGroup {
        &self.all_parents
    }

    pub fn all_parents_mut(&mut self) -> &mut GoGroup {
        &mut self.all_parents
    }

    /// `true` once the ancestors of the term were cached
    ///
    /// Root terms have no parents and count as cached from the start
    pub fn parents_cached(&self) -> bool {
        if self.parents.is_empty() {
            true
        } else {
            !self.all_parents.is_empty()
        }
    }

    pub fn add_parent(&mut self, parent_id: GoTermId) {
        self.parents.insert(parent_id);
    }

    pub fn add_child(&mut self, child_id: GoTermId) {
        self.children.insert(child_id);
    }

    pub fn relationships(&self) -> &HashMap<Relationship, GoGroup> {
        &self.relationships
    }

    pub fn add_relationship(&mut self, relationship: Relationship, target: GoTermId) {
        self.relationships
            .entry(relationship)
            .or_default()
            .insert(target);
    }

    pub fn alt_ids(&self) -> &GoGroup {
        &self.alt_ids
    }

    pub fn add_alt_id(&mut self, alt_id: GoTermId) -> bool {
        self.alt_ids.insert(alt_id)
    }

    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    pub fn depth_mut(&mut self) -> &mut Option<usize> {
        &mut self.depth
    }

    pub fn level(&self) -> Option<usize> {
        self.level
    }

    pub fn level_mut(&mut self) -> &mut Option<usize> {
        &mut self.level
    }

    pub fn obsolete(&self) -> bool {
        self.obsolete
    }

    pub fn obsolete_mut(&mut self) -> &mut bool {
        &mut self.obsolete
    }
}

impl PartialEq for GoTermInternal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GoTermInternal {}
