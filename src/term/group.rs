use std::collections::HashSet;
use std::ops::{BitAnd, BitOr};

use crate::GoTermId;

/// A set of [`GoTermId`]s
///
/// Each term can occur only once in the group. The ids are kept sorted,
/// so lookups are binary searches and iteration order is stable.
///
/// This group is used e.g. for the parents or ancestors of a term
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GoGroup {
    ids: Vec<GoTermId>,
}

impl GoGroup {
    /// Constructs a new, empty [`GoGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`GoGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`GoTermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`GoTermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`GoTermId`] to the group
    ///
    /// Returns whether the `GoTermId` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `GoTermId`, true is returned.
    /// - If the group already contained this `GoTermId`, false is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use goassoc::GoGroup;
    ///
    /// let mut group = GoGroup::new();
    /// assert!(group.insert(3u32));
    /// assert!(!group.insert(3u32));
    /// assert_eq!(group.len(), 1);
    /// ```
    pub fn insert<I: Into<GoTermId>>(&mut self, id: I) -> bool {
        let id = id.into();
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Adds a new [`GoTermId`] to the end of the group
    ///
    /// # Note
    ///
    /// The caller must make sure that `id` is larger than every id
    /// already in the group, otherwise sort order and uniqueness break.
    fn insert_unchecked(&mut self, id: GoTermId) {
        self.ids.push(id);
    }

    /// Returns `true` if the group contains the [`GoTermId`]
    pub fn contains(&self, id: &GoTermId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Returns an Iterator of the [`GoTermId`]s inside the group
    pub fn iter(&self) -> GoTermIds<'_> {
        GoTermIds::new(self.ids.iter())
    }

    /// Returns the [`GoTermId`]s as a slice, in ascending order
    pub fn as_slice(&self) -> &[GoTermId] {
        &self.ids
    }
}

impl From<HashSet<GoTermId>> for GoGroup {
    fn from(s: HashSet<GoTermId>) -> Self {
        let mut ids: Vec<GoTermId> = s.into_iter().collect();
        ids.sort_unstable();
        Self { ids }
    }
}

impl From<Vec<GoTermId>> for GoGroup {
    fn from(mut ids: Vec<GoTermId>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }
}

impl FromIterator<GoTermId> for GoGroup {
    fn from_iter<T: IntoIterator<Item = GoTermId>>(iter: T) -> Self {
        let ids: Vec<GoTermId> = iter.into_iter().collect();
        GoGroup::from(ids)
    }
}

impl Extend<GoTermId> for GoGroup {
    fn extend<T: IntoIterator<Item = GoTermId>>(&mut self, iter: T) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl<'a> IntoIterator for &'a GoGroup {
    type Item = GoTermId;

    type IntoIter = GoTermIds<'a>;

    fn into_iter(self) -> GoTermIds<'a> {
        GoTermIds::new(self.ids.iter())
    }
}

/// An iterator over [`GoTermId`]s
pub struct GoTermIds<'a> {
    inner: std::slice::Iter<'a, GoTermId>,
}

impl<'a> GoTermIds<'a> {
    fn new(inner: std::slice::Iter<'a, GoTermId>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for GoTermIds<'a> {
    type Item = GoTermId;
    fn next(&mut self) -> Option<GoTermId> {
        self.inner.next().copied()
    }
}

impl BitOr for &GoGroup {
    type Output = GoGroup;

    fn bitor(self, rhs: &GoGroup) -> GoGroup {
        let mut group = GoGroup::with_capacity(self.len() + rhs.len());
        let mut left = self.ids.iter().peekable();
        let mut right = rhs.ids.iter().peekable();
        loop {
            let next = match (left.peek(), right.peek()) {
                (Some(l), Some(r)) if l < r => left.next(),
                (Some(l), Some(r)) if l > r => right.next(),
                (Some(_), Some(_)) => {
                    right.next();
                    left.next()
                }
                (Some(_), None) => left.next(),
                (None, Some(_)) => right.next(),
                (None, None) => break,
            };
            if let Some(id) = next {
                group.insert_unchecked(*id);
            }
        }
        group
    }
}

impl BitAnd for &GoGroup {
    type Output = GoGroup;

    fn bitand(self, rhs: &GoGroup) -> GoGroup {
        let mut group = GoGroup::with_capacity(self.len().min(rhs.len()));
        let (large, small) = if self.len() > rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        for id in &small.ids {
            if large.contains(id) {
                group.insert_unchecked(*id);
            }
        }
        group
    }
}
