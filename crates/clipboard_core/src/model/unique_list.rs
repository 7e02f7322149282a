//! Identity-unique ordered list backing every roster collection.
//!
//! # Responsibility
//! - Keep insertion order for display while rejecting identity duplicates.
//! - Expose read-only and predicate-filtered projections of the backing list.
//!
//! # Invariants
//! - No two stored elements satisfy `Entity::is_same`.
//! - `contains`/`add` compare identity; `set_entity`/`remove` locate the
//!   target by full equality. Callers rely on this asymmetry.
//! - A failed mutation leaves the backing list untouched.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Roster entity with separate identity and full-value comparison.
pub trait Entity: Clone + PartialEq + Debug + Display {
    /// Lowercase kind name used in user-facing messages.
    const KIND: &'static str;

    /// Returns true when both values describe the same real-world thing.
    fn is_same(&self, other: &Self) -> bool;

    /// Returns true when every field matches.
    fn fully_equal(&self, other: &Self) -> bool {
        self == other
    }
}

/// Display predicate driving the filtered projection.
pub type Predicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// Errors raised by unique list mutation primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// Another element already has the same identity.
    DuplicateEntity { kind: &'static str },
    /// No element matches the requested target.
    EntityNotFound { kind: &'static str },
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEntity { kind } => write!(f, "This {kind} already exists"),
            Self::EntityNotFound { kind } => write!(f, "The {kind} could not be found"),
        }
    }
}

impl Error for ListError {}

/// Ordered collection enforcing identity uniqueness among its elements.
#[derive(Clone)]
pub struct UniqueList<E: Entity> {
    items: Vec<E>,
    filter: Option<Predicate<E>>,
}

impl<E: Entity> Default for UniqueList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> UniqueList<E> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            filter: None,
        }
    }

    /// Builds a list from `items`, rejecting identity duplicates.
    pub fn from_vec(items: Vec<E>) -> Result<Self, ListError> {
        let mut list = Self::new();
        list.replace_all(items)?;
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at backing position `index`, ignoring the display filter.
    pub fn get(&self, index: usize) -> Option<&E> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    /// Returns true if any stored element has the same identity as `candidate`.
    pub fn contains(&self, candidate: &E) -> bool {
        self.items.iter().any(|item| item.is_same(candidate))
    }

    /// Appends `entity` at the end of the list.
    ///
    /// # Errors
    /// - `DuplicateEntity` when an element with the same identity exists.
    pub fn add(&mut self, entity: E) -> Result<(), ListError> {
        if self.contains(&entity) {
            return Err(ListError::DuplicateEntity { kind: E::KIND });
        }
        self.items.push(entity);
        Ok(())
    }

    /// Replaces `target` with `replacement` at the same position.
    ///
    /// # Errors
    /// - `EntityNotFound` when no element is fully equal to `target`.
    /// - `DuplicateEntity` when `replacement` changes identity to one that
    ///   already exists elsewhere in the list.
    pub fn set_entity(&mut self, target: &E, replacement: E) -> Result<(), ListError> {
        let index = self
            .position_of(target)
            .ok_or(ListError::EntityNotFound { kind: E::KIND })?;

        if !target.is_same(&replacement) && self.contains(&replacement) {
            return Err(ListError::DuplicateEntity { kind: E::KIND });
        }

        self.items[index] = replacement;
        Ok(())
    }

    /// Removes the first element fully equal to `entity`.
    ///
    /// An element that merely shares the identity of `entity` is not removed.
    pub fn remove(&mut self, entity: &E) -> Result<E, ListError> {
        let index = self
            .position_of(entity)
            .ok_or(ListError::EntityNotFound { kind: E::KIND })?;
        Ok(self.items.remove(index))
    }

    /// Replaces the whole backing sequence with `items`.
    ///
    /// The list is unchanged when `items` holds an identity-duplicate pair.
    pub fn replace_all(&mut self, items: Vec<E>) -> Result<(), ListError> {
        if !entities_are_unique(&items) {
            return Err(ListError::DuplicateEntity { kind: E::KIND });
        }
        self.items = items;
        Ok(())
    }

    /// Copies the contents of another, already unique, list.
    pub fn set_all(&mut self, replacement: &UniqueList<E>) {
        self.items = replacement.items.clone();
    }

    /// Runs `edit` on a copy of the first element matching `matches`, then
    /// commits the copy in place.
    ///
    /// Nothing is written when `edit` fails or when the edited copy clashes
    /// with the identity of another element.
    pub fn update_where<R, EditErr>(
        &mut self,
        matches: impl Fn(&E) -> bool,
        edit: impl FnOnce(&mut E) -> Result<R, EditErr>,
    ) -> Result<R, EditErr>
    where
        EditErr: From<ListError>,
    {
        let index = self
            .items
            .iter()
            .position(matches)
            .ok_or(ListError::EntityNotFound { kind: E::KIND })?;

        let current = &self.items[index];
        let mut edited = current.clone();
        let output = edit(&mut edited)?;

        if !current.is_same(&edited) && self.contains(&edited) {
            return Err(ListError::DuplicateEntity { kind: E::KIND }.into());
        }

        self.items[index] = edited;
        Ok(output)
    }

    /// Installs the predicate used by [`UniqueList::filtered`].
    pub fn set_filter(&mut self, predicate: Predicate<E>) {
        self.filter = Some(predicate);
    }

    /// Shows every element in the filtered projection again.
    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    pub fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }

    /// Unmodifiable ordered view of the backing list.
    pub fn as_view(&self) -> ListView<'_, E> {
        ListView {
            items: &self.items,
            filter: None,
        }
    }

    /// Ordered view restricted to elements accepted by the display predicate.
    pub fn filtered(&self) -> ListView<'_, E> {
        ListView {
            items: &self.items,
            filter: self.filter.as_ref(),
        }
    }

    fn position_of(&self, target: &E) -> Option<usize> {
        self.items.iter().position(|item| item.fully_equal(target))
    }
}

/// Pairwise identity check over all unordered pairs.
fn entities_are_unique<E: Entity>(items: &[E]) -> bool {
    for (i, left) in items.iter().enumerate() {
        if items[i + 1..].iter().any(|right| left.is_same(right)) {
            return false;
        }
    }
    true
}

impl<E: Entity> PartialEq for UniqueList<E> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<E: Entity> Debug for UniqueList<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniqueList")
            .field("items", &self.items)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}

impl<'a, E: Entity> IntoIterator for &'a UniqueList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<E: Entity + Serialize> Serialize for UniqueList<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, E: Entity + Deserialize<'de>> Deserialize<'de> for UniqueList<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<E>::deserialize(deserializer)?;
        UniqueList::from_vec(items).map_err(D::Error::custom)
    }
}

/// Borrowed read-only projection over a [`UniqueList`].
///
/// The predicate is evaluated on every read, so a view taken after a
/// mutation always reflects the current backing list.
pub struct ListView<'a, E> {
    items: &'a [E],
    filter: Option<&'a Predicate<E>>,
}

impl<'a, E> ListView<'a, E> {
    pub fn iter(&self) -> impl Iterator<Item = &'a E> + '_ {
        let filter = self.filter;
        self.items
            .iter()
            .filter(move |item| filter.map_or(true, |predicate| predicate(*item)))
    }

    pub fn len(&self) -> usize {
        match self.filter {
            None => self.items.len(),
            Some(_) => self.iter().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at display position `index`.
    pub fn get(&self, index: usize) -> Option<&'a E> {
        self.iter().nth(index)
    }
}
