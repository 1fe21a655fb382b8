//! Non-empty reference lists linking hints and problems to physical elements

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::value_objects::ElementId;

/// An ordered list of physical-element identifiers that is never empty.
///
/// Owners store `Option<ElementRefs>`: the absent case is the `None` side of
/// the option, so an empty-but-present list is unrepresentable. All mutation
/// goes through [`ElementRefs::insert_into`] and [`ElementRefs::remove_from`],
/// which maintain the collapse-to-absent rule in one place.
///
/// The list is ordered and may contain the same identifier more than once;
/// removal drops the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ElementId>", into = "Vec<ElementId>")]
pub struct ElementRefs(Vec<ElementId>);

impl ElementRefs {
    /// Add `id` to the slot, allocating the list on first insertion.
    pub fn insert_into(slot: &mut Option<ElementRefs>, id: ElementId) {
        match slot {
            Some(refs) => refs.0.push(id),
            None => *slot = Some(ElementRefs(vec![id])),
        }
    }

    /// Remove `id` from the slot, collapsing to `None` when the last
    /// reference goes away.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the slot is absent or does not
    /// contain `id`.
    pub fn remove_from(slot: &mut Option<ElementRefs>, id: ElementId) -> Result<(), DomainError> {
        let refs = slot
            .as_mut()
            .ok_or_else(|| DomainError::not_found("PhysicalElement", id))?;
        let index = refs
            .0
            .iter()
            .position(|e| *e == id)
            .ok_or_else(|| DomainError::not_found("PhysicalElement", id))?;
        refs.0.remove(index);
        if refs.0.is_empty() {
            *slot = None;
        }
        Ok(())
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.0
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.0.contains(&id)
    }
}

impl TryFrom<Vec<ElementId>> for ElementRefs {
    type Error = DomainError;

    fn try_from(ids: Vec<ElementId>) -> Result<Self, Self::Error> {
        if ids.is_empty() {
            return Err(DomainError::integrity(
                "a reference list cannot be present and empty",
            ));
        }
        Ok(Self(ids))
    }
}

impl From<ElementRefs> for Vec<ElementId> {
    fn from(refs: ElementRefs) -> Self {
        refs.0
    }
}
