//! Problem entity - Puzzles the players must solve
//!
//! Same shape as a hint minus the map position: problems belong to the game's
//! narrative, not to a spot on the map.

use serde::{Deserialize, Serialize};

use crate::domain::common::require_non_blank;
use crate::domain::error::DomainError;
use crate::domain::value_objects::{ElementId, ElementRefs};

/// A puzzle that may reference the physical elements involved in solving it.
///
/// Element references follow the same discipline as [`Hint`]: identifiers are
/// checked against a caller-supplied containment oracle at insertion time and
/// re-resolved on [`validate`](Self::validate).
///
/// [`Hint`]: crate::domain::entities::Hint
///
/// # Invariants
///
/// - `name` is never empty or whitespace-only
/// - `elements`, when present, is non-empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elements: Option<ElementRefs>,
}

impl Problem {
    /// Create a new problem.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        require_non_blank(&name, "problem")?;
        Ok(Self {
            name,
            description: None,
            elements: None,
        })
    }

    /// Set the description during construction.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        require_non_blank(&name, "problem")?;
        self.name = name;
        Ok(())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn clear_description(&mut self) {
        self.description = None;
    }

    /// Identifiers of the physical elements involved in this problem, absent
    /// while the problem references none.
    pub fn elements(&self) -> Option<&[ElementId]> {
        self.elements.as_ref().map(ElementRefs::ids)
    }

    pub fn contains_element(&self, id: ElementId) -> bool {
        self.elements.as_ref().is_some_and(|refs| refs.contains(id))
    }

    /// Reference a physical element by identifier, allocating the backing
    /// list on first insertion.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` unless `exists` confirms the
    /// identifier at call time.
    pub fn add_element<F>(&mut self, id: ElementId, exists: F) -> Result<(), DomainError>
    where
        F: Fn(ElementId) -> bool,
    {
        if !exists(id) {
            return Err(DomainError::not_found("PhysicalElement", id));
        }
        ElementRefs::insert_into(&mut self.elements, id);
        Ok(())
    }

    /// Drop a reference. Removing the last one collapses the list back to
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the list is absent or does not
    /// contain `id`.
    pub fn delete_element(&mut self, id: ElementId) -> Result<(), DomainError> {
        ElementRefs::remove_from(&mut self.elements, id)
    }

    /// Re-check the representation invariants, re-resolving every element
    /// reference against the live collection.
    pub fn validate<F>(&self, exists: F) -> Result<(), DomainError>
    where
        F: Fn(ElementId) -> bool,
    {
        require_non_blank(&self.name, "problem")?;
        if let Some(refs) = &self.elements {
            for &id in refs.ids() {
                if !exists(id) {
                    return Err(DomainError::not_found("PhysicalElement", id));
                }
            }
        }
        Ok(())
    }
}
