//! Hint entity - Clues the game master can hand to struggling players
//!
//! A hint may be tied to the physical elements it talks about, and may carry a
//! position on the game map so the editing surface can pin it near them.

use serde::{Deserialize, Serialize};

use crate::domain::common::require_non_blank;
use crate::domain::error::DomainError;
use crate::domain::value_objects::{ElementId, ElementRefs, MapPosition};

/// A clue that may reference the physical elements it concerns.
///
/// Element references are identifiers into the escape game's physical-element
/// collection. The hint never resolves them itself; callers pass a containment
/// oracle (in practice `EscapeGame::contains_physical_element`) so the check
/// always runs against the live collection.
///
/// # Invariants
///
/// - `name` is never empty or whitespace-only
/// - `elements`, when present, is non-empty and every identifier resolved at
///   insertion time (later deletions can leave dangling references; see
///   [`validate`](Self::validate))
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hint {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<MapPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elements: Option<ElementRefs>,
}

impl Hint {
    /// Create a new hint.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        require_non_blank(&name, "hint")?;
        Ok(Self {
            name,
            description: None,
            position: None,
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
        require_non_blank(&name, "hint")?;
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

    /// Where the hint sits on the game map, if it has been placed.
    pub fn position(&self) -> Option<MapPosition> {
        self.position
    }

    /// Place the hint on the map. Coordinate validation happens when the
    /// [`MapPosition`] is constructed, so a stored position is always valid.
    pub fn set_position(&mut self, position: MapPosition) {
        self.position = Some(position);
    }

    pub fn clear_position(&mut self) {
        self.position = None;
    }

    /// Identifiers of the physical elements this hint concerns, absent while
    /// the hint references none.
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
    ///
    /// This is not a cached check: a hint that was valid when its references
    /// were added becomes invalid here once a referenced element is deleted
    /// from the game.
    pub fn validate<F>(&self, exists: F) -> Result<(), DomainError>
    where
        F: Fn(ElementId) -> bool,
    {
        require_non_blank(&self.name, "hint")?;
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

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_: ElementId) -> bool {
        true
    }

    fn never(_: ElementId) -> bool {
        false
    }

    mod constructor {
        use super::*;

        #[test]
        fn fresh_hint_has_only_a_name() {
            let hint = Hint::new("Look under the rug").unwrap();
            assert_eq!(hint.name(), "Look under the rug");
            assert!(hint.description().is_none());
            assert!(hint.position().is_none());
            assert!(hint.elements().is_none());
        }

        #[test]
        fn blank_names_rejected() {
            for name in ["", " ", "\t\n"] {
                assert!(matches!(
                    Hint::new(name),
                    Err(DomainError::InvalidArgument(_))
                ));
            }
        }

        #[test]
        fn builder_sets_description() {
            let hint = Hint::new("Check the clock").unwrap().with_description("7 o'clock");
            assert_eq!(hint.description(), Some("7 o'clock"));
        }
    }

    mod mutation {
        use super::*;

        #[test]
        fn set_name_revalidates() {
            let mut hint = Hint::new("Original").unwrap();
            assert!(hint.set_name("   ").is_err());
            assert_eq!(hint.name(), "Original");
            hint.set_name("Renamed").unwrap();
            assert_eq!(hint.name(), "Renamed");
        }

        #[test]
        fn position_set_and_clear() {
            let mut hint = Hint::new("Map pin").unwrap();
            hint.set_position(MapPosition::new(10.0, 20.0).unwrap());
            assert_eq!(hint.position().unwrap().x(), 10.0);
            hint.clear_position();
            assert!(hint.position().is_none());
        }
    }

    mod references {
        use super::*;

        #[test]
        fn unknown_ids_rejected() {
            let mut hint = Hint::new("Dangling").unwrap();
            let result = hint.add_element(ElementId::new(), never);
            assert!(matches!(result, Err(DomainError::NotFound { .. })));
            assert!(hint.elements().is_none());
        }

        #[test]
        fn known_ids_accepted_and_observable() {
            let mut hint = Hint::new("Linked").unwrap();
            let id = ElementId::new();
            hint.add_element(id, always).unwrap();
            assert!(hint.contains_element(id));
            assert_eq!(hint.elements().unwrap(), [id]);
        }

        #[test]
        fn removing_last_reference_collapses_to_absent() {
            let mut hint = Hint::new("Linked").unwrap();
            let id = ElementId::new();
            hint.add_element(id, always).unwrap();

            hint.delete_element(id).unwrap();
            assert!(hint.elements().is_none());
            assert!(!hint.contains_element(id));
        }

        #[test]
        fn deleting_from_empty_list_fails() {
            let mut hint = Hint::new("Empty").unwrap();
            assert!(matches!(
                hint.delete_element(ElementId::new()),
                Err(DomainError::NotFound { .. })
            ));
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn fresh_hint_validates() {
            assert!(Hint::new("Fine").unwrap().validate(never).is_ok());
        }

        #[test]
        fn validation_re_resolves_references() {
            let mut hint = Hint::new("Linked").unwrap();
            let id = ElementId::new();
            hint.add_element(id, always).unwrap();

            assert!(hint.validate(|e| e == id).is_ok());
            // the referenced element disappeared from the game
            assert!(matches!(
                hint.validate(never),
                Err(DomainError::NotFound { .. })
            ));
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn round_trip() {
            let mut hint = Hint::new("Safe code").unwrap().with_description("Try 1938");
            hint.set_position(MapPosition::new(3.5, 8.0).unwrap());
            let id = ElementId::new();
            hint.add_element(id, always).unwrap();

            let json = serde_json::to_string(&hint).unwrap();
            let back: Hint = serde_json::from_str(&json).unwrap();
            assert_eq!(back.name(), "Safe code");
            assert_eq!(back.description(), Some("Try 1938"));
            assert_eq!(back.position(), hint.position());
            assert_eq!(back.elements().unwrap(), [id]);
        }

        #[test]
        fn absent_fields_are_omitted() {
            let json = serde_json::to_string(&Hint::new("Bare").unwrap()).unwrap();
            assert_eq!(json, r#"{"name":"Bare"}"#);
        }
    }
}
