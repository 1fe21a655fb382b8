//! Physical element entity - People and objects placed on the game map
//!
//! Any person or physical object in the escape game is a physical element:
//! rooms, doors, keys, locks, players, staff, or custom props. An element may
//! carry a registry of named states (a locked door, an unlocked door) with
//! one distinguished initial state. This is deliberately not a transition
//! machine - there is no (state, trigger) -> state function. A future
//! event/trigger layer is expected to reassign and read states, nothing more.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::common::require_non_blank;
use crate::domain::error::DomainError;
use crate::domain::value_objects::{ElementType, ShapePath, StateId};

/// A person or physical object in the escape game
///
/// # Invariants
///
/// - `name` is never empty or whitespace-only
/// - the state registry, when present, holds at least one state and a valid
///   initial state (structural, see [`StateSet`])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicalElement {
    name: String,
    shape: ShapePath,
    accessible: bool,
    element_type: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    states: Option<StateSet>,
}

impl PhysicalElement {
    /// Create a new physical element with no states.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the name is blank.
    pub fn new(
        name: impl Into<String>,
        shape: ShapePath,
        accessible: bool,
        element_type: ElementType,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        require_non_blank(&name, "physical element")?;
        Ok(Self {
            name,
            shape,
            accessible,
            element_type,
            description: None,
            states: None,
        })
    }

    /// Set the description during construction.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // ========================================================================
    // Field accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        require_non_blank(&name, "physical element")?;
        self.name = name;
        Ok(())
    }

    pub fn shape(&self) -> &ShapePath {
        &self.shape
    }

    pub fn set_shape(&mut self, shape: ShapePath) {
        self.shape = shape;
    }

    /// Whether players can interact with this element at game start.
    pub fn accessible(&self) -> bool {
        self.accessible
    }

    pub fn set_accessible(&mut self, accessible: bool) {
        self.accessible = accessible;
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn set_element_type(&mut self, element_type: ElementType) {
        self.element_type = element_type;
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

    // ========================================================================
    // State registry
    // ========================================================================

    /// The element's state registry, absent while the element has no states.
    pub fn states(&self) -> Option<&StateSet> {
        self.states.as_ref()
    }

    /// The identifier of the initial state, absent iff the element has no
    /// states.
    pub fn initial_state(&self) -> Option<StateId> {
        self.states.as_ref().map(StateSet::initial)
    }

    pub fn contains_state(&self, id: StateId) -> bool {
        self.states.as_ref().is_some_and(|set| set.contains(id))
    }

    /// Identifiers of all states; empty when the element has none.
    pub fn state_ids(&self) -> Vec<StateId> {
        self.states.as_ref().map_or_else(Vec::new, StateSet::ids)
    }

    /// Look up a state by identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the element has no state keyed by
    /// `id`.
    pub fn state(&self, id: StateId) -> Result<&ElementState, DomainError> {
        self.states
            .as_ref()
            .and_then(|set| set.get(id))
            .ok_or_else(|| DomainError::not_found("State", id))
    }

    pub fn state_mut(&mut self, id: StateId) -> Result<&mut ElementState, DomainError> {
        self.states
            .as_mut()
            .and_then(|set| set.states.get_mut(&id))
            .ok_or_else(|| DomainError::not_found("State", id))
    }

    /// Add a state, allocating its identifier.
    ///
    /// The first state added becomes the initial state; later additions leave
    /// the initial state untouched.
    pub fn add_state(&mut self, state: ElementState) -> StateId {
        let id = StateId::new();
        match self.states.as_mut() {
            Some(set) => {
                set.states.insert(id, state);
            }
            None => self.states = Some(StateSet::new(id, state)),
        }
        id
    }

    /// Reassign the initial state to an existing state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if `id` is not a key of the state
    /// registry.
    pub fn set_initial_state(&mut self, id: StateId) -> Result<(), DomainError> {
        let set = self
            .states
            .as_mut()
            .filter(|set| set.contains(id))
            .ok_or_else(|| DomainError::not_found("State", id))?;
        set.initial = id;
        Ok(())
    }

    /// Remove a non-initial state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IntegrityViolation` if `id` is the current
    /// initial state (reassign the initial state first, or use
    /// [`delete_initial_state`](Self::delete_initial_state)), and
    /// `DomainError::NotFound` if `id` is absent.
    pub fn delete_state(&mut self, id: StateId) -> Result<ElementState, DomainError> {
        let set = self
            .states
            .as_mut()
            .ok_or_else(|| DomainError::not_found("State", id))?;
        if set.initial == id {
            return Err(DomainError::integrity(
                "the initial state cannot be deleted; reassign the initial state first",
            ));
        }
        set.states
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("State", id))
    }

    /// Reassign the initial state to `new_initial` and remove the old initial
    /// state in one step. Returns the removed state.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidArgument` if `new_initial` is already the
    ///   initial state
    /// - `DomainError::NotFound` if `new_initial` is not a key of the registry
    /// - `DomainError::IntegrityViolation` if only one state remains (use
    ///   [`delete_only_state`](Self::delete_only_state))
    pub fn delete_initial_state(
        &mut self,
        new_initial: StateId,
    ) -> Result<ElementState, DomainError> {
        let set = self
            .states
            .as_mut()
            .ok_or_else(|| DomainError::not_found("State", new_initial))?;
        if new_initial == set.initial {
            return Err(DomainError::invalid_argument(
                "the replacement initial state must differ from the current initial state",
            ));
        }
        if !set.contains(new_initial) {
            return Err(DomainError::not_found("State", new_initial));
        }
        if set.states.len() <= 1 {
            return Err(DomainError::integrity(
                "the initial state is the only state left; use delete_only_state",
            ));
        }

        let old_initial = set.initial;
        let removed = set
            .states
            .remove(&old_initial)
            .ok_or_else(|| DomainError::integrity("state registry lost its initial state"))?;
        set.initial = new_initial;
        Ok(removed)
    }

    /// Remove the element's only remaining state, clearing the registry and
    /// the initial-state reference together. Returns the removed state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IntegrityViolation` unless exactly one state
    /// remains.
    pub fn delete_only_state(&mut self) -> Result<ElementState, DomainError> {
        match self.states.as_ref().map(|set| set.states.len()) {
            Some(1) => {}
            Some(_) => {
                return Err(DomainError::integrity(
                    "delete_only_state is only valid when exactly one state remains",
                ))
            }
            None => {
                return Err(DomainError::integrity(
                    "the element has no states to delete",
                ))
            }
        }
        self.states
            .take()
            .and_then(|set| set.states.into_values().next())
            .ok_or_else(|| DomainError::integrity("state registry lost its only state"))
    }

    /// Re-check the representation invariants, including the state registry's
    /// structure.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_blank(&self.name, "physical element")?;
        if let Some(set) = &self.states {
            set.validate()?;
        }
        Ok(())
    }
}

/// The states of a physical element plus the distinguished initial state.
///
/// A `StateSet` always holds at least one state, and `initial` is always a
/// key of the map. Elements store `Option<StateSet>`, so "an initial state
/// exists iff any states exist" holds by construction rather than by
/// call-site discipline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSet {
    initial: StateId,
    states: HashMap<StateId, ElementState>,
}

impl StateSet {
    fn new(initial: StateId, state: ElementState) -> Self {
        let mut states = HashMap::new();
        states.insert(initial, state);
        Self { initial, states }
    }

    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn get(&self, id: StateId) -> Option<&ElementState> {
        self.states.get(&id)
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    pub fn ids(&self) -> Vec<StateId> {
        self.states.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &ElementState)> {
        self.states.iter().map(|(id, state)| (*id, state))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// A present registry is never empty.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.states.is_empty() {
            return Err(DomainError::integrity(
                "a present state registry must hold at least one state",
            ));
        }
        if !self.states.contains_key(&self.initial) {
            return Err(DomainError::integrity(
                "the initial state must be one of the element's states",
            ));
        }
        for state in self.states.values() {
            state.validate()?;
        }
        Ok(())
    }
}

/// A named state a physical element can be in
///
/// States exist so a future event/trigger layer can describe changes like a
/// locked door becoming unlocked; the data model only records the options.
///
/// # Invariants
///
/// - `name` is never empty or whitespace-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementState {
    name: String,
    accessible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl ElementState {
    /// Create a new state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the name is blank.
    pub fn new(name: impl Into<String>, accessible: bool) -> Result<Self, DomainError> {
        let name = name.into();
        require_non_blank(&name, "state")?;
        Ok(Self {
            name,
            accessible,
            description: None,
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
        require_non_blank(&name, "state")?;
        self.name = name;
        Ok(())
    }

    /// Whether the owning element can be switched into this state.
    pub fn accessible(&self) -> bool {
        self.accessible
    }

    pub fn set_accessible(&mut self, accessible: bool) {
        self.accessible = accessible;
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

    /// Re-check the representation invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_blank(&self.name, "state")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door() -> PhysicalElement {
        PhysicalElement::new(
            "Main door",
            ShapePath::new("M 0 0 H 20 V 4 H 0 Z"),
            false,
            ElementType::Door,
        )
        .unwrap()
    }

    mod constructor {
        use super::*;

        #[test]
        fn new_element_has_no_states() {
            let element = door();
            assert_eq!(element.name(), "Main door");
            assert_eq!(element.element_type(), ElementType::Door);
            assert!(!element.accessible());
            assert!(element.states().is_none());
            assert!(element.initial_state().is_none());
        }

        #[test]
        fn blank_names_rejected() {
            for name in ["", "   ", "\n"] {
                let result =
                    PhysicalElement::new(name, ShapePath::new("M 0 0"), true, ElementType::Room);
                assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
            }
        }

        #[test]
        fn state_constructor_rejects_blank_names() {
            assert!(ElementState::new("  ", false).is_err());
        }

        #[test]
        fn builder_sets_description() {
            let element = door().with_description("Heavy oak door");
            assert_eq!(element.description(), Some("Heavy oak door"));
        }
    }

    mod field_mutation {
        use super::*;

        #[test]
        fn set_name_revalidates() {
            let mut element = door();
            assert!(element.set_name("").is_err());
            assert_eq!(element.name(), "Main door");
            element.set_name("Back door").unwrap();
            assert_eq!(element.name(), "Back door");
        }

        #[test]
        fn shape_and_type_are_replaceable() {
            let mut element = door();
            element.set_shape(ShapePath::new("M 5 5 H 10"));
            element.set_element_type(ElementType::Custom);
            element.set_accessible(true);
            assert_eq!(element.shape().as_str(), "M 5 5 H 10");
            assert_eq!(element.element_type(), ElementType::Custom);
            assert!(element.accessible());
        }
    }

    mod state_registry {
        use super::*;

        #[test]
        fn first_state_becomes_initial() {
            let mut element = door();
            let locked = element.add_state(ElementState::new("locked", false).unwrap());
            assert_eq!(element.initial_state(), Some(locked));
            assert!(element.contains_state(locked));
        }

        #[test]
        fn second_state_does_not_displace_initial() {
            let mut element = door();
            let locked = element.add_state(ElementState::new("locked", false).unwrap());
            let unlocked = element.add_state(ElementState::new("unlocked", true).unwrap());
            assert_eq!(element.initial_state(), Some(locked));
            assert!(element.contains_state(unlocked));
            assert_eq!(element.states().unwrap().len(), 2);
        }

        #[test]
        fn set_initial_state_requires_known_id() {
            let mut element = door();
            let locked = element.add_state(ElementState::new("locked", false).unwrap());
            let unlocked = element.add_state(ElementState::new("unlocked", true).unwrap());

            element.set_initial_state(unlocked).unwrap();
            assert_eq!(element.initial_state(), Some(unlocked));

            let result = element.set_initial_state(StateId::new());
            assert!(matches!(result, Err(DomainError::NotFound { .. })));
            assert_eq!(element.initial_state(), Some(unlocked));

            // the displaced state is still present
            assert!(element.contains_state(locked));
        }

        #[test]
        fn state_lookup() {
            let mut element = door();
            let locked = element.add_state(
                ElementState::new("locked", false)
                    .unwrap()
                    .with_description("Deadbolt engaged"),
            );
            let state = element.state(locked).unwrap();
            assert_eq!(state.name(), "locked");
            assert_eq!(state.description(), Some("Deadbolt engaged"));

            assert!(matches!(
                element.state(StateId::new()),
                Err(DomainError::NotFound { .. })
            ));
        }

        #[test]
        fn state_mut_allows_edits_in_place() {
            let mut element = door();
            let locked = element.add_state(ElementState::new("locked", false).unwrap());
            element.state_mut(locked).unwrap().set_accessible(true);
            assert!(element.state(locked).unwrap().accessible());
        }

        #[test]
        fn delete_state_refuses_the_initial() {
            let mut element = door();
            let locked = element.add_state(ElementState::new("locked", false).unwrap());
            element.add_state(ElementState::new("unlocked", true).unwrap());

            let result = element.delete_state(locked);
            assert!(matches!(result, Err(DomainError::IntegrityViolation(_))));
            assert!(element.contains_state(locked));
        }

        #[test]
        fn delete_state_removes_non_initial() {
            let mut element = door();
            let locked = element.add_state(ElementState::new("locked", false).unwrap());
            let unlocked = element.add_state(ElementState::new("unlocked", true).unwrap());

            let removed = element.delete_state(unlocked).unwrap();
            assert_eq!(removed.name(), "unlocked");
            assert!(!element.contains_state(unlocked));
            assert_eq!(element.initial_state(), Some(locked));
        }

        #[test]
        fn delete_state_unknown_id_fails() {
            let mut element = door();
            element.add_state(ElementState::new("locked", false).unwrap());
            assert!(matches!(
                element.delete_state(StateId::new()),
                Err(DomainError::NotFound { .. })
            ));
        }

        #[test]
        fn delete_initial_state_reassigns_and_removes() {
            let mut element = door();
            let locked = element.add_state(ElementState::new("locked", false).unwrap());
            let unlocked = element.add_state(ElementState::new("unlocked", true).unwrap());

            let removed = element.delete_initial_state(unlocked).unwrap();
            assert_eq!(removed.name(), "locked");
            assert_eq!(element.initial_state(), Some(unlocked));
            assert!(!element.contains_state(locked));
            assert_eq!(element.states().unwrap().len(), 1);
        }

        #[test]
        fn delete_initial_state_rejects_current_initial() {
            let mut element = door();
            let locked = element.add_state(ElementState::new("locked", false).unwrap());
            element.add_state(ElementState::new("unlocked", true).unwrap());

            let result = element.delete_initial_state(locked);
            assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
            assert_eq!(element.initial_state(), Some(locked));
        }

        #[test]
        fn delete_initial_state_rejects_unknown_replacement() {
            let mut element = door();
            element.add_state(ElementState::new("locked", false).unwrap());
            element.add_state(ElementState::new("unlocked", true).unwrap());

            let result = element.delete_initial_state(StateId::new());
            assert!(matches!(result, Err(DomainError::NotFound { .. })));
            assert_eq!(element.states().unwrap().len(), 2);
        }

        #[test]
        fn delete_initial_state_rejects_last_state() {
            let mut element = door();
            element.add_state(ElementState::new("locked", false).unwrap());

            let result = element.delete_initial_state(StateId::new());
            assert!(result.is_err());
            assert_eq!(element.states().unwrap().len(), 1);
        }

        #[test]
        fn delete_only_state_clears_registry_and_initial_together() {
            let mut element = door();
            element.add_state(ElementState::new("locked", false).unwrap());

            let removed = element.delete_only_state().unwrap();
            assert_eq!(removed.name(), "locked");
            assert!(element.states().is_none());
            assert!(element.initial_state().is_none());
        }

        #[test]
        fn delete_only_state_rejects_multiple_states() {
            let mut element = door();
            element.add_state(ElementState::new("locked", false).unwrap());
            element.add_state(ElementState::new("unlocked", true).unwrap());

            let result = element.delete_only_state();
            assert!(matches!(result, Err(DomainError::IntegrityViolation(_))));
            assert_eq!(element.states().unwrap().len(), 2);
        }

        #[test]
        fn delete_only_state_rejects_empty_registry() {
            let mut element = door();
            assert!(matches!(
                element.delete_only_state(),
                Err(DomainError::IntegrityViolation(_))
            ));
        }

        #[test]
        fn registry_can_be_rebuilt_after_clearing() {
            let mut element = door();
            element.add_state(ElementState::new("locked", false).unwrap());
            element.delete_only_state().unwrap();

            let open = element.add_state(ElementState::new("open", true).unwrap());
            assert_eq!(element.initial_state(), Some(open));
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn fresh_element_validates() {
            assert!(door().validate().is_ok());
        }

        #[test]
        fn element_with_states_validates() {
            let mut element = door();
            element.add_state(ElementState::new("locked", false).unwrap());
            element.add_state(ElementState::new("unlocked", true).unwrap());
            assert!(element.validate().is_ok());
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn round_trip_preserves_states_and_initial() {
            let mut element = door().with_description("Entry door");
            let locked = element.add_state(ElementState::new("locked", false).unwrap());
            let unlocked = element.add_state(ElementState::new("unlocked", true).unwrap());
            element.set_initial_state(unlocked).unwrap();

            let json = serde_json::to_string(&element).unwrap();
            let back: PhysicalElement = serde_json::from_str(&json).unwrap();

            assert_eq!(back.name(), "Main door");
            assert_eq!(back.description(), Some("Entry door"));
            assert_eq!(back.initial_state(), Some(unlocked));
            assert!(back.contains_state(locked));
            assert_eq!(back.states().unwrap().len(), 2);
            assert!(back.validate().is_ok());
        }

        #[test]
        fn stateless_element_omits_registry() {
            let json = serde_json::to_string(&door()).unwrap();
            assert!(!json.contains("states"));
        }
    }
}
