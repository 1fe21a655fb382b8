//! Escape game aggregate - The root holding every entity of one game
//!
//! All modifications to game data go through this aggregate root. It owns the
//! four entity collections and is the single authority for "does this
//! identifier resolve to a physical element", the question hint and problem
//! references depend on.
//!
//! There is no global instance: callers create an `EscapeGame` and pass it by
//! reference into whatever needs it, so several games can coexist and tests
//! never share state.

use std::collections::HashMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::common::{require_non_blank, require_non_negative};
use crate::domain::entities::{Countdown, Hint, PhysicalElement, Problem};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{
    duration_seconds_opt, CountdownId, ElementId, HintId, ProblemId,
};

/// The aggregate root of one escape game.
///
/// # Invariants
///
/// - `name` is never empty or whitespace-only
/// - `players_minimum <= players_maximum` whenever both are set
/// - `estimated_duration` is never negative
///
/// Deleting a physical element does **not** touch hints or problems that
/// reference it; the reference dangles until the caller repairs it. This
/// mirrors how editing surfaces use the model (delete, then re-prompt the
/// designer), and [`validate`](Self::validate) reports any reference left
/// behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscapeGame {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    players_minimum: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    players_maximum: Option<u32>,
    #[serde(
        with = "duration_seconds_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    estimated_duration: Option<Duration>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    physical_elements: HashMap<ElementId, PhysicalElement>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    hints: HashMap<HintId, Hint>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    problems: HashMap<ProblemId, Problem>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    countdowns: HashMap<CountdownId, Countdown>,
}

impl EscapeGame {
    /// Create an empty escape game.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        require_non_blank(&name, "escape game")?;
        info!("Created escape game: {}", name);
        Ok(Self {
            name,
            description: None,
            difficulty: None,
            players_minimum: None,
            players_maximum: None,
            estimated_duration: None,
            physical_elements: HashMap::new(),
            hints: HashMap::new(),
            problems: HashMap::new(),
            countdowns: HashMap::new(),
        })
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        require_non_blank(&name, "escape game")?;
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

    /// Free-text difficulty label ("beginner", "3/5", whatever the designer
    /// uses).
    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    pub fn set_difficulty(&mut self, difficulty: impl Into<String>) {
        self.difficulty = Some(difficulty.into());
    }

    pub fn clear_difficulty(&mut self) {
        self.difficulty = None;
    }

    pub fn players_minimum(&self) -> Option<u32> {
        self.players_minimum
    }

    /// Set the minimum player count.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if a stored maximum would end
    /// up below the new minimum.
    pub fn set_players_minimum(&mut self, minimum: u32) -> Result<(), DomainError> {
        if self.players_maximum.is_some_and(|max| minimum > max) {
            return Err(DomainError::invalid_argument(format!(
                "players minimum {minimum} exceeds the current maximum"
            )));
        }
        self.players_minimum = Some(minimum);
        Ok(())
    }

    pub fn clear_players_minimum(&mut self) {
        self.players_minimum = None;
    }

    pub fn players_maximum(&self) -> Option<u32> {
        self.players_maximum
    }

    /// Set the maximum player count.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if a stored minimum would end
    /// up above the new maximum.
    pub fn set_players_maximum(&mut self, maximum: u32) -> Result<(), DomainError> {
        if self.players_minimum.is_some_and(|min| maximum < min) {
            return Err(DomainError::invalid_argument(format!(
                "players maximum {maximum} is below the current minimum"
            )));
        }
        self.players_maximum = Some(maximum);
        Ok(())
    }

    pub fn clear_players_maximum(&mut self) {
        self.players_maximum = None;
    }

    /// Set both player bounds in one step, avoiding the ordering trap of
    /// setting them individually.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if `minimum > maximum`; neither
    /// bound changes on failure.
    pub fn set_players_range(&mut self, minimum: u32, maximum: u32) -> Result<(), DomainError> {
        if minimum > maximum {
            return Err(DomainError::invalid_argument(format!(
                "players range [{minimum}, {maximum}] has minimum above maximum"
            )));
        }
        self.players_minimum = Some(minimum);
        self.players_maximum = Some(maximum);
        Ok(())
    }

    pub fn estimated_duration(&self) -> Option<Duration> {
        self.estimated_duration
    }

    /// Set the estimated play time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the duration is negative.
    pub fn set_estimated_duration(&mut self, duration: Duration) -> Result<(), DomainError> {
        require_non_negative(duration, "estimated duration")?;
        self.estimated_duration = Some(duration);
        Ok(())
    }

    pub fn clear_estimated_duration(&mut self) {
        self.estimated_duration = None;
    }

    // ========================================================================
    // Physical elements
    // ========================================================================

    /// Store a physical element, allocating its identifier.
    pub fn add_physical_element(&mut self, element: PhysicalElement) -> ElementId {
        let id = ElementId::new();
        info!(element_id = %id, "Added physical element: {}", element.name());
        self.physical_elements.insert(id, element);
        id
    }

    /// Remove a physical element, returning it.
    ///
    /// Hints and problems referencing `id` are left untouched and now hold a
    /// dangling reference; run [`validate`](Self::validate) to find them.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no physical element is keyed by
    /// `id`.
    pub fn delete_physical_element(&mut self, id: ElementId) -> Result<PhysicalElement, DomainError> {
        let element = self
            .physical_elements
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("PhysicalElement", id))?;
        info!(element_id = %id, "Deleted physical element: {}", element.name());
        Ok(element)
    }

    /// Look up a physical element.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if absent.
    pub fn physical_element(&self, id: ElementId) -> Result<&PhysicalElement, DomainError> {
        self.physical_elements
            .get(&id)
            .ok_or_else(|| DomainError::not_found("PhysicalElement", id))
    }

    pub fn physical_element_mut(
        &mut self,
        id: ElementId,
    ) -> Result<&mut PhysicalElement, DomainError> {
        self.physical_elements
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("PhysicalElement", id))
    }

    /// The integrity oracle hint/problem references are checked against.
    /// Total; never fails.
    pub fn contains_physical_element(&self, id: ElementId) -> bool {
        self.physical_elements.contains_key(&id)
    }

    pub fn physical_element_ids(&self) -> Vec<ElementId> {
        self.physical_elements.keys().copied().collect()
    }

    pub fn physical_elements(&self) -> impl Iterator<Item = (ElementId, &PhysicalElement)> {
        self.physical_elements.iter().map(|(id, e)| (*id, e))
    }

    // ========================================================================
    // Hints
    // ========================================================================

    pub fn add_hint(&mut self, hint: Hint) -> HintId {
        let id = HintId::new();
        info!(hint_id = %id, "Added hint: {}", hint.name());
        self.hints.insert(id, hint);
        id
    }

    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no hint is keyed by `id`.
    pub fn delete_hint(&mut self, id: HintId) -> Result<Hint, DomainError> {
        let hint = self
            .hints
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Hint", id))?;
        info!(hint_id = %id, "Deleted hint: {}", hint.name());
        Ok(hint)
    }

    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if absent.
    pub fn hint(&self, id: HintId) -> Result<&Hint, DomainError> {
        self.hints
            .get(&id)
            .ok_or_else(|| DomainError::not_found("Hint", id))
    }

    pub fn hint_mut(&mut self, id: HintId) -> Result<&mut Hint, DomainError> {
        self.hints
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Hint", id))
    }

    pub fn contains_hint(&self, id: HintId) -> bool {
        self.hints.contains_key(&id)
    }

    pub fn hint_ids(&self) -> Vec<HintId> {
        self.hints.keys().copied().collect()
    }

    pub fn hints(&self) -> impl Iterator<Item = (HintId, &Hint)> {
        self.hints.iter().map(|(id, h)| (*id, h))
    }

    /// Link a hint to a physical element, checking the element against the
    /// live collection.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if either identifier fails to resolve.
    pub fn add_hint_element(
        &mut self,
        hint_id: HintId,
        element_id: ElementId,
    ) -> Result<(), DomainError> {
        let elements = &self.physical_elements;
        let hint = self
            .hints
            .get_mut(&hint_id)
            .ok_or_else(|| DomainError::not_found("Hint", hint_id))?;
        debug!(hint_id = %hint_id, element_id = %element_id, "Linking hint to physical element");
        hint.add_element(element_id, |id| elements.contains_key(&id))
    }

    /// Unlink a hint from a physical element.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the hint is absent or does not
    /// reference `element_id`.
    pub fn delete_hint_element(
        &mut self,
        hint_id: HintId,
        element_id: ElementId,
    ) -> Result<(), DomainError> {
        let hint = self
            .hints
            .get_mut(&hint_id)
            .ok_or_else(|| DomainError::not_found("Hint", hint_id))?;
        hint.delete_element(element_id)
    }

    // ========================================================================
    // Problems
    // ========================================================================

    pub fn add_problem(&mut self, problem: Problem) -> ProblemId {
        let id = ProblemId::new();
        info!(problem_id = %id, "Added problem: {}", problem.name());
        self.problems.insert(id, problem);
        id
    }

    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no problem is keyed by `id`.
    pub fn delete_problem(&mut self, id: ProblemId) -> Result<Problem, DomainError> {
        let problem = self
            .problems
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Problem", id))?;
        info!(problem_id = %id, "Deleted problem: {}", problem.name());
        Ok(problem)
    }

    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if absent.
    pub fn problem(&self, id: ProblemId) -> Result<&Problem, DomainError> {
        self.problems
            .get(&id)
            .ok_or_else(|| DomainError::not_found("Problem", id))
    }

    pub fn problem_mut(&mut self, id: ProblemId) -> Result<&mut Problem, DomainError> {
        self.problems
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Problem", id))
    }

    pub fn contains_problem(&self, id: ProblemId) -> bool {
        self.problems.contains_key(&id)
    }

    pub fn problem_ids(&self) -> Vec<ProblemId> {
        self.problems.keys().copied().collect()
    }

    pub fn problems(&self) -> impl Iterator<Item = (ProblemId, &Problem)> {
        self.problems.iter().map(|(id, p)| (*id, p))
    }

    /// Link a problem to a physical element, checking the element against the
    /// live collection.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if either identifier fails to resolve.
    pub fn add_problem_element(
        &mut self,
        problem_id: ProblemId,
        element_id: ElementId,
    ) -> Result<(), DomainError> {
        let elements = &self.physical_elements;
        let problem = self
            .problems
            .get_mut(&problem_id)
            .ok_or_else(|| DomainError::not_found("Problem", problem_id))?;
        debug!(problem_id = %problem_id, element_id = %element_id, "Linking problem to physical element");
        problem.add_element(element_id, |id| elements.contains_key(&id))
    }

    /// Unlink a problem from a physical element.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the problem is absent or does not
    /// reference `element_id`.
    pub fn delete_problem_element(
        &mut self,
        problem_id: ProblemId,
        element_id: ElementId,
    ) -> Result<(), DomainError> {
        let problem = self
            .problems
            .get_mut(&problem_id)
            .ok_or_else(|| DomainError::not_found("Problem", problem_id))?;
        problem.delete_element(element_id)
    }

    // ========================================================================
    // Countdowns
    // ========================================================================

    pub fn add_countdown(&mut self, countdown: Countdown) -> CountdownId {
        let id = CountdownId::new();
        info!(countdown_id = %id, "Added countdown: {}", countdown.name());
        self.countdowns.insert(id, countdown);
        id
    }

    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no countdown is keyed by `id`.
    pub fn delete_countdown(&mut self, id: CountdownId) -> Result<Countdown, DomainError> {
        let countdown = self
            .countdowns
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Countdown", id))?;
        info!(countdown_id = %id, "Deleted countdown: {}", countdown.name());
        Ok(countdown)
    }

    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if absent.
    pub fn countdown(&self, id: CountdownId) -> Result<&Countdown, DomainError> {
        self.countdowns
            .get(&id)
            .ok_or_else(|| DomainError::not_found("Countdown", id))
    }

    pub fn countdown_mut(&mut self, id: CountdownId) -> Result<&mut Countdown, DomainError> {
        self.countdowns
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Countdown", id))
    }

    pub fn contains_countdown(&self, id: CountdownId) -> bool {
        self.countdowns.contains_key(&id)
    }

    pub fn countdown_ids(&self) -> Vec<CountdownId> {
        self.countdowns.keys().copied().collect()
    }

    pub fn countdowns(&self) -> impl Iterator<Item = (CountdownId, &Countdown)> {
        self.countdowns.iter().map(|(id, c)| (*id, c))
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Re-check every representation invariant in the aggregate: the game's
    /// own fields, every owned entity, and every hint/problem element
    /// reference against the live physical-element collection.
    ///
    /// This is the sweep that surfaces dangling references left behind by
    /// [`delete_physical_element`](Self::delete_physical_element).
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_blank(&self.name, "escape game")?;
        if let (Some(min), Some(max)) = (self.players_minimum, self.players_maximum) {
            if min > max {
                return Err(DomainError::integrity(format!(
                    "players range [{min}, {max}] has minimum above maximum"
                )));
            }
        }
        if let Some(duration) = self.estimated_duration {
            require_non_negative(duration, "estimated duration")?;
        }
        for element in self.physical_elements.values() {
            element.validate()?;
        }
        for countdown in self.countdowns.values() {
            countdown.validate()?;
        }
        let exists = |id: ElementId| self.physical_elements.contains_key(&id);
        for hint in self.hints.values() {
            hint.validate(exists)?;
        }
        for problem in self.problems.values() {
            problem.validate(exists)?;
        }
        Ok(())
    }
}
