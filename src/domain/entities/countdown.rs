//! Countdown entity - Timers bounding a task or the whole game

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::common::{require_non_blank, require_non_negative};
use crate::domain::error::DomainError;
use crate::domain::value_objects::duration_seconds;

/// A timer under which a task, or the escape game itself, must be completed.
///
/// Countdowns are standalone records with no relationships to other entities.
///
/// # Invariants
///
/// - `name` is never empty or whitespace-only
/// - `duration` is never negative
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    name: String,
    #[serde(with = "duration_seconds")]
    duration: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Countdown {
    /// Create a new countdown.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the name is blank or the
    /// duration is negative.
    pub fn new(name: impl Into<String>, duration: Duration) -> Result<Self, DomainError> {
        let name = name.into();
        require_non_blank(&name, "countdown")?;
        require_non_negative(duration, "countdown duration")?;
        Ok(Self {
            name,
            duration,
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
        require_non_blank(&name, "countdown")?;
        self.name = name;
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Duration) -> Result<(), DomainError> {
        require_non_negative(duration, "countdown duration")?;
        self.duration = duration;
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

    /// Re-check the representation invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_blank(&self.name, "countdown")?;
        require_non_negative(self.duration, "countdown duration")
    }
}
