//! EscBldr core library.
//!
//! The validated data model behind an escape-game editor: a named game made of
//! physical elements (rooms, doors, locks, props), the states those elements
//! can be in, hints and problems referencing them by identifier, and
//! countdown timers. Every entity enforces its own invariants on construction
//! and on every mutation, and the [`EscapeGame`] aggregate root mediates the
//! referential-integrity checks between them.
//!
//! Rendering, dialogs, and locale handling live in consuming crates; this
//! crate holds the entities, enforces their invariants, and nothing else.
//!
//! ## Structure
//!
//! - `domain/value_objects/` - Identifier newtypes and small validated types
//! - `domain/entities/` - PhysicalElement, Hint, Problem, Countdown
//! - `domain/aggregates/` - The EscapeGame aggregate root
//!
//! ## Example
//!
//! ```
//! use escbldr_core::{ElementState, ElementType, EscapeGame, PhysicalElement, ShapePath};
//!
//! # fn main() -> Result<(), escbldr_core::DomainError> {
//! let mut game = EscapeGame::new("The Vault")?;
//! let mut door = PhysicalElement::new(
//!     "Main door",
//!     ShapePath::new("M 0 0 H 20 V 4 H 0 Z"),
//!     false,
//!     ElementType::Door,
//! )?;
//! door.add_state(ElementState::new("locked", false)?);
//! let door_id = game.add_physical_element(door);
//! assert!(game.contains_physical_element(door_id));
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub use domain::aggregates::EscapeGame;
pub use domain::entities::{Countdown, ElementState, Hint, PhysicalElement, Problem, StateSet};
pub use domain::error::DomainError;
pub use domain::value_objects::{
    CountdownId, ElementId, ElementRefs, ElementType, HintId, MapPosition, ProblemId, ShapePath,
    StateId, StatePreset,
};
