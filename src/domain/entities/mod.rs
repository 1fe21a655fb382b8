//! Domain entities - Validated records owned by the escape game

mod countdown;
mod hint;
mod physical_element;
mod problem;

pub use countdown::Countdown;
pub use hint::Hint;
pub use physical_element::{ElementState, PhysicalElement, StateSet};
pub use problem::Problem;
