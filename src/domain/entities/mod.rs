//! Core domain entities representing the tracked data.
//!
//! # Entity Types
//!
//! - [`Click`] - A button click
//! - [`Visit`] - A request to a tracked route
//! - [`StoredEvent`] - Either of the above, tagged with its [`EventKind`]
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! (`NewClick`, `NewVisit`). Stored records are never updated.

pub mod click;
pub mod event;
pub mod visit;

pub use click::{Click, NewClick};
pub use event::{EventKind, StoredEvent};
pub use visit::{NewVisit, Visit};
