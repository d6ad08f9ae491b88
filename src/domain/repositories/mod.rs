//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod event_repository;

pub use event_repository::{EventRepository, query_recent};

#[cfg(test)]
pub use event_repository::MockEventRepository;
