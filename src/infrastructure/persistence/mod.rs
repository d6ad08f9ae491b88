//! Event store implementations.
//!
//! # Repositories
//!
//! - [`PgEventRepository`] - PostgreSQL-backed store (via SQLx)
//! - [`MemoryEventRepository`] - in-process store used without a database

pub mod memory_event_repository;
pub mod pg_event_repository;

pub use memory_event_repository::MemoryEventRepository;
pub use pg_event_repository::PgEventRepository;
