//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Event store implementations (PostgreSQL and in-memory)
//! - [`sink`] - External analytics forwarding (GA4 and no-op)

pub mod persistence;
pub mod sink;
