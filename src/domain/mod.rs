//! Domain layer containing tracked entities and the logic built on them.
//!
//! # Architecture
//!
//! - [`entities`] - Click and visit records
//! - [`repositories`] - Event store trait definitions
//! - [`aggregate`] - Pure aggregation of raw events into derived views
//! - [`route_catalog`] - Static list of tracked, navigable routes
//! - [`sink_event`] - Event model forwarded to the external analytics sink
//! - [`sink_worker`] - Non-blocking dispatch and background forwarding
//!
//! # Forwarding Flow
//!
//! 1. HTTP handler records a click or visit through the event store
//! 2. A [`sink_event::SinkEvent`] is queued via [`sink_worker::SinkDispatcher`] (never blocks)
//! 3. [`sink_worker::run_sink_worker`] delivers it with timeout and retry
//! 4. Delivery failures are logged and counted, never returned to the caller

pub mod aggregate;
pub mod entities;
pub mod repositories;
pub mod route_catalog;
pub mod sink_event;
pub mod sink_worker;
