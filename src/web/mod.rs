//! Web dashboard layer for browser-based UI.
//!
//! Renders the analytics dashboard with Askama templates.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Dashboard route configuration

pub mod handlers;
pub mod routes;
