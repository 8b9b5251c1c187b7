//! Gridfall - a browser puzzle game client.
//!
//! Accounts and session state live in [`core`], persisted to the
//! browser's localStorage; the Leptos UI in [`ui`] renders them and
//! drives the transitions.

pub mod app;
pub mod core;
pub mod ui;
