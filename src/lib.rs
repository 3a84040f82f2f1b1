//! cafedex - a server-rendered café directory.
//!
//! One SQLite table of cafés, a handful of HTML routes to browse and
//! maintain it. State is built once at startup and injected into handlers;
//! nothing is looked up through globals.

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod routes;
pub mod state;
pub mod views;
