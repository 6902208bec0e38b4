//! # Pet Clinic Backend
//!
//! Owner record keeping for a veterinary clinic.
//!
//! This crate serves the owner pages of the clinic application: creating,
//! searching, editing and viewing owners. Searching by last name resolves to
//! no match, a single owner, or a list whose telephone numbers are shown with
//! the dialing prefix of each owner's city.
//!
//! ## Architecture
//!
//! - [`api`]: Owner record types shared by every layer
//! - [`config`]: TOML configuration with environment overrides
//! - [`db`]: Repository pattern, in-memory and file-backed stores
//! - [`services`]: Owner search flow and form checks
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod db;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
