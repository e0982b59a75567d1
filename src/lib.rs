//! Roster Engine for aircraft-maintenance shift planning.
//!
//! This crate computes daily manhours and license coverage, decides whether an
//! off day can be granted without breaching staffing floors, and allocates
//! qualified technicians to aircraft work requirements.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
