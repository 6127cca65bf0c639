//! Domain logic for Glaze: thumbnail generation, the overlay model and its
//! editor controls, and validation rules for the catalog, purchase ledger
//! and usage telemetry.
//!
//! Nothing in this crate touches the database or the network.

pub mod catalog;
pub mod controls;
pub mod error;
pub mod overlay;
pub mod purchase;
pub mod roles;
pub mod thumbnail;
pub mod types;
pub mod usage;
