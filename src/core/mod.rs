//! Core library components.
//!
//! This module contains the reusable logic for locating, decrypting,
//! editing and consuming a group's encrypted secrets.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod edit;
pub mod ephemeral;
pub mod exec;
pub mod store;
pub mod types;
pub mod wrap;
