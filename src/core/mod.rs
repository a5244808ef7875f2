//! Core library components.
//!
//! This module contains the reusable logic for searching and decrypting a
//! password store: scoring, traversal, the keyring and OpenPGP decryption.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod keyring;
pub mod matcher;
pub mod search;
pub mod session;
pub mod store;
