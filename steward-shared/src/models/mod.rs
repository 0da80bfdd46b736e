//! Entity records and their CRUD operations.
//!
//! Every operation is one parameterized statement against the shared
//! `AnyPool`; driver errors propagate unchanged to the caller. Updates write
//! the full field set and deletes of missing ids succeed silently, matching
//! the storage contract the API layer exposes.

pub mod donation;
pub mod event;
pub mod expense;
pub mod lookup;
pub mod member;
pub mod resource;
pub mod settings;
pub mod user;
