//! Authentication utilities.

pub mod password;
