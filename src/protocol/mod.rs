//! Teeworlds-family wire primitives, messages and related enums.
//!
//! This module houses constants, message definitions and encoding helpers
//! used by the chunk and packet framing in `transport`.

pub mod constants;
pub mod enums;
pub mod message;
pub mod types;
