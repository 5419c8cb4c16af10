//! Test helpers module
//!
//! This module provides utilities for driving the dialog engine in tests:
//! webhook event builders and a conversation context that carries the
//! session state from one reply into the next event.

#![allow(dead_code)]

pub mod test_context;
pub mod test_data;

pub use test_context::*;
pub use test_data::*;
