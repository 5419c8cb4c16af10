//! Turn handlers module
//!
//! This module turns webhook events into scene replies.

pub mod dispatcher;

pub use dispatcher::Dispatcher;
