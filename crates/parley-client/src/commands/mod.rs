//! Command handlers behind the `parley` binary.
//!
//! Each sub-module groups related commands by domain.  Every command takes
//! the [`Client`](crate::app::Client) and returns a serializable report
//! that the binary prints as JSON.

pub mod navigation;
pub mod subscriptions;
