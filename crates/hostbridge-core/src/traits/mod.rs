//! Core traits at the seams of the bridge.

mod action;
mod transport;

pub use action::Action;
pub use transport::Transport;
