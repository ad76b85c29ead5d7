//! digital-wallet: an interactive console wallet driven by a screen state machine.

pub mod directory;
pub mod error;
pub mod menu;
pub mod types;
