//! Interactive menu engine.
//!
//! Organized along the same seams as the loop itself:
//! - `state`: screens, session and transition types (pure data)
//! - `update`: per-screen render-and-react handlers
//! - `io`: presenter and input traits with their terminal implementations
//! - `theme`: severity prefixes and colors
//! - `run`: the screen host, its loop, and the application wiring

pub mod io;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;

pub use run::{Application, ScreenHost};
pub use state::{Screen, SessionState, Transition, TransitionOutcome};
