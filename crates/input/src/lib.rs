//! Camera input: physical keys mapped to renderer-agnostic actions.
//!
//! # Invariants
//! - The camera consumes actions, never raw window events.
//! - Held keys repeat their action every frame; `P` fires once per press.

pub mod action;

pub use action::{Action, ActionState, Axis, Direction, Key};
