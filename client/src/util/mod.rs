//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (DOM events, the embedded page
//! payload) from component logic so the logic stays testable natively.

pub mod bootstrap;
pub mod map_input;
