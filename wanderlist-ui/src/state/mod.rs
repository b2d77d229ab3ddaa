//! State Management
//!
//! Global application state shared by the pages.

pub mod global;

pub use global::{provide_global_state, GlobalState, Place};
