//! Backend implementations for the simulator
//!
//! - `terminal`: stdin commands, text frames on stdout

pub mod terminal;
