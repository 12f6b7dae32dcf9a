//! Flick Sim - a Galaxy-style phone shell simulated in the terminal
//!
//! - `shell`: navigation, split screen, island, side panel log, frames
//! - `ai`: Galaxy AI text service (Gemini or demo mode) and its worker
//! - `input`: terminal commands standing in for touches
//! - `backend`: the calloop event loop driving it all

pub mod ai;
pub mod backend;
pub mod config;
pub mod input;
pub mod shell;
pub mod state;
