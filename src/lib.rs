//! Neon Snake - a snake arcade game with power-ups
//!
//! This library provides:
//! - The tick-driven game simulation (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session metrics and high-score persistence (metrics, storage modules)
//! - The interactive terminal mode that schedules ticks (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
