// Fri Oct 16 2026 - Alex

pub mod cli;
pub mod display;
pub mod repl;

pub use display::StatusRenderer;
pub use repl::{Flow, Repl, ReplCommand};
