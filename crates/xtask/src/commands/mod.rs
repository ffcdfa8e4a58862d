//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod simulate;
mod validate_content;

pub use simulate::Simulate;
pub use validate_content::ValidateContent;
