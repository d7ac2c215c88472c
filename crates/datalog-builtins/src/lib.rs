pub mod builtins;

// Re-export builtins
pub use builtins::*;
