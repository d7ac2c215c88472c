//! Command Layer
//!
//! Sequences assert, query and retract commands against one database.

mod command;

pub use command::{
    apply, apply_all, apply_all_with, apply_with, ApplyError, Command, CommandError,
    LiteralTemplate,
};
