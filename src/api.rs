//! Interactive surface
//!
//! - `commands`: line parser, command execution and rendering
//! - `repl`: the rustyline loop driving a controller

pub mod commands;
pub mod repl;
