//! Interactive console front end.
//!
//! Each UI button of the browser demo is a shell command here; the displayed
//! message and pending input are printed instead of rendered.

pub mod command;
pub mod shell;

pub use command::{help_text, parse_line, Command};
pub use shell::{execute, init_failure_notice, run};
