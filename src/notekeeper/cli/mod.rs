//! Terminal front end. Everything that prints or decides exit codes lives here.

pub mod commands;
mod print;
pub mod setup;
