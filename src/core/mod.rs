//! Core of `td`: records, identifiers, the store and the command language.
//!
//! Everything here is in-memory and synchronous. File access is limited to
//! reading a todo file and an optional `td.toml`.

pub mod command;
pub mod config;
pub mod error;
pub mod ident;
pub mod output;
pub mod store;
pub mod todo;
