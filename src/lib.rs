//! A personal portfolio presented as an interactive terminal.
//!
//! The library holds everything the egui shell does not: the command
//! registry, session state and persistence, the dispatcher, autocompletion,
//! themes, and the quote service. The `portfolio-terminal` binary is the
//! desktop app; `quote-server` serves the quote endpoint.

pub mod ascii;
pub mod autocomplete;
pub mod commands;
pub mod quote;
pub mod registry;
pub mod server;
pub mod session;
pub mod theme;
pub mod transcript;
