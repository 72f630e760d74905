//! Unit tests for the gridscout CLI.

mod commands;
mod helpers;
mod logging;
