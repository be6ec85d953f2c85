//! A terminal task list: add short text tasks, toggle their completed flag,
//! and delete them (with confirmation). The list is in-memory only and lives
//! for the process lifetime.

pub mod config;
pub mod store;
pub mod tui;
