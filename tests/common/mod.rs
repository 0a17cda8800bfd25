//! Common test infrastructure
//!
//! Store fixtures for both backends, a scripted terminal that replays
//! canned input and records everything printed, and a canned OMDb lookup.

#![allow(dead_code)]

mod lookup;
mod stores;
mod terminal;

#[allow(unused_imports)]
pub use lookup::ScriptedLookup;
#[allow(unused_imports)]
pub use stores::{for_each_backend, json_store, sqlite_store, TestStore};
#[allow(unused_imports)]
pub use terminal::ScriptedTerminal;
