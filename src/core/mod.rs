// src/core/mod.rs
pub mod boundary;
pub mod engine;
pub mod grammar;
pub mod resplit;
pub mod rules;
pub mod store;
pub mod trie;
pub mod types;
