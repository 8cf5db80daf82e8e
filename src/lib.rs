//! Purchases server library.
//!
//! This crate provides the purchases service as a library, allowing the
//! router and repositories to be tested without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
