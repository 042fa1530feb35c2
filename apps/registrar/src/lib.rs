//! # registrar
//!
//! HTTP front end for the student registry: server-rendered forms to
//! create, list, edit and delete students.
//!
//! The binary (`src/main.rs`) adds the CLI on top of this library; the
//! integration tests drive the router from here directly.

pub mod api;
pub mod config;
