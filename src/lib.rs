//! comicshelf - a comic book inventory service
//!
//! A small HTTP service for managing a comic book inventory: create,
//! fetch, update, and delete records, plus a filtered, sorted, and
//! paginated inventory listing. Records live in a pluggable store with
//! in-memory and snapshot-file backends.

pub mod cli;
pub mod config;
pub mod http;
pub mod model;
pub mod query;
pub mod store;
pub mod validator;
