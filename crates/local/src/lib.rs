//! flatdb Local - flat-file storage backend
//!
//! This crate implements the SchemaStore and RecordStore traits on top of
//! a pair of JSON files per database inside one storage root directory.

mod client;
mod db;

// Re-export the client (implements SchemaStore + RecordStore)
pub use client::LocalStore;
// Re-export the file layout for front ends that display paths
pub use db::DatabaseFiles;
