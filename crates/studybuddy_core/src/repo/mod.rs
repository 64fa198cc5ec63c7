//! Persistence layer: key-value storage and the document store on top of it.
//!
//! # Responsibility
//! - Define the key-value storage contract standing in for host local storage.
//! - Own the single study document and every read/write against it.
//!
//! # Invariants
//! - Each mutation rewrites the whole document; there are no partial writes.
//! - Missing-id updates and deletes are silent no-ops, not errors.

pub mod document_store;
pub mod id_gen;
pub mod kv_repo;
