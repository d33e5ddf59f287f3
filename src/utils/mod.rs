//! Shared utilities.

mod hash;

pub use hash::{hash_bytes, hash_file};
