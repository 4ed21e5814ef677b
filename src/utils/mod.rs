//! Utility functions

pub mod crypto;
pub mod html;

pub use crypto::hash_file;
pub use html::unescape;
