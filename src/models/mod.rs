//! Domain models
//!
//! Plain data shared between the sample provider, the judge and the CLI.

pub mod sample;

pub use sample::SampleCase;
