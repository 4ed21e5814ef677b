//! External collaborators

pub mod sample_service;

pub use sample_service::{BojClient, SampleProvider, parse_samples};
