//! Core trait abstractions for the job extraction library.
//!
//! These traits define the external capabilities the pipeline consumes.
//! Applications inject implementations; tests inject the mocks in
//! [`crate::testing`].

pub mod crawler;
pub mod generator;
pub mod searcher;
pub mod sink;
