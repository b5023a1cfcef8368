//! Data types for the job extraction pipeline.

pub mod config;
pub mod page;
pub mod query;
pub mod record;
pub mod run;
