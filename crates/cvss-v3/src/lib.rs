pub mod batch;
pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
pub mod vector;
