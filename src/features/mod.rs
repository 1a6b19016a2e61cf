//! Observation queries and per-ship feature encoding.

pub mod config;
pub mod extractor;
pub mod queries;

pub use config::FeatureConfig;
pub use extractor::{BaseCoords, FeatureExtractor, FEATURE_DIM};
