//! Analysis and result aggregation modules
//!
//! Combines all feature extraction results into final analysis:
//! - Result types
//! - Serializable report for outer surfaces

pub mod report;
pub mod result;
