//! Scoring, aggregation and traceability services.
//!
//! Everything here is a synchronous function over caller-supplied data.

pub mod compliance;
pub mod dashboard;
pub mod digest;
pub mod kri;
pub mod risk_matrix;
pub mod traceability;
