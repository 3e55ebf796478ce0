//! Route definitions for the scoring API.

pub mod compliance;
pub mod dashboard;
pub mod health;
pub mod kris;
pub mod risks;
pub mod traceability;
