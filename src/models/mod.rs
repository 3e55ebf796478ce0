//! Domain entities consumed by the scoring services.

pub mod kri;
pub mod requirement;
pub mod risk;
pub mod snapshot;
