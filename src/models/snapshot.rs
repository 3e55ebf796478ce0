//! Point-in-time view of a tenant's scoring inputs.

use serde::{Deserialize, Serialize};

use crate::models::kri::Kri;
use crate::models::requirement::Requirement;
use crate::models::risk::Risk;

/// Everything the scoring core reads for one tenant, as loaded by the entity store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TenantSnapshot {
    #[serde(default)]
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub kris: Vec<Kri>,
}
