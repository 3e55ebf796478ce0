//! Content digest of a tenant snapshot.
//!
//! Reports cite the digest so a published figure can be tied back to the
//! exact inputs it was computed from. Field order is fixed by the model
//! structs, so equal snapshots always serialize to the same bytes.

use sha2::{Digest, Sha256};

use crate::errors::AppError;
use crate::models::snapshot::TenantSnapshot;

/// SHA-256 over the snapshot's JSON encoding, hex-encoded.
pub fn snapshot_digest(snapshot: &TenantSnapshot) -> Result<String, AppError> {
    let bytes = serde_json::to_vec(snapshot)
        .map_err(|e| AppError::Internal(format!("Snapshot serialization failed: {e}")))?;
    Ok(hash(&bytes))
}

fn hash(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::kri::{Kri, KriThresholds};
    use uuid::Uuid;

    fn snapshot_with_reading(reading: f64) -> TenantSnapshot {
        TenantSnapshot {
            risks: vec![],
            requirements: vec![],
            kris: vec![Kri {
                id: Uuid::nil(),
                code: "NPL".to_string(),
                name: "Non-performing loans".to_string(),
                reading,
                thresholds: KriThresholds {
                    green: 5.0,
                    yellow: 7.0,
                    red: 10.0,
                },
                reverse: false,
                unit: None,
                measured_at: None,
            }],
        }
    }

    #[test]
    fn same_snapshot_same_digest() {
        let a = snapshot_digest(&snapshot_with_reading(4.0)).unwrap();
        let b = snapshot_digest(&snapshot_with_reading(4.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn changed_reading_changes_digest() {
        let a = snapshot_digest(&snapshot_with_reading(4.0)).unwrap();
        let b = snapshot_digest(&snapshot_with_reading(4.5)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn digest_is_hex_sha256() {
        let d = snapshot_digest(&TenantSnapshot::default()).unwrap();
        assert_eq!(d.len(), 64);
        assert!(d.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
