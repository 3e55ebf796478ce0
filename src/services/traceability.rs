//! Requirement <-> risk <-> control <-> evidence traceability.
//!
//! Links are many-to-many: a risk is tied to a requirement either by its own
//! reference or through any of its controls, and one risk may be reached
//! from several requirement codes. Results keep the order of the entity
//! list they were drawn from.
//!
//! This module contains no storage access; the caller supplies the
//! snapshot.

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::models::requirement::Requirement;
use crate::models::risk::{Control, Risk};
use crate::models::snapshot::TenantSnapshot;

/// Everything linked to one requirement code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementTrace {
    pub requirement_code: String,
    pub requirements: Vec<Requirement>,
    pub risks: Vec<Risk>,
    pub controls: Vec<Control>,
    pub evidence: Vec<String>,
}

/// Everything linked to one risk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskTrace {
    pub risk_id: Uuid,
    pub requirement_codes: Vec<String>,
    pub requirements: Vec<Requirement>,
    pub controls: Vec<Control>,
    pub evidence: Vec<String>,
}

/// Risks citing `code` directly or through at least one of their controls.
pub fn risks_for_requirement<'a>(risks: &'a [Risk], code: &str) -> Vec<&'a Risk> {
    risks
        .iter()
        .filter(|risk| {
            risk.requirement_code() == Some(code)
                || risk.controls.iter().any(|c| c.requirement_code() == Some(code))
        })
        .collect()
}

/// Controls, across all risks, citing `code`.
pub fn controls_for_requirement<'a>(risks: &'a [Risk], code: &str) -> Vec<&'a Control> {
    risks
        .iter()
        .flat_map(|risk| risk.controls.iter())
        .filter(|c| c.requirement_code() == Some(code))
        .collect()
}

/// Distinct requirement codes a risk reaches: its own first, then its controls'.
pub fn requirement_codes_for_risk(risk: &Risk) -> Vec<String> {
    let mut codes = Vec::new();
    let mut seen = HashSet::new();
    let own = risk.requirement_code().into_iter();
    let via_controls = risk.controls.iter().filter_map(Control::requirement_code);
    for code in own.chain(via_controls) {
        if seen.insert(code) {
            codes.push(code.to_string());
        }
    }
    codes
}

/// Build the full trace for a requirement code.
pub fn trace_requirement(snapshot: &TenantSnapshot, code: &str) -> RequirementTrace {
    let requirements: Vec<Requirement> = snapshot
        .requirements
        .iter()
        .filter(|r| r.code == code)
        .cloned()
        .collect();
    let evidence = collect_evidence(&requirements);

    RequirementTrace {
        requirement_code: code.to_string(),
        risks: risks_for_requirement(&snapshot.risks, code)
            .into_iter()
            .cloned()
            .collect(),
        controls: controls_for_requirement(&snapshot.risks, code)
            .into_iter()
            .cloned()
            .collect(),
        requirements,
        evidence,
    }
}

/// Build the trace for one risk against the snapshot's requirements.
pub fn trace_risk(risk: &Risk, requirements: &[Requirement]) -> RiskTrace {
    let requirement_codes = requirement_codes_for_risk(risk);
    let linked: Vec<Requirement> = requirements
        .iter()
        .filter(|r| requirement_codes.contains(&r.code))
        .cloned()
        .collect();
    let evidence = collect_evidence(&linked);

    RiskTrace {
        risk_id: risk.id,
        requirement_codes,
        requirements: linked,
        controls: risk.controls.clone(),
        evidence,
    }
}

/// Trace a risk by id, or `None` if the snapshot does not hold it.
pub fn trace_risk_by_id(snapshot: &TenantSnapshot, risk_id: Uuid) -> Option<RiskTrace> {
    snapshot
        .risks
        .iter()
        .find(|r| r.id == risk_id)
        .map(|risk| trace_risk(risk, &snapshot.requirements))
}

/// Evidence citations across requirements, de-duplicated in first-seen order.
fn collect_evidence(requirements: &[Requirement]) -> Vec<String> {
    let mut seen = HashSet::new();
    requirements
        .iter()
        .flat_map(|r| r.evidence.iter().map(String::as_str))
        .filter(|e| seen.insert(*e))
        .map(str::to_string)
        .collect()
}
