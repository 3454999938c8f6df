// 🔨 Job Entity - A house under construction on a lot

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::community::PlanCommunity;
use super::lot::Lot;

/// A construction job record.
///
/// Projection: `id, lotId, planId, constructionStageName,
/// projectedFinalDate, permitNumber`, plus the
/// `pendingConstructionStages` expansion.
///
/// `lotId` is only present on flat fetches (the deep query projects it away
/// and embeds `lot` instead). Dates travel as opaque strings: nothing in the
/// stitching logic interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,

    /// Foreign key into Lot.
    #[serde(default)]
    pub lot_id: Option<i64>,

    /// Foreign key into PlanCommunity.
    #[serde(default)]
    pub plan_id: Option<i64>,

    pub construction_stage_name: Option<String>,
    pub projected_final_date: Option<String>,
    pub permit_number: Option<String>,

    /// Server-side expansion, present in both strategies.
    #[serde(default)]
    pub pending_construction_stages: Vec<PendingConstructionStage>,

    /// Nested reference, populated by `$expand` or by assembly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot: Option<Arc<Lot>>,

    /// Nested reference, populated by `$expand` or by assembly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_community: Option<Arc<PlanCommunity>>,
}

/// Construction stage not yet reached by a job.
///
/// Projection: `jobId, constructionStageName, constructionStageStartDate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingConstructionStage {
    pub job_id: i64,
    pub construction_stage_name: Option<String>,
    pub construction_stage_start_date: Option<String>,
}
