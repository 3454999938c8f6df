// 💰 AccountCategory Entity - Cost code a master task is billed against

use serde::{Deserialize, Serialize};

/// An account category record (keyed by `MasterTask.acctCategoryId`).
///
/// Projection: `id, name, number, scarStage`, plus the
/// `scheduleVendorAcctCategoryAssocs` expansion (vendor assignments for the
/// jobs in scope).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCategory {
    pub id: i64,
    pub name: Option<String>,
    pub number: Option<String>,
    pub scar_stage: Option<i64>,

    /// Server-side expansion, present in both strategies.
    #[serde(default)]
    pub schedule_vendor_acct_category_assocs: Vec<ScheduleVendorAcctCategoryAssoc>,
}

/// Vendor assignment for an account category on a specific job.
///
/// Projection: `jobId, vendorId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleVendorAcctCategoryAssoc {
    pub job_id: i64,
    pub vendor_id: i64,
}
