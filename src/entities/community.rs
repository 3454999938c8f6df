// 🏘️ Community Entities - FinancialCommunity and PlanCommunity
//
// Both are leaf entities: they carry no foreign keys and sit at the end of
// the lookup chains (scheduleTask.job.lot.financialCommunity and
// scheduleTask.job.planCommunity).

use serde::{Deserialize, Serialize};

// ============================================================================
// FINANCIAL COMMUNITY
// ============================================================================

/// Financial community a lot belongs to.
///
/// Projection: `id, name, number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialCommunity {
    pub id: i64,
    pub name: Option<String>,
    pub number: Option<String>,
}

// ============================================================================
// PLAN COMMUNITY
// ============================================================================

/// Plan community a job was built against (keyed by `Job.planId`).
///
/// Projection: `id, planSalesName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCommunity {
    pub id: i64,
    pub plan_sales_name: Option<String>,
}
