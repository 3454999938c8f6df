// 📋 ScheduleTask Entity - One task on a job's construction schedule
//
// This is the root of the nested graph both retrieval strategies produce:
//   scheduleTask.job.lot.financialCommunity
//   scheduleTask.job.planCommunity
//   scheduleTask.masterTask.acctCategory

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::account_category::AccountCategory;
use super::job::Job;

/// A schedule task record.
///
/// Projection: `id, jobId, startDay, duration, floatDays, locked,
/// masterTaskId, scheduledStartDate, scheduledCompletionDate,
/// enteredCompletionDate`, plus the `masterTask` expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTask {
    pub id: i64,

    /// Foreign key into Job.
    pub job_id: i64,

    pub start_day: Option<i64>,
    pub duration: Option<i64>,
    pub float_days: Option<i64>,
    pub locked: Option<bool>,
    pub master_task_id: Option<i64>,
    pub scheduled_start_date: Option<String>,
    pub scheduled_completion_date: Option<String>,
    pub entered_completion_date: Option<String>,

    /// Always expanded server-side; carries the account-category link.
    pub master_task: MasterTask,

    /// Nested reference, populated by `$expand` or by assembly.
    /// Shared: every task on the same job points at the same record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<Arc<Job>>,
}

/// Master-schedule template the task was instantiated from.
///
/// Projection: `id, name, acctCategoryId, scheduleTypeDescription`.
///
/// `acctCategoryId` is nullable upstream (not every master task bills
/// against a category) and is projected away by the deep query, so it is
/// optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterTask {
    pub id: i64,
    pub name: Option<String>,
    pub schedule_type_description: Option<String>,

    /// Foreign key into AccountCategory.
    #[serde(default)]
    pub acct_category_id: Option<i64>,

    /// Nested reference, populated by `$expand` or by assembly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acct_category: Option<Arc<AccountCategory>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_task_deserializes_without_nested_fields() {
        let json = r#"{
            "id": 5000,
            "jobId": 1,
            "startDay": 12,
            "duration": 3,
            "floatDays": null,
            "locked": false,
            "masterTaskId": 44,
            "scheduledStartDate": "2025-03-01T00:00:00Z",
            "scheduledCompletionDate": null,
            "enteredCompletionDate": null,
            "masterTask": {
                "id": 44,
                "name": "Hang Drywall",
                "acctCategoryId": 7,
                "scheduleTypeDescription": "Production"
            }
        }"#;

        let task: ScheduleTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 5000);
        assert_eq!(task.job_id, 1);
        assert_eq!(task.master_task.acct_category_id, Some(7));
        assert!(task.job.is_none());
        assert!(task.master_task.acct_category.is_none());
    }

    #[test]
    fn test_deep_query_response_deserializes_fully_nested() {
        // Shape the server returns for the single $expand query: job, lot,
        // financialCommunity, planCommunity and acctCategory all embedded.
        let json = r#"{
            "id": 5000,
            "jobId": 1,
            "startDay": 1,
            "duration": 2,
            "floatDays": 0,
            "locked": false,
            "masterTaskId": 44,
            "scheduledStartDate": null,
            "scheduledCompletionDate": null,
            "enteredCompletionDate": null,
            "masterTask": {
                "id": 44,
                "name": "Hang Drywall",
                "scheduleTypeDescription": "Production",
                "acctCategory": {
                    "id": 7,
                    "name": "Drywall",
                    "number": "4200",
                    "scarStage": 5,
                    "scheduleVendorAcctCategoryAssocs": [
                        { "jobId": 1, "vendorId": 2964 }
                    ]
                }
            },
            "job": {
                "id": 1,
                "planId": 100,
                "constructionStageName": "Frame",
                "projectedFinalDate": null,
                "permitNumber": "P-889",
                "pendingConstructionStages": [
                    {
                        "jobId": 1,
                        "constructionStageName": "Drywall",
                        "constructionStageStartDate": null
                    }
                ],
                "lot": {
                    "id": 10,
                    "lotBlock": "0031",
                    "streetAddress1": "12 Elm St",
                    "financialCommunity": {
                        "id": 900,
                        "name": "X",
                        "number": "6772"
                    }
                },
                "planCommunity": {
                    "id": 100,
                    "planSalesName": "P"
                }
            }
        }"#;

        let task: ScheduleTask = serde_json::from_str(json).unwrap();

        let job = task.job.as_ref().unwrap();
        let lot = job.lot.as_ref().unwrap();
        let fc = lot.financial_community.as_ref().unwrap();
        let pc = job.plan_community.as_ref().unwrap();
        let ac = task.master_task.acct_category.as_ref().unwrap();

        assert_eq!(fc.name.as_deref(), Some("X"));
        assert_eq!(pc.plan_sales_name.as_deref(), Some("P"));
        assert_eq!(ac.name.as_deref(), Some("Drywall"));
        assert_eq!(job.pending_construction_stages.len(), 1);
        assert_eq!(ac.schedule_vendor_acct_category_assocs[0].vendor_id, 2964);
        // Flat foreign keys were projected away by the deep query
        assert_eq!(job.lot_id, None);
        assert_eq!(task.master_task.acct_category_id, None);
    }
}
