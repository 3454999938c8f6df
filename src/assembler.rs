// 🧩 Graph Assembler - stitch flat record sets back into the nested graph
//
// Re-assembles the shape the deep $expand query returns from the five flat
// collections, using id-indexed maps and constant-time lookup chains:
//
//   masterTask.acctCategory ← masterTask.acctCategoryId
//   job                     ← jobId
//   job.lot                 ← job.lotId
//   job.lot.financialCommunity ← lot.financialCommunityId
//   job.planCommunity       ← job.planId
//
// The join is best-effort: a foreign key with no matching record leaves the
// nested field None and bumps a gap counter. Lookups are exact key equality
// only. Nested records are shared - every task on the same job receives a
// clone of the same Arc, never a copy of the job.

use std::collections::HashMap;
use std::sync::Arc;

use crate::entities::{AccountCategory, FinancialCommunity, Job, Lot, PlanCommunity, ScheduleTask};
use crate::fetch::FlatDataset;

// ============================================================================
// ASSEMBLY STATS
// ============================================================================

/// Unresolved foreign keys observed during assembly.
///
/// A key that is absent on the record itself (e.g. a master task with no
/// acctCategoryId) is not a gap; only a present key with no matching target
/// record counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyStats {
    pub missing_jobs: usize,
    pub missing_lots: usize,
    pub missing_financial_communities: usize,
    pub missing_plan_communities: usize,
    pub missing_acct_categories: usize,
}

impl AssemblyStats {
    pub fn is_clean(&self) -> bool {
        self.total_gaps() == 0
    }

    pub fn total_gaps(&self) -> usize {
        self.missing_jobs
            + self.missing_lots
            + self.missing_financial_communities
            + self.missing_plan_communities
            + self.missing_acct_categories
    }

    pub fn summary(&self) -> String {
        format!(
            "{} unresolved references (jobs: {}, lots: {}, financial communities: {}, \
             plan communities: {}, account categories: {})",
            self.total_gaps(),
            self.missing_jobs,
            self.missing_lots,
            self.missing_financial_communities,
            self.missing_plan_communities,
            self.missing_acct_categories
        )
    }
}

// ============================================================================
// ASSEMBLY
// ============================================================================

/// Attach the full nested graph onto every schedule task.
///
/// Consumes the flat dataset and returns a new annotated collection; the
/// inputs are never mutated in place.
pub fn assemble(dataset: FlatDataset) -> (Vec<ScheduleTask>, AssemblyStats) {
    let mut stats = AssemblyStats::default();

    // Index supporting entities, innermost first, so that each later index
    // already holds fully annotated records.
    let financial_communities: HashMap<i64, Arc<FinancialCommunity>> = dataset
        .financial_communities
        .into_iter()
        .map(|fc| (fc.id, Arc::new(fc)))
        .collect();

    let lots: HashMap<i64, Arc<Lot>> = dataset
        .lots
        .into_iter()
        .map(|mut lot| {
            if let Some(fc_id) = lot.financial_community_id {
                lot.financial_community = financial_communities.get(&fc_id).cloned();
                if lot.financial_community.is_none() {
                    stats.missing_financial_communities += 1;
                }
            }
            (lot.id, Arc::new(lot))
        })
        .collect();

    let plan_communities: HashMap<i64, Arc<PlanCommunity>> = dataset
        .plan_communities
        .into_iter()
        .map(|pc| (pc.id, Arc::new(pc)))
        .collect();

    let jobs: HashMap<i64, Arc<Job>> = dataset
        .jobs
        .into_iter()
        .map(|mut job| {
            if let Some(lot_id) = job.lot_id {
                job.lot = lots.get(&lot_id).cloned();
                if job.lot.is_none() {
                    stats.missing_lots += 1;
                }
            }
            if let Some(plan_id) = job.plan_id {
                job.plan_community = plan_communities.get(&plan_id).cloned();
                if job.plan_community.is_none() {
                    stats.missing_plan_communities += 1;
                }
            }
            (job.id, Arc::new(job))
        })
        .collect();

    let account_categories: HashMap<i64, Arc<AccountCategory>> = dataset
        .account_categories
        .into_iter()
        .map(|ac| (ac.id, Arc::new(ac)))
        .collect();

    let tasks = dataset
        .schedule_tasks
        .into_iter()
        .map(|mut task| {
            if let Some(category_id) = task.master_task.acct_category_id {
                task.master_task.acct_category = account_categories.get(&category_id).cloned();
                if task.master_task.acct_category.is_none() {
                    stats.missing_acct_categories += 1;
                }
            }
            task.job = jobs.get(&task.job_id).cloned();
            if task.job.is_none() {
                stats.missing_jobs += 1;
            }
            task
        })
        .collect();

    (tasks, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MasterTask;

    fn create_lot(id: i64, financial_community_id: Option<i64>) -> Lot {
        Lot {
            id,
            financial_community_id,
            lot_block: None,
            street_address1: None,
            financial_community: None,
        }
    }

    fn create_job(id: i64, lot_id: Option<i64>, plan_id: Option<i64>) -> Job {
        Job {
            id,
            lot_id,
            plan_id,
            construction_stage_name: None,
            projected_final_date: None,
            permit_number: None,
            pending_construction_stages: Vec::new(),
            lot: None,
            plan_community: None,
        }
    }

    fn create_task(id: i64, job_id: i64, acct_category_id: Option<i64>) -> ScheduleTask {
        ScheduleTask {
            id,
            job_id,
            start_day: None,
            duration: None,
            float_days: None,
            locked: None,
            master_task_id: None,
            scheduled_start_date: None,
            scheduled_completion_date: None,
            entered_completion_date: None,
            master_task: MasterTask {
                id: id * 10,
                name: None,
                schedule_type_description: None,
                acct_category_id,
                acct_category: None,
            },
            job: None,
        }
    }

    fn create_dataset() -> FlatDataset {
        FlatDataset {
            lots: vec![create_lot(10, Some(900))],
            financial_communities: vec![FinancialCommunity {
                id: 900,
                name: Some("X".to_string()),
                number: None,
            }],
            jobs: vec![create_job(1, Some(10), Some(100))],
            plan_communities: vec![PlanCommunity {
                id: 100,
                plan_sales_name: Some("P".to_string()),
            }],
            schedule_tasks: vec![create_task(5000, 1, Some(7))],
            account_categories: vec![AccountCategory {
                id: 7,
                name: Some("Drywall".to_string()),
                number: None,
                scar_stage: None,
                schedule_vendor_acct_category_assocs: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_assembles_full_nested_graph() {
        let (tasks, stats) = assemble(create_dataset());

        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.id, 5000);

        let job = task.job.as_ref().unwrap();
        let lot = job.lot.as_ref().unwrap();
        assert_eq!(
            lot.financial_community.as_ref().unwrap().name.as_deref(),
            Some("X")
        );
        assert_eq!(
            job.plan_community.as_ref().unwrap().plan_sales_name.as_deref(),
            Some("P")
        );
        assert_eq!(
            task.master_task.acct_category.as_ref().unwrap().name.as_deref(),
            Some("Drywall")
        );

        assert!(stats.is_clean());
    }

    #[test]
    fn test_tasks_on_same_job_share_one_instance() {
        let mut dataset = create_dataset();
        dataset.schedule_tasks = vec![
            create_task(5000, 1, Some(7)),
            create_task(5001, 1, None),
        ];

        let (tasks, _) = assemble(dataset);

        let first = tasks[0].job.as_ref().unwrap();
        let second = tasks[1].job.as_ref().unwrap();
        // Same instance, not an equal copy
        assert!(Arc::ptr_eq(first, second));
    }

    #[test]
    fn test_jobs_on_same_lot_share_one_instance() {
        let mut dataset = create_dataset();
        dataset.jobs = vec![create_job(1, Some(10), Some(100)), create_job(2, Some(10), None)];
        dataset.schedule_tasks = vec![create_task(5000, 1, None), create_task(5001, 2, None)];

        let (tasks, _) = assemble(dataset);

        let lot_a = tasks[0].job.as_ref().unwrap().lot.as_ref().unwrap();
        let lot_b = tasks[1].job.as_ref().unwrap().lot.as_ref().unwrap();
        assert!(Arc::ptr_eq(lot_a, lot_b));
    }

    #[test]
    fn test_unmatched_job_id_leaves_job_unset() {
        let mut dataset = create_dataset();
        dataset.schedule_tasks = vec![create_task(5000, 99, Some(7))];

        let (tasks, stats) = assemble(dataset);

        assert!(tasks[0].job.is_none());
        assert_eq!(stats.missing_jobs, 1);
        // The rest of the chain still resolved
        assert!(tasks[0].master_task.acct_category.is_some());
    }

    #[test]
    fn test_absent_category_key_is_not_a_gap() {
        let mut dataset = create_dataset();
        dataset.schedule_tasks = vec![create_task(5000, 1, None)];
        dataset.account_categories = Vec::new();

        let (tasks, stats) = assemble(dataset);

        assert!(tasks[0].master_task.acct_category.is_none());
        assert_eq!(stats.missing_acct_categories, 0);
        assert!(stats.is_clean());
    }

    #[test]
    fn test_unmatched_keys_count_as_gaps_per_chain_link() {
        let dataset = FlatDataset {
            lots: vec![create_lot(10, Some(901))], // community missing
            financial_communities: Vec::new(),
            jobs: vec![create_job(1, Some(11), Some(101))], // lot and plan missing
            plan_communities: Vec::new(),
            schedule_tasks: vec![create_task(5000, 1, Some(8))], // category missing
            account_categories: Vec::new(),
        };

        let (tasks, stats) = assemble(dataset);

        let job = tasks[0].job.as_ref().unwrap();
        assert!(job.lot.is_none());
        assert!(job.plan_community.is_none());
        assert_eq!(
            stats,
            AssemblyStats {
                missing_jobs: 0,
                missing_lots: 1,
                missing_financial_communities: 1,
                missing_plan_communities: 1,
                missing_acct_categories: 1,
            }
        );
        assert_eq!(stats.total_gaps(), 4);
    }
}
