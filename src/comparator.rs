// ⏱️ Comparator - time both retrieval strategies and compare their output
//
// Strategies run strictly sequentially so neither measurement is skewed by
// shared I/O contention. Each timing window wraps the strategy as a whole:
// for the stitched strategy that includes client-side assembly. The
// equivalence check runs after both windows close, so the measured scope
// matches the original benchmark exactly.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::assembler::{assemble, AssemblyStats};
use crate::client::ApiClient;
use crate::config::QueryParams;
use crate::entities::ScheduleTask;
use crate::fetch::{fetch_flat_dataset, fetch_nested_schedule_tasks};

// ============================================================================
// REPORT TYPES
// ============================================================================

/// Wall-clock outcome of one strategy.
#[derive(Debug, Clone)]
pub struct StrategyTiming {
    pub elapsed: Duration,
    pub task_count: usize,
}

/// Structural comparison of the two result sets at the id level.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceReport {
    /// Task ids the deep query returned but the stitched strategy did not.
    pub missing_task_ids: Vec<i64>,
    /// Task ids the stitched strategy returned but the deep query did not.
    pub extra_task_ids: Vec<i64>,
    /// Tasks present in both whose resolved link chain differs.
    pub mismatched_task_ids: Vec<i64>,
}

impl EquivalenceReport {
    pub fn is_equivalent(&self) -> bool {
        self.missing_task_ids.is_empty()
            && self.extra_task_ids.is_empty()
            && self.mismatched_task_ids.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_equivalent() {
            "both strategies produced structurally equivalent task sets".to_string()
        } else {
            format!(
                "result sets differ: {} missing, {} extra, {} mismatched link chains",
                self.missing_task_ids.len(),
                self.extra_task_ids.len(),
                self.mismatched_task_ids.len()
            )
        }
    }
}

/// Full outcome of one comparison run.
#[derive(Debug)]
pub struct ComparisonReport {
    pub original: StrategyTiming,
    pub stitched: StrategyTiming,
    pub assembly: AssemblyStats,
    pub equivalence: EquivalenceReport,
    /// The stitched result set, kept for optional dumping.
    pub stitched_tasks: Vec<ScheduleTask>,
    pub compared_at: DateTime<Utc>,
}

// ============================================================================
// EQUIVALENCE CHECK
// ============================================================================

/// The id chain a task resolves through, strategy-independent.
#[derive(Debug, PartialEq)]
struct LinkSignature {
    job_id: Option<i64>,
    lot_id: Option<i64>,
    financial_community_id: Option<i64>,
    plan_community_id: Option<i64>,
    acct_category_id: Option<i64>,
}

fn link_signature(task: &ScheduleTask) -> LinkSignature {
    let job = task.job.as_deref();
    let lot = job.and_then(|j| j.lot.as_deref());
    LinkSignature {
        job_id: job.map(|j| j.id),
        lot_id: lot.map(|l| l.id),
        financial_community_id: lot
            .and_then(|l| l.financial_community.as_deref())
            .map(|fc| fc.id),
        plan_community_id: job.and_then(|j| j.plan_community.as_deref()).map(|pc| pc.id),
        acct_category_id: task.master_task.acct_category.as_deref().map(|ac| ac.id),
    }
}

/// Compare the two result sets: same task ids, and per shared task the same
/// resolved jobId/lotId/financialCommunityId/planId/acctCategoryId chain.
pub fn check_equivalence(
    original: &[ScheduleTask],
    stitched: &[ScheduleTask],
) -> EquivalenceReport {
    let original_by_id: HashMap<i64, &ScheduleTask> =
        original.iter().map(|t| (t.id, t)).collect();
    let stitched_by_id: HashMap<i64, &ScheduleTask> =
        stitched.iter().map(|t| (t.id, t)).collect();

    let mut report = EquivalenceReport::default();

    for task in original {
        match stitched_by_id.get(&task.id) {
            None => report.missing_task_ids.push(task.id),
            Some(other) => {
                if link_signature(task) != link_signature(other) {
                    report.mismatched_task_ids.push(task.id);
                }
            }
        }
    }
    for task in stitched {
        if !original_by_id.contains_key(&task.id) {
            report.extra_task_ids.push(task.id);
        }
    }

    report.missing_task_ids.sort_unstable();
    report.extra_task_ids.sort_unstable();
    report.mismatched_task_ids.sort_unstable();
    report
}

// ============================================================================
// COMPARISON RUN
// ============================================================================

/// Run both strategies back to back and report their timings.
pub async fn run_comparison(client: &ApiClient, params: &QueryParams) -> Result<ComparisonReport> {
    // Strategy (a): one deep $expand query
    let started = Instant::now();
    let original_tasks = fetch_nested_schedule_tasks(client, params).await?;
    let original = StrategyTiming {
        elapsed: started.elapsed(),
        task_count: original_tasks.len(),
    };
    println!(
        "✓ Deep query: {} tasks in {} ms",
        original.task_count,
        original.elapsed.as_millis()
    );

    // Strategy (b): flat queries + client-side stitching, timed as a whole
    let started = Instant::now();
    let dataset = fetch_flat_dataset(client, params).await?;
    let (stitched_tasks, assembly) = assemble(dataset);
    let stitched = StrategyTiming {
        elapsed: started.elapsed(),
        task_count: stitched_tasks.len(),
    };
    println!(
        "✓ Stitched queries: {} tasks in {} ms",
        stitched.task_count,
        stitched.elapsed.as_millis()
    );

    // Outside both timing windows
    let equivalence = check_equivalence(&original_tasks, &stitched_tasks);

    Ok(ComparisonReport {
        original,
        stitched,
        assembly,
        equivalence,
        stitched_tasks,
        compared_at: Utc::now(),
    })
}
