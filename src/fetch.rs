// 🚰 Fetchers - concurrent fan-out and the staged retrieval pipeline
//
// Two retrieval strategies live here:
//   - fetch_nested_schedule_tasks: one deep $expand query (original shape)
//   - fetch_flat_dataset: flat per-entity queries with predicates derived
//     from earlier stages, fanned out inside each stage
//
// All batches are all-or-nothing: the first failed request rejects the whole
// batch and any partial results are discarded. A failed stage prevents later
// stages from starting.

use anyhow::Result;
use futures::future::try_join_all;
use std::future::Future;

use crate::client::ApiClient;
use crate::config::QueryParams;
use crate::entities::{AccountCategory, FinancialCommunity, Job, Lot, PlanCommunity, ScheduleTask};
use crate::filter::SetFilter;
use crate::query::ResourceQuery;

// ============================================================================
// PROJECTIONS
// ============================================================================

const LOT_SELECT: &[&str] = &["id", "financialCommunityId", "lotBlock", "streetAddress1"];
const FINANCIAL_COMMUNITY_SELECT: &[&str] = &["id", "name", "number"];
const PLAN_COMMUNITY_SELECT: &[&str] = &["id", "planSalesName"];
const JOB_SELECT: &[&str] = &[
    "id",
    "lotId",
    "planId",
    "constructionStageName",
    "projectedFinalDate",
    "permitNumber",
];
const TASK_SELECT: &[&str] = &[
    "id",
    "jobId",
    "startDay",
    "duration",
    "floatDays",
    "locked",
    "masterTaskId",
    "scheduledStartDate",
    "scheduledCompletionDate",
    "enteredCompletionDate",
];
const ACCOUNT_CATEGORY_SELECT: &[&str] = &["id", "name", "number", "scarStage"];

const PENDING_STAGES_EXPAND: &str =
    "pendingConstructionStages($select=jobId,constructionStageName,constructionStageStartDate)";

// ============================================================================
// FAN-OUT
// ============================================================================

/// Issue N homogeneous requests concurrently and await their joint
/// completion. Results come back positionally; the first failure rejects the
/// whole batch and discards any partial successes.
pub async fn fan_out<T, F>(requests: Vec<F>) -> Result<Vec<Vec<T>>>
where
    F: Future<Output = Result<Vec<T>>>,
{
    try_join_all(requests).await
}

// ============================================================================
// FLAT RETRIEVAL OPERATIONS
// ============================================================================

pub async fn fetch_lots(client: &ApiClient, lot_ids: &[i64]) -> Result<Vec<Lot>> {
    let query = ResourceQuery::new("lots")
        .select(LOT_SELECT)
        .filter_in(&SetFilter::from_ids("id", lot_ids));
    client.fetch(&query).await
}

pub async fn fetch_jobs(client: &ApiClient, lot_ids: &[i64]) -> Result<Vec<Job>> {
    let query = ResourceQuery::new("jobs")
        .select(JOB_SELECT)
        .expand(PENDING_STAGES_EXPAND)
        .filter_in(&SetFilter::from_ids("lotId", lot_ids));
    client.fetch(&query).await
}

pub async fn fetch_financial_communities(
    client: &ApiClient,
    community_ids: &[i64],
) -> Result<Vec<FinancialCommunity>> {
    let query = ResourceQuery::new("financialCommunities")
        .select(FINANCIAL_COMMUNITY_SELECT)
        .filter_in(&SetFilter::from_ids("id", community_ids));
    client.fetch(&query).await
}

pub async fn fetch_plan_communities(
    client: &ApiClient,
    plan_filter: &SetFilter,
) -> Result<Vec<PlanCommunity>> {
    let query = ResourceQuery::new("planCommunities")
        .select(PLAN_COMMUNITY_SELECT)
        .filter_in(plan_filter);
    client.fetch(&query).await
}

pub async fn fetch_schedule_tasks(
    client: &ApiClient,
    task_filter: &SetFilter,
) -> Result<Vec<ScheduleTask>> {
    let query = ResourceQuery::new("scheduleTasks")
        .select(TASK_SELECT)
        .expand("masterTask($select=id,name,acctCategoryId,scheduleTypeDescription)")
        .filter_in(task_filter);
    client.fetch(&query).await
}

pub async fn fetch_account_categories(
    client: &ApiClient,
    tasks: &[ScheduleTask],
    task_filter: &SetFilter,
    vendor_id: i64,
) -> Result<Vec<AccountCategory>> {
    let query = account_category_query(tasks, task_filter, vendor_id);
    client.fetch(&query).await
}

/// The account-category query depends on already-fetched schedule tasks in
/// two ways: its own predicate is the distinct acctCategoryIds observed on
/// the tasks, and its vendor-association expansion re-applies the task
/// predicate at the `job/id` path together with the configured vendor.
fn account_category_query(
    tasks: &[ScheduleTask],
    task_filter: &SetFilter,
    vendor_id: i64,
) -> ResourceQuery {
    let category_filter = SetFilter::collect("id", tasks, |t| t.master_task.acct_category_id);
    let assoc_filter = task_filter.for_field("job/id");

    ResourceQuery::new("accountCategories")
        .select(ACCOUNT_CATEGORY_SELECT)
        .expand(format!(
            "scheduleVendorAcctCategoryAssocs($select=jobId,vendorId;$filter={} and vendorId eq {})",
            assoc_filter.render(),
            vendor_id
        ))
        .filter_in(&category_filter)
}

// ============================================================================
// DEPENDENT PIPELINE (strategy b)
// ============================================================================

/// The five flat collections the assembler stitches back together.
#[derive(Debug)]
pub struct FlatDataset {
    pub lots: Vec<Lot>,
    pub financial_communities: Vec<FinancialCommunity>,
    pub jobs: Vec<Job>,
    pub plan_communities: Vec<PlanCommunity>,
    pub schedule_tasks: Vec<ScheduleTask>,
    pub account_categories: Vec<AccountCategory>,
}

/// Derive the stage-2 predicates from stage-1 jobs: plan communities by the
/// distinct planIds observed, schedule tasks by jobId.
pub fn derive_job_filters(jobs: &[Job]) -> (SetFilter, SetFilter) {
    let plan_filter = SetFilter::collect("id", jobs, |j| j.plan_id);
    let task_filter = SetFilter::collect("jobId", jobs, |j| Some(j.id));
    (plan_filter, task_filter)
}

/// Run the flat retrieval pipeline.
///
/// Stage 1 fans out lots and jobs. Stage 2 derives its predicates from the
/// jobs and fans out financial communities (static filter), plan communities
/// and schedule tasks. Stage 3 derives its predicate from the schedule tasks
/// and fetches account categories.
pub async fn fetch_flat_dataset(client: &ApiClient, params: &QueryParams) -> Result<FlatDataset> {
    let (lots, jobs) = tokio::try_join!(
        fetch_lots(client, &params.lot_ids),
        fetch_jobs(client, &params.lot_ids),
    )?;

    let (plan_filter, task_filter) = derive_job_filters(&jobs);

    let (financial_communities, plan_communities, schedule_tasks) = tokio::try_join!(
        fetch_financial_communities(client, &params.financial_community_ids),
        fetch_plan_communities(client, &plan_filter),
        fetch_schedule_tasks(client, &task_filter),
    )?;

    let account_categories =
        fetch_account_categories(client, &schedule_tasks, &task_filter, params.vendor_id).await?;

    Ok(FlatDataset {
        lots,
        financial_communities,
        jobs,
        plan_communities,
        schedule_tasks,
        account_categories,
    })
}

// ============================================================================
// DEEP QUERY (strategy a)
// ============================================================================

/// Fetch the fully nested graph with a single server-side $expand query.
pub async fn fetch_nested_schedule_tasks(
    client: &ApiClient,
    params: &QueryParams,
) -> Result<Vec<ScheduleTask>> {
    let query = nested_task_query(params);
    client.fetch(&query).await
}

fn nested_task_query(params: &QueryParams) -> ResourceQuery {
    let lot_filter = SetFilter::from_ids("job/lot/id", &params.lot_ids);
    let community_filter = SetFilter::from_ids(
        "job/lot/financialCommunity/id",
        &params.financial_community_ids,
    );
    let vendor_filter = SetFilter::from_ids("vendor/id", &[params.vendor_id]);

    let master_task_expand = format!(
        "masterTask($select=id,name,scheduleTypeDescription;\
         $expand=acctCategory($select=id,name,number,scarStage;\
         $expand=scheduleVendorAcctCategoryAssocs($select=jobId,vendorId;\
         $filter={} and {})))",
        lot_filter.render(),
        vendor_filter.render()
    );
    let job_expand = format!(
        "job($select=id,planId,constructionStageName,projectedFinalDate,permitNumber;\
         $expand=lot($select=id,lotBlock,streetAddress1;\
         $expand=financialCommunity($select=id,name,number)),\
         {},\
         planCommunity($select=id,planSalesName))",
        PENDING_STAGES_EXPAND
    );

    ResourceQuery::new("scheduleTasks")
        .select(TASK_SELECT)
        .expand(format!("{},{}", master_task_expand, job_expand))
        .filter(format!(
            "enteredCompletionDate eq null and ({}) and ({})",
            community_filter.render(),
            lot_filter.render()
        ))
}
