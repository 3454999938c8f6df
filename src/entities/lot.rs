// 🏠 Lot Entity - A buildable lot inside a financial community

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::community::FinancialCommunity;

/// A lot record.
///
/// Projection: `id, financialCommunityId, lotBlock, streetAddress1`.
///
/// `financialCommunityId` is only present on flat fetches (the deep query
/// projects it away and embeds `financialCommunity` instead), so it is
/// optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    pub id: i64,

    /// Foreign key into FinancialCommunity.
    #[serde(default)]
    pub financial_community_id: Option<i64>,

    pub lot_block: Option<String>,
    pub street_address1: Option<String>,

    /// Nested reference, populated by `$expand` or by assembly.
    /// Shared: multiple lots may point at the same community record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_community: Option<Arc<FinancialCommunity>>,
}
