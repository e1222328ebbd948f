use serde::{Deserialize, Serialize};

use crate::Amount;

/// One province's values for a single selected category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRow {
    /// Province name in the tabular-source spelling (not yet reconciled).
    pub province: String,
    pub accrual: Amount,
    pub collection: Amount,
    pub reported_ratio: Amount,
}
