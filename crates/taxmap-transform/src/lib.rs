//! Row selection, aggregation and the spatial join.
//!
//! [`select_category`] pulls one category out of every province table;
//! [`join_selection`] reconciles province names and left-joins the result
//! onto the map so every province shape is kept.

mod category;
mod join;
mod selection;

pub use category::{available_categories, category_title, normalize_category_key};
pub use join::{
    JoinedMap, JoinedRecord, NameConflict, Totals, UnresolvedName, collection_ratio,
    compute_totals, join_selection,
};
pub use selection::{Selection, select_category};
