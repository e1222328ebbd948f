//! Data model for province-level tax accrual and collection figures.
//!
//! Every numeric cell in the model is an [`Amount`]: either a finite number
//! rounded to two decimals or an explicit missing marker. Raw strings never
//! reach the model.

pub mod amount;
pub mod province;
pub mod selection;
pub mod years;

pub use amount::{Amount, round2};
pub use province::{CategoryRow, ProvinceTable};
pub use selection::SelectionRow;
pub use years::{MIXED_YEARS_LABEL, year_label};
