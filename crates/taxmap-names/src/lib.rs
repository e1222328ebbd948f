//! Province name reconciliation.
//!
//! Spreadsheet file names and the province map spell some provinces
//! differently (dotless `ı`, `ş`/`s`, abbreviations like `K.Maraş`). This
//! crate translates the spreadsheet spelling to the map spelling with a fixed,
//! exact-match table; names outside the table pass through unchanged.

mod corrections;

pub use corrections::{PROVINCE_NAME_CORRECTIONS, canonical_province_name, is_corrected};
