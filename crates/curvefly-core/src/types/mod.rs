//! Domain types for yield curve analytics.

mod date;
mod table;
mod tenor;

pub use date::Date;
pub use table::{ChangeTable, TenorFrame, YieldTable};
pub use tenor::Tenor;
