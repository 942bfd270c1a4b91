//! Types that represent the core data model, such as `RawSheet` and `DayRecord`.
mod column;
mod day;
mod month;
mod sheet;

pub use column::Column;
pub use day::DayRecord;
pub use month::Month;
pub use sheet::{Cell, RawSheet};
