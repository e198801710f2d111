pub mod query;
pub mod settings;
pub mod time;

pub use query::TimeQuery;
pub use time::{AuthoritativeTime, ZoneInfo};
