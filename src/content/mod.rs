pub mod filter;
pub mod query;
pub mod record;

pub use query::ContentQuery;
pub use record::{ContentRecord, ContentStatus, ContentType};
