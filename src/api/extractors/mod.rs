//! Custom request extractors.

mod query_params;
mod user_id;
mod validated_json;

pub use query_params::QueryParams;
pub use user_id::UserId;
pub use validated_json::ValidatedJson;
