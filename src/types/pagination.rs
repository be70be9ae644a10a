//! Offset pagination for list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::{DEFAULT_LIST_LIMIT, DEFAULT_LIST_SKIP};

/// `skip`/`limit` query parameters.
///
/// Both are `u64`, so negative or non-numeric values are rejected while the
/// query string is parsed; there are no further rules to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Number of users to skip
    #[serde(default = "default_skip")]
    #[param(default = 0)]
    pub skip: u64,
    /// Maximum number of users to return (capped at 100)
    #[serde(default = "default_limit")]
    #[param(default = 10)]
    pub limit: u64,
}

fn default_skip() -> u64 {
    DEFAULT_LIST_SKIP
}

fn default_limit() -> u64 {
    DEFAULT_LIST_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_params_use_defaults() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.skip, DEFAULT_LIST_SKIP);
        assert_eq!(params.limit, DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn test_negative_values_fail_to_parse() {
        assert!(serde_json::from_str::<ListParams>(r#"{"skip":-1}"#).is_err());
        assert!(serde_json::from_str::<ListParams>(r#"{"limit":-5}"#).is_err());
    }
}
