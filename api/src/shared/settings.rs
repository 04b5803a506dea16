use ai_llm_service::error_handler::env_var;

use crate::shared::app_state::DEFAULT_HISTORY_LIMIT;
use crate::error_handler::AppError;

pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8080";

/// HTTP-layer settings: `API_ADDRESS` and `HISTORY_LIMIT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiSettings {
    pub address: String,
    pub history_limit: usize,
}

impl ApiSettings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&env_var)
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let history_limit = match lookup("HISTORY_LIMIT") {
            Some(raw) => raw.parse().map_err(|_| {
                AppError::Config(format!("HISTORY_LIMIT: expected a number, got {raw:?}"))
            })?,
            None => DEFAULT_HISTORY_LIMIT,
        };
        Ok(Self {
            address: lookup("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string()),
            history_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_overrides() {
        let s = ApiSettings::from_lookup(&|_| None).unwrap();
        assert_eq!(s.address, "127.0.0.1:8080");
        assert_eq!(s.history_limit, 5);

        let s = ApiSettings::from_lookup(&|k| match k {
            "API_ADDRESS" => Some("0.0.0.0:9000".into()),
            "HISTORY_LIMIT" => Some("10".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(s.address, "0.0.0.0:9000");
        assert_eq!(s.history_limit, 10);

        assert!(ApiSettings::from_lookup(&|k| (k == "HISTORY_LIMIT").then(|| "lots".into())).is_err());
    }
}
