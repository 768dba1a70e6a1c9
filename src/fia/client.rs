use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::FiaConfig;
use crate::error::YieldError;

/// Public EVALIDator REST root.
pub const DEFAULT_BASE_URL: &str = "https://apps.fs.usda.gov/Evalidator/rest/Evalidator/";

/// FIPS state code used when none is given (Texas).
pub const DEFAULT_STATE_CODE: u32 = 48;

const FIADB_SCHEMA: &str = "FS_FIADB";

/// Query parameters for the `evalgrp` endpoint.
pub fn eval_group_params(state_code: u32) -> Vec<(&'static str, String)> {
    vec![
        ("schemaName", FIADB_SCHEMA.to_string()),
        ("whereClause", format!("statecd={state_code}")),
        ("mostRecent", "Y".to_string()),
    ]
}

/// Query parameters for the `refTable` endpoint. Every argument must be
/// non-blank.
pub fn ref_table_params(
    table: &str,
    cols: &str,
    where_clause: &str,
) -> Result<Vec<(&'static str, String)>, YieldError> {
    for (name, value) in [("table", table), ("cols", cols), ("where", where_clause)] {
        if value.trim().is_empty() {
            return Err(YieldError::InvalidQuery(format!(
                "refTable request needs a value for '{name}'"
            )));
        }
    }
    Ok(vec![
        ("tableName", table.to_string()),
        ("colList", cols.to_string()),
        ("whereStr", where_clause.to_string()),
        ("outputFormat", "JSON".to_string()),
    ])
}

/// Blocking client for the FIA EVALIDator API.
///
/// Every request is a single GET. A response with any status other than
/// 200 is reported as `Ok(None)`.
#[derive(Debug, Clone)]
pub struct FiaClient {
    base_url: String,
    http: Client,
}

impl FiaClient {
    /// Client against the public endpoint with default settings.
    pub fn new() -> Result<Self, YieldError> {
        Self::from_config(&FiaConfig::default())
    }

    pub fn from_config(config: &FiaConfig) -> Result<Self, YieldError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.normalized_base_url(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the most recent evaluation groups for a state.
    pub fn eval_group_request(&self, state_code: u32) -> Result<Option<Value>, YieldError> {
        self.send_get_request("evalgrp", &eval_group_params(state_code))
    }

    /// Select columns from a FIADB reference table, e.g.
    /// `ref_table_request("COND", "COUNTYCD, PLOT", "COUNTYCD=347 AND INVYR=2018")`.
    pub fn ref_table_request(
        &self,
        table: &str,
        cols: &str,
        where_clause: &str,
    ) -> Result<Option<Value>, YieldError> {
        let params = ref_table_params(table, cols, where_clause)?;
        self.send_get_request("refTable", &params)
    }

    /// GET `<base_url><endpoint>` with the given query parameters.
    pub fn send_get_request(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Option<Value>, YieldError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, ?params, "sending FIA request");

        let mut request = self.http.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }
        let response = request.send()?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%url, %status, "FIA request returned non-200 status");
            return Ok(None);
        }

        let body = response.text()?;
        let value: Value = serde_json::from_str(&body)?;
        Ok(Some(value))
    }
}
