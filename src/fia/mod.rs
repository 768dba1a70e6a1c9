//! Thin client for the USDA Forest Inventory and Analysis (FIA)
//! EVALIDator REST API. Responses are returned as raw JSON.

mod client;
mod response;

pub use client::{
    eval_group_params, ref_table_params, FiaClient, DEFAULT_BASE_URL, DEFAULT_STATE_CODE,
};
pub use response::{format_api_response, print_api_response, response_records};
