//! Advertiser reporting bodies (`/advertisers/reporting/*`).
//!
//! Report rows are Provider-owned and wide; they stay as JSON values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::WireBody;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportFilter {
    pub resource_type: String,
    pub filter_id_value: String,
}

impl ReportFilter {
    pub fn new(resource_type: impl Into<String>, filter_id_value: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            filter_id_value: filter_id_value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricFilter {
    pub metric_type: String,
    pub operator: String,
    pub metric_value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityReportQuery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<ReportFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metric_filters: Vec<MetricFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<ReportFilter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportColumn {
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityReportRequest {
    /// `YYYY-MM-DD`.
    pub from: String,
    pub to: String,
    pub timezone_id: i32,
    pub currency_id: String,
    pub query: EntityReportQuery,
    pub columns: Vec<ReportColumn>,
}

impl EntityReportRequest {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        timezone_id: i32,
        currency_id: impl Into<String>,
        columns: &[&str],
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            timezone_id,
            currency_id: currency_id.into(),
            query: EntityReportQuery::default(),
            columns: columns
                .iter()
                .map(|c| ReportColumn {
                    column: (*c).to_string(),
                })
                .collect(),
        }
    }
}

impl WireBody for EntityReportRequest {
    const REQUIRED: &'static [&'static str] =
        &["from", "to", "timezone_id", "currency_id", "query", "columns"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityReportResponse {
    pub table: Vec<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<Vec<Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incomplete_results: Option<bool>,
}

impl WireBody for EntityReportResponse {
    const REQUIRED: &'static [&'static str] = &["table"];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionQuery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<ReportFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionReportRequest {
    pub show_conversions: bool,
    pub show_events: bool,
    pub show_only_vt: bool,
    pub show_only_ct: bool,
    pub from: String,
    pub to: String,
    pub timezone_id: i32,
    pub currency_id: String,
    pub query: ConversionQuery,
}

impl ConversionReportRequest {
    /// Conversions only, click-through and view-through alike.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        timezone_id: i32,
        currency_id: impl Into<String>,
    ) -> Self {
        Self {
            show_conversions: true,
            show_events: false,
            show_only_vt: false,
            show_only_ct: false,
            from: from.into(),
            to: to.into(),
            timezone_id,
            currency_id: currency_id.into(),
            query: ConversionQuery::default(),
        }
    }
}

impl WireBody for ConversionReportRequest {
    const REQUIRED: &'static [&'static str] = &[
        "show_conversions",
        "show_events",
        "show_only_vt",
        "show_only_ct",
        "from",
        "to",
        "timezone_id",
        "currency_id",
        "query",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Paging {
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionReportResponse {
    pub conversions: Vec<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl WireBody for ConversionReportResponse {
    const REQUIRED: &'static [&'static str] = &["conversions"];
}
