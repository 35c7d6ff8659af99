/// Wire types for the recommendation backend.
///
/// These mirror the JSON shapes of `/api/filters`, `/api/recommendations` and
/// `/api/chat`. Everything is transient page state; nothing here is persisted.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// GET /api/filters
// ---------------------------------------------------------------------------

/// Filter options offered on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub levels: Vec<String>,
    pub types: Vec<String>,
}

// ---------------------------------------------------------------------------
// POST /api/recommendations
// ---------------------------------------------------------------------------

/// Request body for the combined recommendations/analytics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    pub levels_filter: Vec<String>,
    pub types_filter: Vec<String>,
    /// Always empty for pure analytics refreshes.
    pub query: String,
}

/// Response of `/api/recommendations`.
///
/// Each section is kept as raw JSON so a malformed section cannot take the
/// others down with it; the view decodes them one by one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsResponse {
    pub kpis: Value,
    pub charts: Value,
    pub data_preview: Value,
}

/// Scalar indicators shown in the KPI panel.
///
/// The float indicators are `None` when the backend sends `null` (e.g. the
/// mean popularity of an empty selection).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiSummary {
    pub total_items: u64,
    pub total_duration_hours: Option<f64>,
    pub avg_popularity: Option<f64>,
    pub certified_percentage: Option<f64>,
}

/// One plot specification, passed verbatim to the charting library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    pub data: Value,
    #[serde(default)]
    pub layout: Value,
}

impl PlotSpec {
    /// Decode a double-encoded chart entry: the JSON value must be a string
    /// whose contents are themselves a `{ data, layout }` object.
    pub fn from_chart_entry(entry: &Value) -> Result<Self, String> {
        let raw = entry
            .as_str()
            .ok_or_else(|| format!("expected a JSON-encoded string, got {}", json_kind(entry)))?;
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }
}

/// One row of the tabular data preview, in backend column order.
pub type PreviewRow = Map<String, Value>;

// ---------------------------------------------------------------------------
// POST /api/chat
// ---------------------------------------------------------------------------

/// Request body for the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub page: u32,
    pub items_per_page: u32,
}

/// Response of `/api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub recommendations: Vec<RecommendationItem>,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default = "first_page")]
    pub current_page: u32,
}

fn first_page() -> u32 {
    1
}

/// One training/course record as returned by the backend.
///
/// Fields are display strings. The backend is loose about types (durations
/// and popularity arrive as numbers), so every field accepts any JSON scalar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationItem {
    #[serde(deserialize_with = "display_string")]
    pub title: String,
    #[serde(rename = "type", deserialize_with = "display_string")]
    pub kind: String,
    #[serde(deserialize_with = "display_string")]
    pub level: String,
    #[serde(deserialize_with = "display_string")]
    pub roles: String,
    #[serde(deserialize_with = "display_string")]
    pub products: String,
    #[serde(deserialize_with = "display_string")]
    pub duration: String,
    #[serde(deserialize_with = "display_string")]
    pub popularity: String,
    #[serde(deserialize_with = "display_string")]
    pub certified_status: String,
    #[serde(deserialize_with = "display_string")]
    pub summary: String,
    #[serde(deserialize_with = "display_string")]
    pub url: String,
}

/// Render a JSON scalar as display text. `null` becomes the empty string.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
