//! KPI, chart and data-preview rendering for the analytics panel.
//!
//! The three views are independent: each decodes its own section of the
//! `/api/recommendations` response and failures stay local to that view (and,
//! for charts, to the single chart key).

use serde_json::Value;

use super::html::{escape, paragraph};
use super::page::Page;
use super::strings;
use crate::backend::{AnalyticsResponse, KpiSummary, PlotSpec, PreviewRow};
use crate::backend::models::scalar_text;
use crate::error::ViewError;

/// What happened to each view of one analytics refresh.
#[derive(Debug, Default)]
pub struct AnalyticsReport {
    pub kpis: Option<ViewError>,
    pub charts: ChartReport,
    pub data_preview: Option<ViewError>,
}

/// Per-key outcome of [`render_charts`].
#[derive(Debug, Default)]
pub struct ChartReport {
    pub rendered: Vec<String>,
    pub failed: Vec<(String, ViewError)>,
}

/// Render all three views of an analytics response into the page.
pub fn render(page: &mut Page, response: &AnalyticsResponse) -> AnalyticsReport {
    let kpis = render_kpis(page, &response.kpis).err();
    if let Some(err) = &kpis {
        tracing::error!(kind = err.kind(), error = %err, "failed to render KPIs");
    }

    let charts = render_charts(page, &response.charts);

    let data_preview = render_data_preview(page, &response.data_preview).err();
    if let Some(err) = &data_preview {
        tracing::error!(kind = err.kind(), error = %err, "failed to render data preview");
    }

    AnalyticsReport {
        kpis,
        charts,
        data_preview,
    }
}

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

pub fn render_kpis(page: &mut Page, raw: &Value) -> Result<(), ViewError> {
    let kpis: KpiSummary =
        serde_json::from_value(raw.clone()).map_err(|e| ViewError::parse("kpis", e))?;
    page.kpis_mut()?.html = kpis_html(&kpis);
    Ok(())
}

pub fn kpis_html(kpis: &KpiSummary) -> String {
    let rows = [
        (strings::KPI_TOTAL_ITEMS, kpis.total_items.to_string()),
        (strings::KPI_TOTAL_HOURS, kpi_value(kpis.total_duration_hours)),
        (strings::KPI_AVG_POPULARITY, kpi_value(kpis.avg_popularity)),
        (strings::KPI_CERTIFIED, kpi_value(kpis.certified_percentage)),
    ];
    rows.iter()
        .map(|(label, value)| format!("<div><b>{}</b> <p>{}</p></div>", escape(label), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Display form of a float KPI; missing and non-finite values show as unavailable.
pub fn kpi_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => strings::KPI_UNAVAILABLE.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Decode and plot each chart entry into its `{key}-output` container.
///
/// Each key is handled on its own: a malformed payload or a key without a
/// container is logged and recorded in the report, and the remaining keys
/// still render.
pub fn render_charts(page: &mut Page, charts: &Value) -> ChartReport {
    let mut report = ChartReport::default();

    let Some(entries) = charts.as_object() else {
        let err = ViewError::parse("charts", "expected an object of chart payloads");
        tracing::error!(error = %err, "failed to render charts");
        report.failed.push((String::new(), err));
        return report;
    };

    for (key, entry) in entries {
        match plot_chart(page, key, entry) {
            Ok(()) => {
                tracing::debug!(chart = %key, "chart rendered");
                report.rendered.push(key.clone());
            }
            Err(err) => {
                tracing::error!(chart = %key, kind = err.kind(), error = %err, raw = %entry, "failed to render chart");
                report.failed.push((key.clone(), err));
            }
        }
    }

    report
}

fn plot_chart(page: &mut Page, key: &str, entry: &Value) -> Result<(), ViewError> {
    let spec = PlotSpec::from_chart_entry(entry)
        .map_err(|reason| ViewError::parse(format!("chart {key}"), reason))?;
    page.chart_mut(key)?.plot = Some(spec);
    Ok(())
}

// ---------------------------------------------------------------------------
// Data preview
// ---------------------------------------------------------------------------

pub fn render_data_preview(page: &mut Page, raw: &Value) -> Result<(), ViewError> {
    let rows: Vec<PreviewRow> =
        serde_json::from_value(raw.clone()).map_err(|e| ViewError::parse("data_preview", e))?;
    page.data_preview_mut()?.html = data_preview_html(&rows);
    Ok(())
}

/// A table whose columns are the keys of the first row, in order.
pub fn data_preview_html(rows: &[PreviewRow]) -> String {
    let Some(first) = rows.first() else {
        return paragraph(strings::NO_PREVIEW_DATA);
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut html = String::from("<table><thead><tr>");
    for header in &headers {
        html.push_str(&format!("<th>{}</th>", escape(header)));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for header in &headers {
            let cell = row.get(header.as_str()).map(scalar_text).unwrap_or_default();
            html.push_str(&format!("<td>{}</td>", escape(&cell)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
