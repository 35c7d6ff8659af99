//! CLI command implementations for cobot.
//!
//! Provides subcommand handlers for:
//! - `cobot serve` — host the dashboard and chatbot pages
//! - `cobot filters` — list the filter options the backend offers
//! - `cobot analytics --level L --type T` — KPIs, chart status and data preview
//! - `cobot chat "question"` — one chatbot exchange with paginated results
//! - `cobot config show|init|set|reset` — configuration management

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;

use cobot::backend::{
    AnalyticsQuery, AnalyticsResponse, Backend, ChatRequest, ChatResponse, HttpBackend,
    KpiSummary, PlotSpec, PreviewRow, RecommendationItem,
};
use cobot::backend::models::scalar_text;
use cobot::config::{self, CobotConfig};
use cobot::view::analytics::kpi_value;
use cobot::view::strings;
use cobot::web::{self, WebApp};

/// Output format for backend-facing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Rows of the data preview shown in the terminal.
const PREVIEW_ROWS: usize = 10;
/// Widest cell printed in the preview table.
const PREVIEW_CELL_WIDTH: usize = 24;

// ---------------------------------------------------------------------------
// cobot serve
// ---------------------------------------------------------------------------

/// Serve the hosted pages until the process is stopped.
pub fn run_serve(cfg: &CobotConfig, addr: &str, open: bool) -> Result<()> {
    let backend = HttpBackend::from_config(&cfg.backend);
    println!(
        "{} cobot serving on {} (backend {})",
        "▶".green().bold(),
        format!("http://{addr}").bold(),
        backend.base_url().dimmed()
    );
    let mut app = WebApp::new(backend, cfg.chat.items_per_page);
    web::serve(addr, &mut app, open)
}

// ---------------------------------------------------------------------------
// cobot filters
// ---------------------------------------------------------------------------

pub fn run_filters(cfg: &CobotConfig, format: OutputFormat) -> Result<()> {
    let backend = HttpBackend::from_config(&cfg.backend);
    let options = backend.filters()?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    print_option_list("Levels", &options.levels);
    println!();
    print_option_list("Types", &options.types);
    Ok(())
}

fn print_option_list(title: &str, values: &[String]) {
    println!("{}", title.bold().cyan());
    if values.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for value in values {
        println!("  {} {}", "·".dimmed(), value);
    }
}

// ---------------------------------------------------------------------------
// cobot analytics
// ---------------------------------------------------------------------------

/// Fetch the analytics for a filter selection and summarize each view.
pub fn run_analytics(
    cfg: &CobotConfig,
    levels: Vec<String>,
    types: Vec<String>,
    format: OutputFormat,
) -> Result<()> {
    let backend = HttpBackend::from_config(&cfg.backend);
    let query = AnalyticsQuery {
        levels_filter: levels,
        types_filter: types,
        query: String::new(),
    };
    let response = backend.recommendations(&query)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Table => print_analytics_table(&response),
    }
    Ok(())
}

fn print_analytics_table(response: &AnalyticsResponse) {
    println!("{}", "Indicateurs clés".bold().cyan());
    println!("{}", "=".repeat(50));
    match serde_json::from_value::<KpiSummary>(response.kpis.clone()) {
        Ok(kpis) => {
            println!("  {:<28} {}", strings::KPI_TOTAL_ITEMS, kpis.total_items.to_string().bold());
            for (label, value) in [
                (strings::KPI_TOTAL_HOURS, kpis.total_duration_hours),
                (strings::KPI_AVG_POPULARITY, kpis.avg_popularity),
                (strings::KPI_CERTIFIED, kpis.certified_percentage),
            ] {
                println!("  {:<28} {}", label, kpi_value(value).bold());
            }
        }
        Err(e) => println!("  {} {}", "✗".red().bold(), format!("unreadable KPIs: {e}").dimmed()),
    }

    println!();
    println!("{}", "Graphiques".bold().cyan());
    println!("{}", "=".repeat(50));
    match response.charts.as_object() {
        Some(entries) if !entries.is_empty() => {
            for (key, entry) in entries {
                match PlotSpec::from_chart_entry(entry) {
                    Ok(spec) => println!(
                        "  {} {:<10} {}",
                        "✓".green().bold(),
                        key,
                        describe_plot(&spec).dimmed()
                    ),
                    Err(e) => println!("  {} {:<10} {}", "✗".red().bold(), key, e.dimmed()),
                }
            }
        }
        _ => println!("  {}", "(none)".dimmed()),
    }

    println!();
    println!("{}", "Aperçu des données".bold().cyan());
    println!("{}", "=".repeat(50));
    match serde_json::from_value::<Vec<PreviewRow>>(response.data_preview.clone()) {
        Ok(rows) => print_preview(&rows),
        Err(e) => println!("  {} {}", "✗".red().bold(), format!("unreadable preview: {e}").dimmed()),
    }
}

/// "3 traces · Répartition par niveau"
fn describe_plot(spec: &PlotSpec) -> String {
    let traces = spec.data.as_array().map(Vec::len).unwrap_or(0);
    let title = match spec.layout.get("title") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(t)) => t.get("text").map(scalar_text).unwrap_or_default(),
        _ => String::new(),
    };
    let noun = if traces == 1 { "trace" } else { "traces" };
    if title.is_empty() {
        format!("{traces} {noun}")
    } else {
        format!("{traces} {noun} · {title}")
    }
}

fn print_preview(rows: &[PreviewRow]) {
    let Some(first) = rows.first() else {
        println!("  {}", strings::NO_PREVIEW_DATA.yellow());
        return;
    };
    let headers: Vec<&String> = first.keys().collect();

    let header_line: Vec<String> = headers
        .iter()
        .map(|h| format!("{:<width$}", truncate(h, PREVIEW_CELL_WIDTH), width = PREVIEW_CELL_WIDTH))
        .collect();
    println!("  {}", header_line.join(" ").bold());

    for row in rows.iter().take(PREVIEW_ROWS) {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| {
                let cell = row.get(h.as_str()).map(scalar_text).unwrap_or_default();
                format!("{:<width$}", truncate(&cell, PREVIEW_CELL_WIDTH), width = PREVIEW_CELL_WIDTH)
            })
            .collect();
        println!("  {}", cells.join(" "));
    }
    if rows.len() > PREVIEW_ROWS {
        println!(
            "  {}",
            format!("… {} more rows", rows.len() - PREVIEW_ROWS).dimmed()
        );
    }
}

// ---------------------------------------------------------------------------
// cobot chat
// ---------------------------------------------------------------------------

/// Send one chat message and print the answer with its recommendation page.
pub fn run_chat(cfg: &CobotConfig, message: &str, page: u32, format: OutputFormat) -> Result<()> {
    let message = message.trim();
    if message.is_empty() {
        anyhow::bail!("message must not be blank");
    }

    let backend = HttpBackend::from_config(&cfg.backend);
    let request = ChatRequest {
        message: message.to_string(),
        page: page.max(1),
        items_per_page: cfg.chat.items_per_page,
    };
    let response = backend
        .chat(&request)
        .with_context(|| format!("chat request for page {} failed", request.page))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Table => print_chat(&response),
    }
    Ok(())
}

fn print_chat(response: &ChatResponse) {
    if !response.message.is_empty() {
        println!("{} {}", "cobot:".bold().cyan(), response.message);
        println!();
    }

    if response.recommendations.is_empty() {
        println!("{}", strings::NO_RECOMMENDATIONS.yellow());
    }
    for (i, item) in response.recommendations.iter().enumerate() {
        print_recommendation(i + 1, item);
    }

    println!();
    println!(
        "{}",
        format!("Page {} / {}", response.current_page, response.total_pages).dimmed()
    );
}

fn print_recommendation(index: usize, item: &RecommendationItem) {
    println!("{:>3}. {}", index, item.title.bold());
    let details: Vec<String> = [
        (strings::LABEL_TYPE, &item.kind),
        (strings::LABEL_LEVEL, &item.level),
        (strings::LABEL_DURATION, &item.duration),
        (strings::LABEL_STATUS, &item.certified_status),
    ]
    .iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{label}: {value}"))
    .collect();
    if !details.is_empty() {
        println!("     {}", details.join(" • ").dimmed());
    }
    if !item.summary.is_empty() {
        println!("     {}", truncate(&item.summary, 100));
    }
    if !item.url.is_empty() {
        println!("     {}", item.url.blue().underline());
    }
}

// ---------------------------------------------------------------------------
// cobot config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective cobot Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.cobot/config.toml", global_exists);
    print_source(".cobot.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "COBOT_* environment variables".dimmed()
    );

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.cobot/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!("  {}", "Point backend.base_url at your recommendation API.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Truncate to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
