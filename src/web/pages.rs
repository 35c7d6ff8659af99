//! Full-document rendering of a [`Page`] for the hosted UI.
//!
//! Region contents (cards, KPIs, tables) are already HTML fragments produced
//! by the view layer; this module lays them out, turns every interaction into
//! a form post, and emits the Plotly calls for plotted chart containers.

use super::frontend::{PLOTLY_SRC, STYLE};
use crate::view::filters::checkbox_group_html;
use crate::view::html::{escape, script_json};
use crate::view::page::{ChartContainer, Page};

/// Which hosted page is being rendered; decides titles and form targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Dashboard,
    Chatbot,
}

impl PageKind {
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Chatbot => "/chatbot",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Tableau de bord des formations",
            Self::Chatbot => "Assistant de formation",
        }
    }
}

/// Tab that hosts the analytics block when the page has tabs.
const ANALYTICS_TAB: &str = "dashboard";
const HOME_TAB: &str = "home";

pub fn render_document(kind: PageKind, page: &Page) -> String {
    let needs_plotly = page.charts.iter().any(|c| c.plot.is_some());
    let plotly = if needs_plotly {
        format!("<script src=\"{PLOTLY_SRC}\" charset=\"utf-8\"></script>")
    } else {
        String::new()
    };

    let mut body = String::new();
    body.push_str(&header_html(kind));
    body.push_str(&nav_html(page));

    let analytics_in_tab = page.tabs.iter().any(|t| t.id == ANALYTICS_TAB);
    for tab in &page.tabs {
        let content = match tab.id.as_str() {
            ANALYTICS_TAB => analytics_html(page),
            HOME_TAB => home_html(),
            _ => String::new(),
        };
        body.push_str(&format!(
            "<section id=\"{}\" class=\"tab-content{}\">{}</section>\n",
            escape(&tab.id),
            if tab.active { " active" } else { "" },
            content
        ));
    }
    if !analytics_in_tab {
        body.push_str(&analytics_html(page));
    }
    body.push_str(&chat_html(page));

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
{plotly}
</head>
<body>
<div class="app">
{body}
</div>
</body>
</html>"#,
        title = kind.title(),
    )
}

fn header_html(kind: PageKind) -> String {
    let (other_path, other_label) = match kind {
        PageKind::Dashboard => (PageKind::Chatbot.path(), "Discuter avec Cobot"),
        PageKind::Chatbot => (PageKind::Dashboard.path(), "Tableau de bord"),
    };
    format!(
        "<header><h1><span class=\"logo\">cobot</span> {}</h1><a href=\"{other_path}\" id=\"discover-cobot-button\">{other_label}</a></header>\n",
        kind.title()
    )
}

fn nav_html(page: &Page) -> String {
    if page.nav_links.is_empty() {
        return String::new();
    }
    let links: String = page
        .nav_links
        .iter()
        .map(|link| {
            format!(
                "<form method=\"post\" action=\"/dashboard/nav\"><button class=\"nav-link{}\" name=\"target\" value=\"{}\">{}</button></form>",
                if link.active { " active" } else { "" },
                escape(&link.href),
                escape(&link.label)
            )
        })
        .collect();
    format!("<nav>{links}</nav>\n")
}

fn home_html() -> String {
    format!(
        "<div class=\"card\"><h2>Bienvenue</h2><p>Explorez le catalogue de formations ou <a href=\"{}\">demandez une recommandation à Cobot</a>.</p></div>",
        PageKind::Chatbot.path()
    )
}

fn analytics_html(page: &Page) -> String {
    let mut html = String::new();

    if page.levels_filter.is_some() || page.types_filter.is_some() {
        html.push_str("<div class=\"card\"><h2>Filtres</h2><form method=\"post\" action=\"/dashboard/analytics\" class=\"filters\">");
        for group in [&page.levels_filter, &page.types_filter].into_iter().flatten() {
            html.push_str(&format!(
                "<div class=\"group\" id=\"{}\">{}</div>",
                group.element_id,
                checkbox_group_html(group)
            ));
        }
        if page.update_analytics_button {
            html.push_str("<button type=\"submit\" id=\"update-analytics-button\">Mettre à jour</button>");
        }
        html.push_str("</form></div>");
    }

    if let Some(kpis) = &page.kpis {
        html.push_str(&format!(
            "<div class=\"card\"><h2>Indicateurs clés</h2><div id=\"kpis-output\" class=\"kpis\">{}</div></div>",
            kpis.html
        ));
    }

    if !page.charts.is_empty() {
        html.push_str("<div class=\"card\"><div class=\"charts\">");
        for chart in &page.charts {
            html.push_str(&chart_html(chart));
        }
        html.push_str("</div></div>");
    }

    if let Some(preview) = &page.data_preview {
        html.push_str(&format!(
            "<div class=\"card\"><h2>Aperçu des données</h2><div id=\"data-preview-output\">{}</div></div>",
            preview.html
        ));
    }

    html
}

/// Container div plus, when plotted, the `Plotly.newPlot` call with the
/// backend's `data` and `layout` passed through untouched.
pub fn chart_html(chart: &ChartContainer) -> String {
    let id = escape(&chart.element_id());
    let mut html = format!("<div id=\"{id}\" class=\"chart\"></div>");
    if let Some(plot) = &chart.plot {
        html.push_str(&format!(
            "<script>Plotly.newPlot(\"{id}\", {}, {});</script>",
            script_json(&plot.data),
            script_json(&plot.layout)
        ));
    }
    html
}

fn chat_html(page: &Page) -> String {
    let mut html = String::new();

    if let Some(chat) = &page.chat {
        let bubbles: String = chat.messages.iter().map(|m| m.to_html()).collect();
        html.push_str(&format!(
            r#"<div class="card">
<div class="chat-messages" id="chat-messages">{bubbles}</div>
<form method="post" action="/chatbot/message" class="chat-input">
<input id="chat-user-input" name="message" value="{input}" autocomplete="off" autofocus placeholder="Quelle formation cherchez-vous ?">
<button type="submit" id="chat-submit-button">Envoyer</button>
</form>
<script>var m = document.getElementById("chat-messages"); m.scrollTop = m.scrollHeight;</script>
</div>
"#,
            input = escape(&chat.input)
        ));
    }

    if let Some(recommendations) = &page.recommendations {
        html.push_str(&format!(
            "<div class=\"card\"><h2>Recommandations</h2><div id=\"recommendation-output\">{}</div>",
            recommendations.html
        ));
        if let Some(bar) = &page.pagination {
            html.push_str(&format!(
                r#"<div class="pagination">
<form method="post" action="/chatbot/prev"><button id="prev-button"{prev}>Précédent</button></form>
<span id="page-info">{info}</span>
<form method="post" action="/chatbot/next"><button id="next-button"{next}>Suivant</button></form>
</div>"#,
                prev = disabled(bar.prev_disabled),
                next = disabled(bar.next_disabled),
                info = escape(&bar.info)
            ));
        }
        html.push_str("</div>\n");
    }

    html
}

fn disabled(flag: bool) -> &'static str {
    if flag { " disabled" } else { "" }
}
