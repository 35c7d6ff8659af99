//! Capability descriptor: which optional UI regions a page has.
//!
//! The view controller is built from a [`Layout`] instead of probing for
//! elements. Every feature checks its region here once, at construction, and
//! an absent region simply means the feature is not wired.

/// A navigation link targeting a tab panel (`href` is `#panel-id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkSpec {
    pub href: String,
    pub label: String,
}

impl NavLinkSpec {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// `.nav-link` elements, in document order.
    pub navigation: Vec<NavLinkSpec>,
    /// `.tab-content` panel ids, in document order.
    pub tabs: Vec<String>,
    /// `levels-filter-checkboxes`
    pub levels_filter: bool,
    /// `types-filter-checkboxes`
    pub types_filter: bool,
    /// `update-analytics-button`
    pub update_analytics_button: bool,
    /// `kpis-output`
    pub kpis: bool,
    /// Chart keys; each has a `{key}-output` container.
    pub charts: Vec<String>,
    /// `data-preview-output`
    pub data_preview: bool,
    /// `recommendation-output`
    pub recommendations: bool,
    /// Chat input, submit button and message list. All three or none.
    pub chat: bool,
    /// `prev-button`, `next-button` and `page-info`.
    pub pagination: bool,
}

/// Chart keys served by the analytics endpoint.
pub const DASHBOARD_CHARTS: [&str; 6] = ["chart1", "chart2", "chart3", "chart4", "chart5", "chart6"];

impl Layout {
    /// The analytics dashboard: home + dashboard tabs, filters, KPIs, the six
    /// charts and the data preview.
    pub fn dashboard() -> Self {
        Self {
            navigation: vec![
                NavLinkSpec::new("#home", "Accueil"),
                NavLinkSpec::new("#dashboard", "Tableau de bord"),
            ],
            tabs: vec!["home".to_string(), "dashboard".to_string()],
            levels_filter: true,
            types_filter: true,
            update_analytics_button: true,
            kpis: true,
            charts: DASHBOARD_CHARTS.iter().map(|k| k.to_string()).collect(),
            data_preview: true,
            ..Self::default()
        }
    }

    /// The chatbot page: conversation, recommendation list and pagination.
    pub fn chatbot() -> Self {
        Self {
            recommendations: true,
            chat: true,
            pagination: true,
            ..Self::default()
        }
    }
}
