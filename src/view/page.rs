//! In-memory page state: one holder per region the [`Layout`] declares.
//!
//! Regions that the layout does not declare are `None`. Accessors return
//! [`ViewError::MissingElement`] for them so callers can log and move on.

use super::chat::ChatBubble;
use super::layout::Layout;
use crate::backend::PlotSpec;
use crate::error::ViewError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPanel {
    pub id: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub value: String,
    pub checked: bool,
}

/// A checkbox group container such as `levels-filter-checkboxes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxGroup {
    pub element_id: &'static str,
    /// `name` attribute shared by every input in the group.
    pub input_name: &'static str,
    pub options: Vec<Checkbox>,
}

impl CheckboxGroup {
    fn new(element_id: &'static str, input_name: &'static str) -> Self {
        Self {
            element_id,
            input_name,
            options: Vec::new(),
        }
    }

    /// Values of the checked inputs, in display order.
    pub fn checked_values(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.checked)
            .map(|o| o.value.clone())
            .collect()
    }
}

/// A container whose content is replaced wholesale (`innerHTML`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlRegion {
    pub html: String,
}

/// A `{key}-output` chart container.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartContainer {
    pub key: String,
    pub plot: Option<PlotSpec>,
}

impl ChartContainer {
    pub fn element_id(&self) -> String {
        format!("{}-output", self.key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatPanel {
    /// Current value of the chat input field.
    pub input: String,
    pub messages: Vec<ChatBubble>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBar {
    pub info: String,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl Default for PaginationBar {
    fn default() -> Self {
        Self {
            info: "Page 1 / 1".to_string(),
            prev_disabled: true,
            next_disabled: true,
        }
    }
}

pub const LEVELS_FILTER_ID: &str = "levels-filter-checkboxes";
pub const TYPES_FILTER_ID: &str = "types-filter-checkboxes";
pub const KPIS_ID: &str = "kpis-output";
pub const DATA_PREVIEW_ID: &str = "data-preview-output";
pub const RECOMMENDATIONS_ID: &str = "recommendation-output";
pub const CHAT_ID: &str = "chat-messages";
pub const PAGINATION_ID: &str = "page-info";

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub nav_links: Vec<NavLink>,
    pub tabs: Vec<TabPanel>,
    /// Panel most recently scrolled into view.
    pub scroll_target: Option<String>,
    pub levels_filter: Option<CheckboxGroup>,
    pub types_filter: Option<CheckboxGroup>,
    pub update_analytics_button: bool,
    pub kpis: Option<HtmlRegion>,
    pub charts: Vec<ChartContainer>,
    pub data_preview: Option<HtmlRegion>,
    pub recommendations: Option<HtmlRegion>,
    pub chat: Option<ChatPanel>,
    pub pagination: Option<PaginationBar>,
}

impl Page {
    /// Materialise the regions the layout declares. The first link and
    /// first tab start active.
    pub fn from_layout(layout: &Layout) -> Self {
        let nav_links = layout
            .navigation
            .iter()
            .enumerate()
            .map(|(i, spec)| NavLink {
                href: spec.href.clone(),
                label: spec.label.clone(),
                active: i == 0,
            })
            .collect();
        let tabs = layout
            .tabs
            .iter()
            .enumerate()
            .map(|(i, id)| TabPanel {
                id: id.clone(),
                active: i == 0,
            })
            .collect();

        Self {
            nav_links,
            tabs,
            scroll_target: None,
            levels_filter: layout
                .levels_filter
                .then(|| CheckboxGroup::new(LEVELS_FILTER_ID, "level")),
            types_filter: layout
                .types_filter
                .then(|| CheckboxGroup::new(TYPES_FILTER_ID, "type")),
            update_analytics_button: layout.update_analytics_button,
            kpis: layout.kpis.then(HtmlRegion::default),
            charts: layout
                .charts
                .iter()
                .map(|key| ChartContainer {
                    key: key.clone(),
                    plot: None,
                })
                .collect(),
            data_preview: layout.data_preview.then(HtmlRegion::default),
            recommendations: layout.recommendations.then(HtmlRegion::default),
            chat: layout.chat.then(ChatPanel::default),
            pagination: layout.pagination.then(PaginationBar::default),
        }
    }

    pub fn kpis_mut(&mut self) -> Result<&mut HtmlRegion, ViewError> {
        self.kpis.as_mut().ok_or_else(|| ViewError::missing(KPIS_ID))
    }

    pub fn data_preview_mut(&mut self) -> Result<&mut HtmlRegion, ViewError> {
        self.data_preview
            .as_mut()
            .ok_or_else(|| ViewError::missing(DATA_PREVIEW_ID))
    }

    pub fn recommendations_mut(&mut self) -> Result<&mut HtmlRegion, ViewError> {
        self.recommendations
            .as_mut()
            .ok_or_else(|| ViewError::missing(RECOMMENDATIONS_ID))
    }

    pub fn chat_mut(&mut self) -> Result<&mut ChatPanel, ViewError> {
        self.chat.as_mut().ok_or_else(|| ViewError::missing(CHAT_ID))
    }

    pub fn pagination_mut(&mut self) -> Result<&mut PaginationBar, ViewError> {
        self.pagination
            .as_mut()
            .ok_or_else(|| ViewError::missing(PAGINATION_ID))
    }

    pub fn chart_mut(&mut self, key: &str) -> Result<&mut ChartContainer, ViewError> {
        self.charts
            .iter_mut()
            .find(|c| c.key == key)
            .ok_or_else(|| ViewError::missing(format!("{key}-output")))
    }

    /// Tick or untick one filter checkbox (`group` is `level` or `type`).
    /// Returns `false` when no such checkbox is on the page.
    pub fn set_checked(&mut self, group: &str, value: &str, checked: bool) -> bool {
        let group = match group {
            "level" => self.levels_filter.as_mut(),
            "type" => self.types_filter.as_mut(),
            _ => None,
        };
        let Some(group) = group else {
            return false;
        };
        match group.options.iter_mut().find(|o| o.value == value) {
            Some(option) => {
                option.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Untick every filter checkbox.
    pub fn clear_checked(&mut self) {
        for group in [self.levels_filter.as_mut(), self.types_filter.as_mut()]
            .into_iter()
            .flatten()
        {
            for option in &mut group.options {
                option.checked = false;
            }
        }
    }

    /// Type into the chat input. No-op on pages without a chat panel.
    pub fn set_chat_input(&mut self, text: &str) {
        if let Some(chat) = self.chat.as_mut() {
            chat.input = text.to_string();
        }
    }

    /// Filters are only loaded when both checkbox groups exist.
    pub fn has_filters(&self) -> bool {
        self.levels_filter.is_some() && self.types_filter.is_some()
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.tabs.iter().find(|t| t.active).map(|t| t.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_regions_report_missing_element() {
        let mut page = Page::from_layout(&Layout::chatbot());
        assert!(page.recommendations_mut().is_ok());
        match page.kpis_mut() {
            Err(ViewError::MissingElement(id)) => assert_eq!(id, "kpis-output"),
            other => panic!("expected missing element, got {other:?}"),
        }
        assert!(matches!(
            page.chart_mut("chart1"),
            Err(ViewError::MissingElement(_))
        ));
    }

    #[test]
    fn first_tab_and_link_start_active() {
        let page = Page::from_layout(&Layout::dashboard());
        assert_eq!(page.active_tab(), Some("home"));
        assert!(page.nav_links[0].active);
        assert!(!page.nav_links[1].active);
        assert_eq!(page.charts[0].element_id(), "chart1-output");
    }

    #[test]
    fn filters_need_both_groups() {
        assert!(Page::from_layout(&Layout::dashboard()).has_filters());
        assert!(!Page::from_layout(&Layout::chatbot()).has_filters());

        let one_group = Layout {
            levels_filter: true,
            ..Layout::default()
        };
        assert!(!Page::from_layout(&one_group).has_filters());
    }

    #[test]
    fn set_checked_only_touches_known_options() {
        let mut page = Page::from_layout(&Layout::dashboard());
        assert!(!page.set_checked("level", "Beginner", true));

        page.levels_filter.as_mut().unwrap().options.push(Checkbox {
            value: "Beginner".to_string(),
            checked: false,
        });
        assert!(page.set_checked("level", "Beginner", true));
        assert!(!page.set_checked("type", "Beginner", true));
        assert_eq!(
            page.levels_filter.as_ref().unwrap().checked_values(),
            vec!["Beginner"]
        );

        page.clear_checked();
        assert!(page.levels_filter.as_ref().unwrap().checked_values().is_empty());
    }
}
