use super::html::escape;
use super::page::{Checkbox, CheckboxGroup, Page};
use crate::backend::{AnalyticsQuery, FilterOptions};

/// Replace both checkbox groups with the fetched options, none checked.
pub fn populate(page: &mut Page, options: &FilterOptions) {
    if let Some(group) = page.levels_filter.as_mut() {
        group.options = unchecked(&options.levels);
    }
    if let Some(group) = page.types_filter.as_mut() {
        group.options = unchecked(&options.types);
    }
}

fn unchecked(values: &[String]) -> Vec<Checkbox> {
    values
        .iter()
        .map(|value| Checkbox {
            value: value.clone(),
            checked: false,
        })
        .collect()
}

/// Build the analytics request from whatever is currently checked.
pub fn selected_query(page: &Page) -> AnalyticsQuery {
    AnalyticsQuery {
        levels_filter: page
            .levels_filter
            .as_ref()
            .map(CheckboxGroup::checked_values)
            .unwrap_or_default(),
        types_filter: page
            .types_filter
            .as_ref()
            .map(CheckboxGroup::checked_values)
            .unwrap_or_default(),
        query: String::new(),
    }
}

/// One `<label><input type="checkbox"> value</label>` per option.
pub fn checkbox_group_html(group: &CheckboxGroup) -> String {
    group
        .options
        .iter()
        .map(|option| {
            let value = escape(&option.value);
            let checked = if option.checked { " checked" } else { "" };
            format!(
                "<label><input type=\"checkbox\" name=\"{}\" value=\"{value}\"{checked}> {value}</label>",
                group.input_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
