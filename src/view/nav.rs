use super::page::Page;

/// Handle a click on the navigation link with the given `href`.
///
/// All links and panels are deactivated, the clicked link is activated, and
/// the panel whose id matches the fragment (`#dashboard` → `dashboard`) is
/// activated and scrolled into view. A fragment with no matching panel only
/// highlights the link. Returns `false` when no link has that `href`.
pub fn navigate(page: &mut Page, href: &str) -> bool {
    if !page.nav_links.iter().any(|l| l.href == href) {
        tracing::debug!(href, "navigation click on unknown link ignored");
        return false;
    }

    for link in &mut page.nav_links {
        link.active = link.href == href;
    }
    for tab in &mut page.tabs {
        tab.active = false;
    }

    let target = href.strip_prefix('#').unwrap_or(href);
    match page.tabs.iter_mut().find(|t| t.id == target) {
        Some(tab) => {
            tab.active = true;
            page.scroll_target = Some(target.to_string());
        }
        None => {
            tracing::debug!(target, "navigation target has no panel");
            page.scroll_target = None;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::layout::{Layout, NavLinkSpec};

    #[test]
    fn activates_link_and_matching_panel() {
        let mut page = Page::from_layout(&Layout::dashboard());
        assert!(navigate(&mut page, "#dashboard"));

        let active: Vec<_> = page.nav_links.iter().filter(|l| l.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].href, "#dashboard");
        assert_eq!(page.active_tab(), Some("dashboard"));
        assert_eq!(page.scroll_target.as_deref(), Some("dashboard"));
    }

    #[test]
    fn unmatched_target_only_highlights_link() {
        let mut layout = Layout::dashboard();
        layout.navigation.push(NavLinkSpec::new("#contact", "Contact"));
        let mut page = Page::from_layout(&layout);

        assert!(navigate(&mut page, "#contact"));
        assert!(page.nav_links.iter().all(|l| l.active == (l.href == "#contact")));
        assert_eq!(page.active_tab(), None);
        assert_eq!(page.scroll_target, None);
    }

    #[test]
    fn unmatched_target_clears_previous_scroll() {
        let mut layout = Layout::dashboard();
        layout.navigation.push(NavLinkSpec::new("#contact", "Contact"));
        let mut page = Page::from_layout(&layout);

        assert!(navigate(&mut page, "#dashboard"));
        assert_eq!(page.scroll_target.as_deref(), Some("dashboard"));

        assert!(navigate(&mut page, "#contact"));
        assert_eq!(page.scroll_target, None);
    }

    #[test]
    fn unknown_link_changes_nothing() {
        let mut page = Page::from_layout(&Layout::dashboard());
        let before = page.clone();
        assert!(!navigate(&mut page, "#nowhere"));
        assert_eq!(page, before);
    }
}
