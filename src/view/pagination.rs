use super::page::PaginationBar;

/// Show `Page current / total` and set the button states.
///
/// "Previous" is disabled on the first page and "next" on the last one. A
/// backend that reports zero pages leaves both disabled.
pub fn update(bar: &mut PaginationBar, total_pages: u32, current_page: u32) {
    bar.info = format!("Page {current_page} / {total_pages}");
    bar.prev_disabled = current_page <= 1;
    bar.next_disabled = current_page >= total_pages;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_follow_page_position() {
        for total in 1..=4 {
            for current in 1..=total {
                let mut bar = PaginationBar::default();
                update(&mut bar, total, current);
                assert_eq!(bar.info, format!("Page {current} / {total}"));
                assert_eq!(bar.prev_disabled, current == 1, "prev at {current}/{total}");
                assert_eq!(bar.next_disabled, current == total, "next at {current}/{total}");
            }
        }
    }

    #[test]
    fn zero_pages_disables_both() {
        let mut bar = PaginationBar::default();
        update(&mut bar, 0, 1);
        assert_eq!(bar.info, "Page 1 / 0");
        assert!(bar.prev_disabled && bar.next_disabled);
    }
}
