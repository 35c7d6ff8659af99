use super::html::{escape, paragraph};
use super::strings;
use crate::backend::RecommendationItem;

/// Render recommendation cards in backend order.
///
/// An empty list renders the fixed no-results message instead of cards.
pub fn recommendations_html(items: &[RecommendationItem]) -> String {
    if items.is_empty() {
        return paragraph(strings::NO_RESULTS);
    }
    items.iter().map(card_html).collect::<Vec<_>>().join("\n")
}

fn card_html(item: &RecommendationItem) -> String {
    let details = [
        (strings::LABEL_TYPE, &item.kind),
        (strings::LABEL_LEVEL, &item.level),
        (strings::LABEL_ROLES, &item.roles),
        (strings::LABEL_PRODUCTS, &item.products),
        (strings::LABEL_DURATION, &item.duration),
        (strings::LABEL_POPULARITY, &item.popularity),
        (strings::LABEL_STATUS, &item.certified_status),
    ]
    .iter()
    .map(|(label, value)| format!("<b>{label} :</b> {}", escape(value)))
    .collect::<Vec<_>>()
    .join(" • ");

    format!(
        r#"<div class="recommendation-item">
    <h4>{title}</h4>
    <div class="details">{details}</div>
    <p class="summary">{summary}</p>
    <a href="{url}" target="_blank" rel="noopener" class="link"><i class="fas fa-external-link-alt"></i> {open}</a>
</div>"#,
        title = escape(&item.title),
        summary = escape(&item.summary),
        url = escape(&item.url),
        open = strings::OPEN_TRAINING,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, url: &str) -> RecommendationItem {
        RecommendationItem {
            title: title.to_string(),
            kind: "Video".to_string(),
            level: "Beginner".to_string(),
            url: url.to_string(),
            ..RecommendationItem::default()
        }
    }

    #[test]
    fn one_card_per_item_in_order() {
        let items = vec![
            item("Cobot safety", "https://learn.example/safety"),
            item("Palletizing 101", "https://learn.example/pallet"),
            item("Gripper setup", "https://learn.example/gripper"),
        ];
        let html = recommendations_html(&items);

        assert_eq!(html.matches("class=\"recommendation-item\"").count(), 3);
        let positions: Vec<usize> = items
            .iter()
            .map(|i| html.find(&format!("<h4>{}</h4>", i.title)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for i in &items {
            assert!(html.contains(&format!("href=\"{}\" target=\"_blank\"", i.url)));
        }
    }

    #[test]
    fn empty_list_renders_no_results_message() {
        let html = recommendations_html(&[]);
        assert!(!html.contains("recommendation-item"));
        assert_eq!(
            html,
            "<p>Aucun résultat précis trouvé. Essayez d&#39;élargir la requête (moins de filtres).</p>"
        );
    }

    #[test]
    fn metadata_line_is_escaped() {
        let mut rec = item("<script>", "https://x");
        rec.roles = "Operator & Integrator".to_string();
        let html = recommendations_html(&[rec]);
        assert!(html.contains("<h4>&lt;script&gt;</h4>"));
        assert!(html.contains("<b>Rôles :</b> Operator &amp; Integrator"));
        assert!(html.contains("<b>Type :</b> Video • <b>Niveau :</b> Beginner"));
    }
}
