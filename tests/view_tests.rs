/// Integration tests for the view controller.
///
/// Unit tests for the renderers and the chat session live in each file's
/// `#[cfg(test)]` block. These tests drive whole pages through events against
/// a scripted backend that records every request it receives:
///
/// - Dashboard load, filter selection and analytics rendering
/// - Failure isolation between KPIs, charts and the data preview
/// - Chat submission, pagination and stale-response handling
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use serde_json::{Value, json};

use cobot::backend::{
    AnalyticsQuery, AnalyticsResponse, Backend, ChatRequest, ChatResponse, FilterOptions,
    RecommendationItem,
};
use cobot::error::ViewError;
use cobot::view::chat::BubbleKind;
use cobot::view::strings;
use cobot::view::{ChatBubble, Event, Layout, ViewController};

// ---------------------------------------------------------------------------
// Scripted backend
// ---------------------------------------------------------------------------

/// Answers from fixed scripts; unscripted calls fail as network errors.
#[derive(Default)]
struct Scripted {
    filters: Option<FilterOptions>,
    analytics: Option<Value>,
    chat: RefCell<VecDeque<Result<ChatResponse, ViewError>>>,
    filter_calls: Cell<usize>,
    analytics_requests: RefCell<Vec<AnalyticsQuery>>,
    chat_requests: RefCell<Vec<ChatRequest>>,
}

impl Scripted {
    fn with_chat(responses: Vec<Result<ChatResponse, ViewError>>) -> Self {
        Self {
            chat: RefCell::new(responses.into()),
            ..Self::default()
        }
    }
}

impl Backend for Scripted {
    fn filters(&self) -> Result<FilterOptions, ViewError> {
        self.filter_calls.set(self.filter_calls.get() + 1);
        self.filters
            .clone()
            .ok_or_else(|| ViewError::network("/api/filters", "connection refused"))
    }

    fn recommendations(&self, query: &AnalyticsQuery) -> Result<AnalyticsResponse, ViewError> {
        self.analytics_requests.borrow_mut().push(query.clone());
        let raw = self
            .analytics
            .clone()
            .ok_or_else(|| ViewError::network("/api/recommendations", "connection refused"))?;
        serde_json::from_value(raw).map_err(|e| ViewError::parse("/api/recommendations", e))
    }

    fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ViewError> {
        self.chat_requests.borrow_mut().push(request.clone());
        self.chat
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ViewError::network("/api/chat", "not scripted")))
    }
}

fn chart(title: &str) -> Value {
    Value::String(
        json!({
            "data": [{"type": "bar", "x": ["Beginner"], "y": [3]}],
            "layout": {"title": title}
        })
        .to_string(),
    )
}

fn analytics_body() -> Value {
    json!({
        "kpis": {
            "total_items": 42,
            "total_duration_hours": 12.5,
            "avg_popularity": 4.2,
            "certified_percentage": 50.0
        },
        "charts": {
            "chart1": chart("Répartition par niveau"),
            "chart2": chart("Répartition par type")
        },
        "data_preview": [
            {"title": "Intro", "level": "Beginner", "duration": 2},
            {"title": "Deep dive", "level": "Advanced", "duration": null}
        ]
    })
}

fn chat_response(message: &str, current: u32, total: u32) -> ChatResponse {
    ChatResponse {
        message: message.to_string(),
        recommendations: Vec::new(),
        total_pages: total,
        current_page: current,
    }
}

fn dashboard(backend: &Scripted) -> ViewController<&Scripted> {
    ViewController::new(backend, &Layout::dashboard(), 10)
}

fn chatbot(backend: &Scripted) -> ViewController<&Scripted> {
    ViewController::new(backend, &Layout::chatbot(), 10)
}

fn submit(view: &mut ViewController<&Scripted>, text: &str) {
    view.page_mut().set_chat_input(text);
    view.handle(Event::ChatSubmit);
}

fn messages(view: &ViewController<&Scripted>) -> Vec<ChatBubble> {
    view.page().chat.as_ref().map(|c| c.messages.clone()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[test]
fn load_builds_one_unchecked_checkbox_per_option() {
    let backend = Scripted {
        filters: Some(FilterOptions {
            levels: vec!["Beginner".to_string()],
            types: vec!["Video".to_string()],
        }),
        analytics: Some(analytics_body()),
        ..Scripted::default()
    };
    let mut view = dashboard(&backend);
    view.handle(Event::Load);

    let levels = view.page().levels_filter.as_ref().unwrap();
    let types = view.page().types_filter.as_ref().unwrap();
    assert_eq!(levels.options.len(), 1);
    assert_eq!(levels.options[0].value, "Beginner");
    assert!(!levels.options[0].checked);
    assert_eq!(types.options.len(), 1);
    assert_eq!(types.options[0].value, "Video");

    // The initial analytics request is unfiltered.
    assert_eq!(
        *backend.analytics_requests.borrow(),
        vec![AnalyticsQuery::default()]
    );
}

#[test]
fn update_posts_exactly_the_checked_values() {
    let backend = Scripted {
        filters: Some(FilterOptions {
            levels: vec!["Beginner".to_string(), "Advanced".to_string()],
            types: vec!["Video".to_string(), "Lab".to_string()],
        }),
        analytics: Some(analytics_body()),
        ..Scripted::default()
    };
    let mut view = dashboard(&backend);
    view.handle(Event::Load);

    assert!(view.page_mut().set_checked("level", "Advanced", true));
    assert!(view.page_mut().set_checked("type", "Lab", true));
    assert!(!view.page_mut().set_checked("type", "Webinar", true));
    view.handle(Event::UpdateAnalytics);

    let requests = backend.analytics_requests.borrow();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1],
        AnalyticsQuery {
            levels_filter: vec!["Advanced".to_string()],
            types_filter: vec!["Lab".to_string()],
            query: String::new(),
        }
    );
}

#[test]
fn analytics_fill_kpis_charts_and_preview() {
    let backend = Scripted {
        analytics: Some(analytics_body()),
        ..Scripted::default()
    };
    let mut view = dashboard(&backend);
    let report = view.update_analytics().expect("request succeeds");

    assert!(report.kpis.is_none());
    assert!(report.data_preview.is_none());
    assert_eq!(report.charts.rendered, vec!["chart1", "chart2"]);

    let page = view.page();
    let kpis = &page.kpis.as_ref().unwrap().html;
    assert!(kpis.contains("<p>42</p>"));
    assert!(kpis.contains("<p>12.5</p>"));

    assert!(page.charts[0].plot.is_some());
    assert!(page.charts[1].plot.is_some());
    assert!(page.charts[2].plot.is_none());

    let preview = &page.data_preview.as_ref().unwrap().html;
    assert!(preview.contains("<th>title</th><th>level</th><th>duration</th>"));
    assert!(preview.contains("<td>Deep dive</td><td>Advanced</td><td></td>"));
}

#[test]
fn one_malformed_chart_does_not_block_the_others() {
    let mut body = analytics_body();
    body["charts"] = json!({
        "chart1": chart("Niveaux"),
        "chart2": "{not json",
        "chart3": chart("Durées"),
    });
    let backend = Scripted {
        analytics: Some(body),
        ..Scripted::default()
    };
    let mut view = dashboard(&backend);
    let report = view.update_analytics().unwrap();

    assert_eq!(report.charts.rendered, vec!["chart1", "chart3"]);
    assert_eq!(report.charts.failed.len(), 1);
    assert_eq!(report.charts.failed[0].0, "chart2");
    assert!(matches!(
        report.charts.failed[0].1,
        ViewError::ParseFailure { .. }
    ));

    let charts = &view.page().charts;
    assert!(charts[0].plot.is_some());
    assert!(charts[1].plot.is_none());
    assert!(charts[2].plot.is_some());
    // KPIs and preview are unaffected.
    assert!(!view.page().kpis.as_ref().unwrap().html.is_empty());
    assert!(!view.page().data_preview.as_ref().unwrap().html.is_empty());
}

#[test]
fn broken_kpis_leave_charts_and_preview_rendered() {
    let mut body = analytics_body();
    body["kpis"] = json!("oops");
    let backend = Scripted {
        analytics: Some(body),
        ..Scripted::default()
    };
    let mut view = dashboard(&backend);
    let report = view.update_analytics().unwrap();

    assert!(report.kpis.is_some());
    assert!(view.page().kpis.as_ref().unwrap().html.is_empty());
    assert_eq!(report.charts.rendered.len(), 2);
    assert!(report.data_preview.is_none());
}

#[test]
fn null_kpis_and_empty_preview_degrade_to_placeholders() {
    let backend = Scripted {
        analytics: Some(json!({
            "kpis": {
                "total_items": 0,
                "total_duration_hours": 0.0,
                "avg_popularity": null,
                "certified_percentage": null
            },
            "charts": {},
            "data_preview": []
        })),
        ..Scripted::default()
    };
    let mut view = dashboard(&backend);
    view.update_analytics().unwrap();

    let kpis = &view.page().kpis.as_ref().unwrap().html;
    assert_eq!(kpis.matches(strings::KPI_UNAVAILABLE).count(), 2);
    assert_eq!(
        view.page().data_preview.as_ref().unwrap().html,
        format!("<p>{}</p>", strings::NO_PREVIEW_DATA)
    );
}

#[test]
fn failed_requests_leave_the_dashboard_untouched() {
    let backend = Scripted::default();
    let mut view = dashboard(&backend);
    let before = view.page().clone();

    view.handle(Event::Load);

    assert_eq!(backend.filter_calls.get(), 1);
    assert_eq!(backend.analytics_requests.borrow().len(), 1);
    assert_eq!(*view.page(), before);
}

#[test]
fn navigation_switches_the_visible_tab() {
    let backend = Scripted::default();
    let mut view = dashboard(&backend);
    assert_eq!(view.page().active_tab(), Some("home"));

    view.handle(Event::NavClick {
        href: "#dashboard".to_string(),
    });
    assert_eq!(view.page().active_tab(), Some("dashboard"));
    assert_eq!(view.page().scroll_target.as_deref(), Some("dashboard"));
    assert!(view.page().nav_links[1].active);
    assert!(!view.page().nav_links[0].active);
}

#[test]
fn chatbot_page_ignores_dashboard_events() {
    let backend = Scripted::default();
    let mut view = chatbot(&backend);
    view.handle(Event::Load);
    view.handle(Event::UpdateAnalytics);

    assert_eq!(backend.filter_calls.get(), 0);
    assert!(backend.analytics_requests.borrow().is_empty());
}

// ---------------------------------------------------------------------------
// Chatbot
// ---------------------------------------------------------------------------

#[test]
fn answer_without_recommendations() {
    let backend = Scripted::with_chat(vec![Ok(chat_response("Hi", 1, 1))]);
    let mut view = chatbot(&backend);
    submit(&mut view, "Hi");

    assert_eq!(
        messages(&view),
        vec![ChatBubble::user("Hi"), ChatBubble::bot("Hi")]
    );
    assert_eq!(
        view.page().recommendations.as_ref().unwrap().html,
        format!("<p>{}</p>", strings::NO_RECOMMENDATIONS)
    );
    let bar = view.page().pagination.as_ref().unwrap();
    assert_eq!(bar.info, "Page 1 / 1");
    assert!(bar.prev_disabled);
    assert!(bar.next_disabled);
    assert_eq!(view.page().chat.as_ref().unwrap().input, "");
}

#[test]
fn blank_submit_sends_nothing() {
    let backend = Scripted::with_chat(vec![Ok(chat_response("unused", 1, 1))]);
    let mut view = chatbot(&backend);
    submit(&mut view, "   ");
    submit(&mut view, "");

    assert!(backend.chat_requests.borrow().is_empty());
    assert!(messages(&view).is_empty());
}

#[test]
fn only_enter_submits_from_the_keyboard() {
    let backend = Scripted::with_chat(vec![Ok(chat_response("ok", 1, 1))]);
    let mut view = chatbot(&backend);
    view.page_mut().set_chat_input("formation sécurité");

    view.handle(Event::ChatKeypress {
        key: "a".to_string(),
    });
    assert!(backend.chat_requests.borrow().is_empty());

    view.handle(Event::ChatKeypress {
        key: "Enter".to_string(),
    });
    assert_eq!(
        *backend.chat_requests.borrow(),
        vec![ChatRequest {
            message: "formation sécurité".to_string(),
            page: 1,
            items_per_page: 10,
        }]
    );
}

#[test]
fn paging_repeats_the_query_without_new_bubbles() {
    let backend = Scripted::with_chat(vec![
        Ok(chat_response("Voici 25 formations", 1, 3)),
        Ok(chat_response("ignored on paging", 2, 3)),
        Ok(chat_response("ignored on paging", 1, 3)),
    ]);
    let mut view = chatbot(&backend);
    submit(&mut view, "  robotique  ");
    assert_eq!(messages(&view).len(), 2);

    view.handle(Event::NextPage);
    assert_eq!(messages(&view).len(), 2);
    assert_eq!(view.session().current_page(), 2);
    let bar = view.page().pagination.as_ref().unwrap();
    assert_eq!(bar.info, "Page 2 / 3");
    assert!(!bar.prev_disabled);
    assert!(!bar.next_disabled);

    view.handle(Event::PrevPage);
    assert_eq!(messages(&view).len(), 2);
    assert_eq!(view.session().current_page(), 1);

    let requests = backend.chat_requests.borrow();
    let pages: Vec<u32> = requests.iter().map(|r| r.page).collect();
    assert_eq!(pages, vec![1, 2, 1]);
    assert!(requests.iter().all(|r| r.message == "robotique"));
}

#[test]
fn out_of_range_backend_page_keeps_paging_usable() {
    let backend = Scripted::with_chat(vec![
        Ok(chat_response("Voici", 5, 3)),
        Ok(chat_response("ignored on paging", 2, 3)),
    ]);
    let mut view = chatbot(&backend);
    submit(&mut view, "cobot");

    let bar = view.page().pagination.as_ref().unwrap();
    assert_eq!(bar.info, "Page 3 / 3");
    assert!(!bar.prev_disabled);
    assert!(bar.next_disabled);

    view.handle(Event::PrevPage);
    assert_eq!(backend.chat_requests.borrow()[1].page, 2);
    assert_eq!(view.session().current_page(), 2);
}

#[test]
fn paging_past_the_ends_sends_nothing() {
    let backend = Scripted::with_chat(vec![Ok(chat_response("Une seule page", 1, 1))]);
    let mut view = chatbot(&backend);
    view.handle(Event::PrevPage);
    view.handle(Event::NextPage);
    assert!(backend.chat_requests.borrow().is_empty());

    submit(&mut view, "python");
    view.handle(Event::PrevPage);
    view.handle(Event::NextPage);
    assert_eq!(backend.chat_requests.borrow().len(), 1);
}

#[test]
fn failed_chat_appends_the_apology() {
    let backend = Scripted::with_chat(vec![Err(ViewError::network("/api/chat", "timeout"))]);
    let mut view = chatbot(&backend);
    submit(&mut view, "Hello");

    let bubbles = messages(&view);
    assert_eq!(bubbles.len(), 2);
    assert_eq!(bubbles[0].kind, BubbleKind::User);
    assert_eq!(bubbles[1], ChatBubble::bot(strings::CHAT_APOLOGY));
    // Pagination keeps its previous state.
    assert_eq!(view.page().pagination.as_ref().unwrap().info, "Page 1 / 1");
}

#[test]
fn recommendations_are_rendered_as_cards() {
    let item = RecommendationItem {
        title: "Sécurité <cobot>".to_string(),
        kind: "Video".to_string(),
        level: "Beginner".to_string(),
        url: "https://example.com/course".to_string(),
        ..RecommendationItem::default()
    };
    let mut response = chat_response("Voici", 1, 1);
    response.recommendations = vec![item];
    let backend = Scripted::with_chat(vec![Ok(response)]);
    let mut view = chatbot(&backend);
    submit(&mut view, "sécurité");

    let html = &view.page().recommendations.as_ref().unwrap().html;
    assert_eq!(html.matches("class=\"recommendation-item\"").count(), 1);
    assert!(html.contains("Sécurité &lt;cobot&gt;"));
    assert!(html.contains("href=\"https://example.com/course\""));
}

#[test]
fn stale_answers_are_discarded() {
    let backend = Scripted::default();
    let mut view = chatbot(&backend);

    view.page_mut().set_chat_input("first");
    let first = view.begin_chat_query().unwrap();
    view.page_mut().set_chat_input("second");
    let second = view.begin_chat_query().unwrap();

    view.complete_chat(&second, Ok(chat_response("answer to second", 1, 2)));
    view.complete_chat(&first, Ok(chat_response("answer to first", 1, 5)));

    let bubbles = messages(&view);
    assert_eq!(
        bubbles,
        vec![
            ChatBubble::user("first"),
            ChatBubble::user("second"),
            ChatBubble::bot("answer to second"),
        ]
    );
    assert_eq!(view.session().total_pages(), 2);
    assert_eq!(view.page().pagination.as_ref().unwrap().info, "Page 1 / 2");
}
