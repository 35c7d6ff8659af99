//! The view controller: page events in, backend calls out, page updates back.
//!
//! A [`ViewController`] is built from a [`Layout`] (which regions exist) and a
//! [`Backend`]. UI events arrive as [`Event`]s; each one runs to completion,
//! catching and logging every failure so that nothing propagates out of
//! [`ViewController::handle`].
//!
//! Chat requests can also be driven in two halves
//! ([`ViewController::begin_chat_query`] / [`ViewController::begin_chat_page`]
//! then [`ViewController::complete_chat`]) when the caller dispatches them
//! concurrently; stale answers are discarded by the session.

pub mod analytics;
pub mod chat;
pub mod filters;
pub mod html;
pub mod layout;
pub mod nav;
pub mod page;
pub mod pagination;
pub mod recommendations;
pub mod strings;

use crate::backend::{Backend, ChatResponse};
use crate::error::ViewError;

pub use analytics::AnalyticsReport;
pub use chat::{ChatBubble, ChatOutcome, ChatSession, ChatState, ChatTicket};
pub use layout::Layout;
pub use page::Page;

/// A user or page-lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Page finished loading.
    Load,
    /// A `.nav-link` was clicked.
    NavClick { href: String },
    /// The update-analytics button was clicked.
    UpdateAnalytics,
    /// The chat submit button was clicked.
    ChatSubmit,
    /// A key was pressed in the chat input.
    ChatKeypress { key: String },
    /// The previous-page button was clicked.
    PrevPage,
    /// The next-page button was clicked.
    NextPage,
}

pub struct ViewController<B> {
    backend: B,
    page: Page,
    chat: ChatSession,
}

impl<B: Backend> ViewController<B> {
    pub fn new(backend: B, layout: &Layout, items_per_page: u32) -> Self {
        Self {
            backend,
            page: Page::from_layout(layout),
            chat: ChatSession::new(items_per_page),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Direct page access for input state: ticking filters, typing in the
    /// chat box.
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn session(&self) -> &ChatSession {
        &self.chat
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Dispatch one event. Events aimed at regions the page does not have
    /// are ignored.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Load => self.load(),
            Event::NavClick { href } => {
                nav::navigate(&mut self.page, &href);
            }
            Event::UpdateAnalytics => {
                if self.page.update_analytics_button {
                    self.update_analytics();
                }
            }
            Event::ChatSubmit => self.submit_chat(),
            Event::ChatKeypress { key } => {
                if key == "Enter" {
                    self.submit_chat();
                }
            }
            Event::PrevPage => {
                if self.page.pagination.is_some()
                    && let Some(target) = self.chat.prev_target()
                {
                    self.request_page(target);
                }
            }
            Event::NextPage => {
                if self.page.pagination.is_some()
                    && let Some(target) = self.chat.next_target()
                {
                    self.request_page(target);
                }
            }
        }
    }

    /// Initial load: a page with both filter groups fetches its filters and
    /// an unfiltered analytics view.
    pub fn load(&mut self) {
        if self.page.has_filters() {
            self.load_filters();
            self.update_analytics();
        }
    }

    // -----------------------------------------------------------------------
    // Dashboard
    // -----------------------------------------------------------------------

    /// Fetch filter options into the checkbox groups. On failure the groups
    /// are left as they were.
    pub fn load_filters(&mut self) {
        match self.backend.filters() {
            Ok(options) => {
                tracing::debug!(?options, "filters received");
                filters::populate(&mut self.page, &options);
            }
            Err(err) => tracing::error!(kind = err.kind(), error = %err, "error fetching filters"),
        }
    }

    /// Post the checked filters and render KPIs, charts and data preview.
    /// Returns `None` when the request itself failed.
    pub fn update_analytics(&mut self) -> Option<AnalyticsReport> {
        let query = filters::selected_query(&self.page);
        match self.backend.recommendations(&query) {
            Ok(response) => {
                tracing::debug!(
                    levels = ?query.levels_filter,
                    types = ?query.types_filter,
                    "analytics received"
                );
                Some(analytics::render(&mut self.page, &response))
            }
            Err(err) => {
                tracing::error!(kind = err.kind(), error = %err, "error fetching analytics");
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Chatbot
    // -----------------------------------------------------------------------

    /// Submit the chat input as a new question and apply the answer.
    pub fn submit_chat(&mut self) {
        if let Some(ticket) = self.begin_chat_query() {
            self.run_ticket(ticket);
        }
    }

    fn request_page(&mut self, target: u32) {
        if let Some(ticket) = self.begin_chat_page(target) {
            self.run_ticket(ticket);
        }
    }

    fn run_ticket(&mut self, ticket: ChatTicket) {
        let result = self.backend.chat(&ticket.request);
        self.complete_chat(&ticket, result);
    }

    /// First half of a submit: append the user bubble, clear the input and
    /// issue the request ticket. Blank input (or no chat panel) issues
    /// nothing.
    pub fn begin_chat_query(&mut self) -> Option<ChatTicket> {
        let panel = self.page.chat.as_mut()?;
        let ticket = self.chat.begin_query(&panel.input)?;
        panel.messages.push(ChatBubble::user(ticket.request.message.clone()));
        panel.input.clear();
        Some(ticket)
    }

    /// First half of a page change.
    pub fn begin_chat_page(&mut self, target: u32) -> Option<ChatTicket> {
        self.chat.begin_page(target)
    }

    /// Second half of any chat request: apply the result unless a newer
    /// request has been issued since.
    pub fn complete_chat(&mut self, ticket: &ChatTicket, result: Result<ChatResponse, ViewError>) {
        match self.chat.complete(ticket, result) {
            ChatOutcome::Answered {
                response,
                show_message,
            } => self.apply_chat_response(&response, show_message),
            ChatOutcome::Failed(err) => {
                tracing::error!(kind = err.kind(), error = %err, "error sending message");
                self.append_bot(strings::CHAT_APOLOGY);
            }
            ChatOutcome::Stale => {}
        }
    }

    fn apply_chat_response(&mut self, response: &ChatResponse, show_message: bool) {
        if show_message {
            self.append_bot(&response.message);
        }

        let html = if response.recommendations.is_empty() {
            html::paragraph(strings::NO_RECOMMENDATIONS)
        } else {
            recommendations::recommendations_html(&response.recommendations)
        };
        match self.page.recommendations_mut() {
            Ok(region) => region.html = html,
            Err(err) => tracing::error!(error = %err, "cannot render recommendations"),
        }

        match self.page.pagination_mut() {
            Ok(bar) => pagination::update(bar, response.total_pages, response.current_page),
            Err(err) => tracing::debug!(error = %err, "no pagination bar to update"),
        }
    }

    fn append_bot(&mut self, text: &str) {
        match self.page.chat_mut() {
            Ok(panel) => panel.messages.push(ChatBubble::bot(text)),
            Err(err) => tracing::error!(error = %err, "cannot append bot message"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
