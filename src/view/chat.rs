//! Chatbot session state.
//!
//! [`ChatSession`] owns the pagination state and the request sequence. Every
//! request is issued as a [`ChatTicket`] carrying a monotonically increasing
//! sequence number; completing a ticket that is no longer the newest one is
//! reported as [`ChatOutcome::Stale`] and must not touch the page. This keeps
//! overlapping requests (rapid pagination clicks, a new query while a page is
//! loading) from rendering out of order.

use super::html::escape;
use crate::backend::{ChatRequest, ChatResponse};
use crate::error::ViewError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    User,
    Bot,
}

impl BubbleKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::User => "user-message",
            Self::Bot => "bot-message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatBubble {
    pub kind: BubbleKind,
    pub text: String,
}

impl ChatBubble {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            kind: BubbleKind::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            kind: BubbleKind::Bot,
            text: text.into(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"message {}\">{}</div>",
            self.kind.css_class(),
            escape(&self.text)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingResponse { seq: u64 },
}

/// Why a chat request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketKind {
    /// A freshly submitted question; its answer gets a bot bubble.
    Query,
    /// Another page of the last question's results.
    Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTicket {
    pub seq: u64,
    pub kind: TicketKind,
    pub request: ChatRequest,
}

#[derive(Debug)]
pub enum ChatOutcome {
    /// The newest request succeeded.
    Answered {
        response: ChatResponse,
        /// Append the bot's message as a new bubble.
        show_message: bool,
    },
    /// The newest request failed.
    Failed(ViewError),
    /// A newer request was issued after this one; ignore it.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    current_page: u32,
    total_pages: u32,
    last_query: String,
    items_per_page: u32,
    state: ChatState,
    next_seq: u64,
}

impl ChatSession {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            last_query: String::new(),
            items_per_page: items_per_page.max(1),
            state: ChatState::Idle,
            next_seq: 1,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// Start a new question. Blank input issues nothing.
    pub fn begin_query(&mut self, input: &str) -> Option<ChatTicket> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        self.last_query = message.to_string();
        Some(self.issue(TicketKind::Query, 1))
    }

    /// Request another page of the last question. Targets outside
    /// `[1, total_pages]` issue nothing.
    pub fn begin_page(&mut self, target: u32) -> Option<ChatTicket> {
        if target < 1 || target > self.total_pages {
            return None;
        }
        Some(self.issue(TicketKind::Pagination, target))
    }

    pub fn prev_target(&self) -> Option<u32> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }

    pub fn next_target(&self) -> Option<u32> {
        (self.current_page < self.total_pages).then(|| self.current_page + 1)
    }

    fn issue(&mut self, kind: TicketKind, page: u32) -> ChatTicket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.state = ChatState::AwaitingResponse { seq };
        ChatTicket {
            seq,
            kind,
            request: ChatRequest {
                message: self.last_query.clone(),
                page,
                items_per_page: self.items_per_page,
            },
        }
    }

    /// Settle a ticket with the backend's result.
    pub fn complete(
        &mut self,
        ticket: &ChatTicket,
        result: Result<ChatResponse, ViewError>,
    ) -> ChatOutcome {
        if self.state != (ChatState::AwaitingResponse { seq: ticket.seq }) {
            tracing::debug!(seq = ticket.seq, state = ?self.state, "discarding stale chat response");
            return ChatOutcome::Stale;
        }
        self.state = ChatState::Idle;

        match result {
            Ok(mut response) => {
                // current_page stays within [1, max(total_pages, 1)].
                response.current_page =
                    response.current_page.clamp(1, response.total_pages.max(1));
                self.current_page = response.current_page;
                self.total_pages = response.total_pages;
                ChatOutcome::Answered {
                    show_message: ticket.kind == TicketKind::Query,
                    response,
                }
            }
            Err(err) => ChatOutcome::Failed(err),
        }
    }
}
