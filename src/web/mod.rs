//! Hosted UI for cobot.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - `GET /` — the analytics dashboard
//! - `GET /chatbot` — the chatbot page
//! - form posts that become view-controller events, answered with a
//!   `303 See Other` back to the page
//!
//! Pages are rendered server-side from per-session view controllers; the
//! backend is only ever called from here, never from the browser.
//!
//! Launched via `cobot serve` (default: `http://127.0.0.1:5002`).

mod frontend;
pub mod pages;
pub mod session;

use std::io::Cursor;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::backend::Backend;
use crate::view::Event;
use pages::{PageKind, render_document};
use session::{MAX_SESSIONS, SessionStore, set_cookie_value};

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the server on the given address.
///
/// Blocks the current thread. Handles requests sequentially; a failing
/// request gets a JSON 500 and the server keeps going.
pub fn serve<B: Backend + Clone>(addr: &str, app: &mut WebApp<B>, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    tracing::info!("cobot running at http://{addr}");

    if open && let Err(e) = open_browser(&format!("http://{addr}")) {
        tracing::warn!(error = %e, "could not open browser");
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();
        let cookie = header_value(&request, "Cookie");

        // Read body up-front for methods that carry one
        let body = if matches!(method, Method::Post) {
            let mut buf = String::new();
            match request.as_reader().read_to_string(&mut buf) {
                Ok(_) => Some(buf),
                Err(e) => {
                    tracing::warn!(%url, error = %e, "failed to read request body");
                    None
                }
            }
        } else {
            None
        };

        let reply = match app.dispatch(&method, &url, cookie.as_deref(), body.as_deref()) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(%method, %url, error = %e, "request failed");
                Reply::json(500, serde_json::json!({ "error": e.to_string() }).to_string())
            }
        };

        tracing::info!(%method, %url, status = reply.status, "request");
        if let Err(e) = request.respond(reply.into_response()) {
            tracing::warn!(%url, error = %e, "failed to send response");
        }
    }

    Ok(())
}

fn header_value(request: &tiny_http::Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

// ---------------------------------------------------------------------------
// Reply
// ---------------------------------------------------------------------------

/// Transport-independent response produced by [`WebApp::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
}

impl Reply {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body,
            location: None,
            set_cookie: None,
        }
    }

    fn json(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            body,
            location: None,
            set_cookie: None,
        }
    }

    fn see_other(location: String) -> Self {
        Self {
            status: 303,
            content_type: "text/plain; charset=utf-8",
            body: String::new(),
            location: Some(location),
            set_cookie: None,
        }
    }

    fn not_found() -> Self {
        Self::json(404, r#"{"error": "not found"}"#.to_string())
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body.into_bytes())
            .with_status_code(StatusCode(self.status));
        for (name, value) in [
            Some(("Content-Type", self.content_type.to_string())),
            self.location.map(|l| ("Location", l)),
            self.set_cookie.map(|c| ("Set-Cookie", c)),
        ]
        .into_iter()
        .flatten()
        {
            if let Ok(header) = Header::from_bytes(name, value.as_bytes()) {
                response.add_header(header);
            }
        }
        response
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Routes requests to per-session view controllers.
pub struct WebApp<B> {
    backend: B,
    items_per_page: u32,
    sessions: SessionStore<B>,
}

impl<B: Backend + Clone> WebApp<B> {
    pub fn new(backend: B, items_per_page: u32) -> Self {
        Self {
            backend,
            items_per_page,
            sessions: SessionStore::new(MAX_SESSIONS),
        }
    }

    pub fn sessions(&self) -> &SessionStore<B> {
        &self.sessions
    }

    /// Dispatch one request to the appropriate handler.
    pub fn dispatch(
        &mut self,
        method: &Method,
        url: &str,
        cookie: Option<&str>,
        body: Option<&str>,
    ) -> Result<Reply> {
        // Strip query string for path matching
        let path = url.split('?').next().unwrap_or(url);

        if matches!((method, path), (&Method::Get, "/healthz")) {
            return Ok(Reply::json(200, r#"{"status": "ok"}"#.to_string()));
        }

        let route = match (method, path) {
            (&Method::Get, "/") | (&Method::Get, "/index.html") => Route::ShowDashboard,
            (&Method::Get, "/chatbot") => Route::ShowChatbot,
            (&Method::Post, "/dashboard/nav") => Route::Nav,
            (&Method::Post, "/dashboard/analytics") => Route::Analytics,
            (&Method::Post, "/chatbot/message") => Route::Message,
            (&Method::Post, "/chatbot/prev") => Route::Prev,
            (&Method::Post, "/chatbot/next") => Route::Next,
            _ => return Ok(Reply::not_found()),
        };

        let form = if matches!(method, Method::Post) {
            Form::parse(body.context("missing request body")?)
        } else {
            Form::default()
        };

        let (id, created) = self
            .sessions
            .resolve(cookie, &self.backend, self.items_per_page);
        let session = self
            .sessions
            .get_mut(&id)
            .context("session vanished during request")?;

        let mut reply = match route {
            Route::ShowDashboard => {
                if !session.dashboard_loaded {
                    session.dashboard.handle(Event::Load);
                    session.dashboard_loaded = true;
                }
                Reply::html(render_document(PageKind::Dashboard, session.dashboard.page()))
            }
            Route::ShowChatbot => {
                Reply::html(render_document(PageKind::Chatbot, session.chatbot.page()))
            }
            Route::Nav => {
                let href = form.first("target").unwrap_or_default();
                session.dashboard.handle(Event::NavClick { href });
                let location = match &session.dashboard.page().scroll_target {
                    Some(target) => format!("{}#{target}", PageKind::Dashboard.path()),
                    None => PageKind::Dashboard.path().to_string(),
                };
                Reply::see_other(location)
            }
            Route::Analytics => {
                let page = session.dashboard.page_mut();
                page.clear_checked();
                for (group, value) in &form.pairs {
                    page.set_checked(group, value, true);
                }
                session.dashboard.handle(Event::UpdateAnalytics);
                Reply::see_other(PageKind::Dashboard.path().to_string())
            }
            Route::Message => {
                let message = form.first("message").unwrap_or_default();
                session.chatbot.page_mut().set_chat_input(&message);
                session.chatbot.handle(Event::ChatSubmit);
                Reply::see_other(PageKind::Chatbot.path().to_string())
            }
            Route::Prev => {
                session.chatbot.handle(Event::PrevPage);
                Reply::see_other(PageKind::Chatbot.path().to_string())
            }
            Route::Next => {
                session.chatbot.handle(Event::NextPage);
                Reply::see_other(PageKind::Chatbot.path().to_string())
            }
        };

        if created {
            reply.set_cookie = Some(set_cookie_value(&id));
        }
        Ok(reply)
    }
}

#[derive(Debug, Clone, Copy)]
enum Route {
    ShowDashboard,
    ShowChatbot,
    Nav,
    Analytics,
    Message,
    Prev,
    Next,
}

/// Decoded `application/x-www-form-urlencoded` body.
#[derive(Debug, Default)]
struct Form {
    pairs: Vec<(String, String)>,
}

impl Form {
    fn parse(body: &str) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(body.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    fn first(&self, name: &str) -> Option<String> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
