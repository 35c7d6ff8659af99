//! cobot: presentation layer for the training-recommendation dashboard and
//! chatbot.
//!
//! The crate talks to an external recommendation backend over HTTP and turns
//! its JSON into page state: filter checkboxes, KPIs, Plotly charts, a data
//! preview table, recommendation cards and a paginated chat. The
//! [`view::ViewController`] is headless; [`web`] hosts it behind a small HTTP
//! server and the binary adds a terminal client.

pub mod backend;
pub mod config;
pub mod error;
pub mod logging;
pub mod view;
pub mod web;
