//! # Jotter Architecture
//!
//! Jotter is a **UI-agnostic client library** for a personal notebook
//! served over a REST API, with a thin CLI binary on top. The binary is the
//! only place that knows about stdout/stderr/exit codes; everything from
//! the app context inward takes regular arguments and returns regular
//! `Result` types.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, prints views, sets the terminal title  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  App Layer (app.rs, router.rs, controllers.rs, views.rs)    │
//! │  - Explicit application context, no globals                 │
//! │  - Flat route table; any fetch failure → the error view     │
//! │  - Sorted listings, navigation context, title sync          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Data Layer (store/, model.rs, reactive.rs, render.rs)      │
//! │  - Transport trait: HttpTransport (prod), MemTransport      │
//! │    (tests/offline)                                          │
//! │  - Identity-mapped record cache, lazy relationships         │
//! │  - Versioned source fields driving derived attributes       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read-Only by Design
//!
//! The notebook is written elsewhere; this client only reads. There is no
//! create/update/delete path, no retry policy, and no cache eviction:
//! records live for the process, and a failed fetch is answered by the
//! error view, not a retry loop.
//!
//! ## Module Overview
//!
//! - [`app`]: The application context, constructed once in `main`
//! - [`router`]: URL patterns, transitions, and the four states
//! - [`controllers`]: Sorted listings, the current context, title sync
//! - [`views`]: The four view renderers (home, tag, page, error)
//! - [`store`]: Transport abstraction and the identity-mapped cache
//! - [`model`]: Record types (`Tag`, `Page`, `Content`) and their derived
//!   attributes
//! - [`reactive`]: Versioned sources and derived caches
//! - [`render`]: Markdown to HTML, with fenced-code highlighting
//! - [`tiles`]: The home view's page tile board
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod app;
pub mod config;
pub mod controllers;
pub mod error;
pub mod model;
pub mod reactive;
pub mod render;
pub mod router;
pub mod store;
pub mod tiles;
pub mod views;
