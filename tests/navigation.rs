//! End-to-end coverage of the client's observable behavior, driven over the
//! in-memory transport: navigation, sorting, derived attributes, the title
//! sync, and the error route.

use jotter::app::App;
use jotter::controllers::{AppController, TitleSink};
use jotter::router::{Router, State};
use jotter::store::memory::MemTransport;
use jotter::store::Store;
use jotter::views::Viewport;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn notebook() -> MemTransport {
    MemTransport::new()
        .with_tag(json!({"id": "rust", "title": "Rust", "summary": "Systems *notes*",
                         "pages": ["hello", "traits"], "content": "c-rust"}))
        .with_tag(json!({"id": "unix", "title": "Unix", "pages": ["hello"]}))
        .with_tag(json!({"id": "misc", "title": "Misc", "pages": []}))
        .with_page(json!({"id": "hello", "title": "Hello", "date": "2013-05-01",
                          "tags": ["rust", "unix"], "content": "c-hello"}))
        .with_page(json!({"id": "traits", "title": "Traits", "date": "2014-02-01",
                          "tags": ["rust"]}))
        .with_content(json!({"id": "c-hello", "matter": "# Hello\n\n```rust\nfn x() {}\n```"}))
        .with_content(json!({"id": "c-rust", "matter": "All the Rust notes."}))
}

fn app(transport: MemTransport) -> App<MemTransport> {
    App::new(
        transport,
        "My Notebook",
        Box::new(jotter::controllers::NullTitle),
        Viewport::default(),
    )
}

#[test]
fn test_home_shows_newest_first_and_lightest_tag_first() {
    let mut app = app(notebook());
    app.goto("/");
    let out = app.show();

    // Pages descend by date.
    assert!(out.find("Traits").unwrap() < out.find("Hello").unwrap());
    // Tags ascend by weight: Misc (0) before Unix (1) before Rust (2).
    let misc = out.find("Misc").unwrap();
    let unix = out.find("Unix").unwrap();
    let rust = out.find("Rust").unwrap();
    assert!(misc < unix && unix < rust);
}

#[test]
fn test_page_view_renders_content_with_highlighting() {
    let mut app = app(notebook());
    app.goto("/hello");
    assert_eq!(app.state(), &State::Page("hello".into()));
    let out = app.show();
    assert!(out.contains("May 01 2013"));
    assert!(out.contains("<h1>Hello</h1>"));
    assert!(out.contains("<span")); // the tagged fence was highlighted
    assert!(out.contains("tagged: Rust, Unix"));
}

#[test]
fn test_tag_view_renders_preview_and_pages() {
    let mut app = app(notebook());
    app.goto("/tag/rust");
    assert_eq!(app.state(), &State::Tag("rust".into()));
    let out = app.show();
    assert!(out.contains("<em>notes</em>"));
    assert!(out.contains("Hello"));
    assert!(out.contains("Traits"));
}

#[test]
fn test_missing_tag_lands_on_error_whatever_was_active() {
    let mut app = app(notebook());
    for warmup in ["/", "/hello", "/tag/rust"] {
        app.goto(warmup);
        app.goto("/tag/missing-id");
        assert_eq!(app.state(), &State::Error, "after {}", warmup);
        assert!(app.show().contains("Sorry"));
    }
}

#[test]
fn test_error_is_navigable_away_from() {
    let mut app = app(notebook());
    app.goto("/sorry");
    assert_eq!(app.state(), &State::Error);
    app.goto("/tag/unix");
    assert_eq!(app.state(), &State::Tag("unix".into()));
}

#[test]
fn test_unreachable_api_always_errors() {
    let mut app = app(MemTransport::failing());
    app.goto("/hello");
    assert_eq!(app.state(), &State::Error);
    app.goto("/");
    assert_eq!(app.state(), &State::Error);
}

struct Recording(Arc<Mutex<Vec<String>>>);

impl TitleSink for Recording {
    fn set_title(&mut self, title: &str) {
        self.0.lock().unwrap().push(title.to_string());
    }
}

#[test]
fn test_title_follows_navigation() {
    let titles = Arc::new(Mutex::new(Vec::new()));
    let mut store = Store::new(notebook());
    let mut controller = AppController::new("My Notebook", Box::new(Recording(Arc::clone(&titles))));
    let mut router = Router::new();

    router.navigate("/", &mut store, &mut controller);
    router.navigate("/hello", &mut store, &mut controller);
    router.navigate("/tag/rust", &mut store, &mut controller);
    // The error route carries no title, so no update fires for it.
    router.navigate("/tag/missing-id", &mut store, &mut controller);

    assert_eq!(
        titles.lock().unwrap().as_slice(),
        [
            "My Notebook | My Notebook",
            "My Notebook | Hello",
            "My Notebook | Rust"
        ]
    );
}

#[test]
fn test_identity_map_survives_navigation() {
    let mut store = Store::new(notebook());
    let mut controller = AppController::new("My Notebook", Box::new(jotter::controllers::NullTitle));
    let mut router = Router::new();

    router.navigate("/hello", &mut store, &mut controller);
    let calls_after_first = store.transport().calls();
    router.navigate("/hello", &mut store, &mut controller);
    assert_eq!(store.transport().calls(), calls_after_first);
}

#[test]
fn test_weight_stable_across_merges() {
    let mut store = Store::new(notebook());
    let weight = store.tag("unix").unwrap().weight();
    assert_eq!(weight, 1);
    // A collection fetch merges into the cached instance; an unchanged
    // association set leaves the derived weight alone.
    store.tags().unwrap();
    assert_eq!(store.tag("unix").unwrap().weight(), 1);
}
