//! # Routing
//!
//! A flat table of URL patterns and their transition handlers:
//!
//! | pattern      | state   | outlet |
//! |--------------|---------|--------|
//! | `/`          | `Home`  | tag    |
//! | `/sorry`     | `Error` | error  |
//! | `/tag/<id>`  | `Tag`   | tag    |
//! | `/<id>`      | `Page`  | page   |
//!
//! Each handler loads what its view needs and returns the next state; any
//! fetch failure — from any handler — lands the application in the error
//! state. The error state is not terminal: every later navigation works.

use crate::controllers::{AppController, Current};
use crate::error::Result;
use crate::store::{Store, Transport};
use tracing::warn;

/// A parsed URL path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Page(String),
    Tag(String),
    Error,
}

/// The application state the router settles in after a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Home,
    Page(String),
    Tag(String),
    Error,
}

/// The outlet a state activates in the application view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outlet {
    Tag,
    Page,
    Error,
}

impl State {
    pub fn outlet(&self) -> Outlet {
        match self {
            // Home shows the tag listing.
            State::Home | State::Tag(_) => Outlet::Tag,
            State::Page(_) => Outlet::Page,
            State::Error => Outlet::Error,
        }
    }
}

/// Parse a path into a route. Unrecognized shapes route to the error view.
pub fn parse_route(path: &str) -> Route {
    let trimmed = path.trim().trim_start_matches('/');
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => Route::Home,
        ["sorry"] => Route::Error,
        ["tag", id] => Route::Tag(id.to_string()),
        [id] => Route::Page(id.to_string()),
        _ => Route::Error,
    }
}

/// The route state machine. Starts at home, as the application does.
#[derive(Default)]
pub struct Router {
    state: State,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Navigate to a path: dispatch its route handler, then settle in the
    /// returned state — or in the error state if the handler's data load
    /// failed.
    pub fn navigate<T: Transport>(
        &mut self,
        path: &str,
        store: &mut Store<T>,
        app: &mut AppController,
    ) -> &State {
        let route = parse_route(path);
        let transition = match route {
            Route::Home => enter_home(store, app),
            Route::Page(id) => enter_page(&id, store, app),
            Route::Tag(id) => enter_tag(&id, store, app),
            Route::Error => enter_error(),
        };
        self.state = transition.unwrap_or_else(|e| {
            warn!(path, error = %e, "navigation failed");
            State::Error
        });
        &self.state
    }
}

fn enter_home<T: Transport>(store: &mut Store<T>, app: &mut AppController) -> Result<State> {
    // The home view shows the page tiles and the tag listing; load both
    // collections now so rendering cannot fail later.
    store.pages()?;
    store.tags()?;
    app.set_current(Current::Home {
        title: app.site_name().to_string(),
    });
    Ok(State::Home)
}

fn enter_page<T: Transport>(
    id: &str,
    store: &mut Store<T>,
    app: &mut AppController,
) -> Result<State> {
    let title = store.page(id)?.title().to_string();
    app.set_current(Current::Page {
        id: id.to_string(),
        title,
    });
    Ok(State::Page(id.to_string()))
}

fn enter_tag<T: Transport>(
    id: &str,
    store: &mut Store<T>,
    app: &mut AppController,
) -> Result<State> {
    let title = store.tag(id)?.title().to_string();
    app.set_current(Current::Tag {
        id: id.to_string(),
        title,
    });
    Ok(State::Tag(id.to_string()))
}

fn enter_error() -> Result<State> {
    Ok(State::Error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::NullTitle;
    use crate::store::memory::MemTransport;
    use serde_json::json;

    #[test]
    fn test_route_table() {
        assert_eq!(parse_route("/"), Route::Home);
        assert_eq!(parse_route(""), Route::Home);
        assert_eq!(parse_route("/sorry"), Route::Error);
        assert_eq!(parse_route("/tag/rust"), Route::Tag("rust".into()));
        assert_eq!(parse_route("/hello-world"), Route::Page("hello-world".into()));
        assert_eq!(parse_route("/a/b/c"), Route::Error);
        // "/tag/" has no id segment left after filtering, so it reads as
        // the single-segment page route for "tag".
        assert_eq!(parse_route("/tag/"), Route::Page("tag".into()));
    }

    fn fixture() -> (Store<MemTransport>, AppController) {
        let transport = MemTransport::new()
            .with_tag(json!({"id": "rust", "title": "Rust", "pages": ["p1"]}))
            .with_page(json!({"id": "p1", "title": "One", "date": "2013-05-01"}));
        let store = Store::new(transport);
        let app = AppController::new("My Notebook", Box::new(NullTitle));
        (store, app)
    }

    #[test]
    fn test_initial_state_is_home() {
        assert_eq!(Router::new().state(), &State::Home);
    }

    #[test]
    fn test_home_navigation() {
        let (mut store, mut app) = fixture();
        let mut router = Router::new();
        assert_eq!(router.navigate("/", &mut store, &mut app), &State::Home);
        assert_eq!(app.current().title(), Some("My Notebook"));
        assert_eq!(router.state().outlet(), Outlet::Tag);
    }

    #[test]
    fn test_page_navigation() {
        let (mut store, mut app) = fixture();
        let mut router = Router::new();
        router.navigate("/p1", &mut store, &mut app);
        assert_eq!(router.state(), &State::Page("p1".into()));
        assert_eq!(app.current().title(), Some("One"));
        assert_eq!(router.state().outlet(), Outlet::Page);
    }

    #[test]
    fn test_tag_navigation() {
        let (mut store, mut app) = fixture();
        let mut router = Router::new();
        router.navigate("/tag/rust", &mut store, &mut app);
        assert_eq!(router.state(), &State::Tag("rust".into()));
        assert_eq!(router.state().outlet(), Outlet::Tag);
    }

    #[test]
    fn test_missing_tag_routes_to_error() {
        let (mut store, mut app) = fixture();
        let mut router = Router::new();
        router.navigate("/p1", &mut store, &mut app);
        router.navigate("/tag/missing-id", &mut store, &mut app);
        assert_eq!(router.state(), &State::Error);
        assert_eq!(router.state().outlet(), Outlet::Error);
    }

    #[test]
    fn test_failed_fetch_routes_to_error_from_any_state() {
        let mut store = Store::new(MemTransport::failing());
        let mut app = AppController::new("My Notebook", Box::new(NullTitle));
        let mut router = Router::new();
        for path in ["/", "/p1", "/tag/rust"] {
            router.navigate(path, &mut store, &mut app);
            assert_eq!(router.state(), &State::Error, "path {}", path);
        }
    }

    #[test]
    fn test_error_state_is_not_terminal() {
        let (mut store, mut app) = fixture();
        let mut router = Router::new();
        router.navigate("/sorry", &mut store, &mut app);
        assert_eq!(router.state(), &State::Error);
        router.navigate("/", &mut store, &mut app);
        assert_eq!(router.state(), &State::Home);
    }

    #[test]
    fn test_error_route_loads_nothing() {
        let (mut store, mut app) = fixture();
        let mut router = Router::new();
        router.navigate("/sorry", &mut store, &mut app);
        assert_eq!(store.transport().calls(), 0);
    }
}
