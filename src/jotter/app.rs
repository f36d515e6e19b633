//! The application context.
//!
//! One `App` value owns the store, the controller, and the router, and is
//! constructed once at startup and passed around explicitly. Nothing in the
//! crate reaches for a global.

use crate::config::JotterConfig;
use crate::controllers::{AppController, TitleSink};
use crate::error::Result;
use crate::router::{Router, State};
use crate::store::http::HttpTransport;
use crate::store::{Store, Transport};
use crate::views::{self, Viewport};
use tracing::warn;

pub struct App<T: Transport> {
    store: Store<T>,
    controller: AppController,
    router: Router,
    viewport: Viewport,
}

impl<T: Transport> App<T> {
    pub fn new(
        transport: T,
        site_name: impl Into<String>,
        sink: Box<dyn TitleSink>,
        viewport: Viewport,
    ) -> Self {
        Self {
            store: Store::new(transport),
            controller: AppController::new(site_name, sink),
            router: Router::new(),
            viewport,
        }
    }

    pub fn state(&self) -> &State {
        self.router.state()
    }

    /// Navigate to a path and return the state the router settled in.
    pub fn goto(&mut self, path: &str) -> &State {
        self.router
            .navigate(path, &mut self.store, &mut self.controller)
    }

    /// Render the current state's view.
    ///
    /// A fetch failing during view rendering (a relationship resolved
    /// lazily, a content body) sends the application to the error state and
    /// renders that instead, the same as a failure during navigation.
    pub fn show(&mut self) -> String {
        let rendered = views::render(
            self.router.state(),
            &mut self.store,
            &self.controller,
            self.viewport,
        );
        match rendered {
            Ok(out) => out,
            Err(e) => {
                warn!(error = %e, "view render failed");
                self.goto("/sorry");
                self.show()
            }
        }
    }
}

/// Wire an [`App`] to the real content API described by the config.
pub fn connect(
    config: &JotterConfig,
    sink: Box<dyn TitleSink>,
    viewport: Viewport,
) -> Result<App<HttpTransport>> {
    let transport = HttpTransport::new(&config.api_url, config.timeout())?;
    Ok(App::new(transport, config.site_name.clone(), sink, viewport))
}
