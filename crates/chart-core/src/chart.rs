// File: crates/chart-core/src/chart.rs
// Summary: Per-chart context: query lifecycle, request tokens, resize handling and scene diffs.
// Notes:
// - Every path that changes what is on screen funnels through `rerender`.
// - Only the response for the most recent request token may touch state.

use std::time::{Duration, Instant};

use crate::error::{ChartError, FetchError};
use crate::geometry::Size;
use crate::pipeline::render_table;
use crate::query::{display_url, request_url, truncate_error, ChartHost, QueryRequest, QuerySource, RequestToken};
use crate::render::Renderer;
use crate::scene::{Scene, SceneChange};
use crate::series::ChartType;
use crate::table::Table;
use crate::theme::Theme;
use crate::types::{ChartOptions, HEIGHT, WIDTH};
use crate::view::{Dimensions, ResizeCoordinator};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ChartState {
    /// Nothing drawn (initial state, or an empty result set).
    #[default]
    Empty,
    /// A query was issued and its response has not been applied yet.
    Loading,
    Rendered,
    /// The last query failed; holds the truncated message shown to the user.
    Error(String),
}

/// Result of one render: what changed on the surface and what to tell the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOutcome {
    pub changes: Vec<SceneChange>,
    pub alert: Option<String>,
}

/// One chart instance. Instances share nothing.
pub struct ChartContext {
    renderer: Renderer,
    query: Option<String>,
    chart_type: ChartType,
    last_data: Option<Table>,
    dims: Dimensions,
    resize: ResizeCoordinator,
    state: ChartState,
    issued: u64,
    latest: Option<RequestToken>,
    scene: Scene,
}

impl Default for ChartContext {
    fn default() -> Self {
        Self::new(ChartOptions::default(), Theme::default(), Size::new(WIDTH, HEIGHT))
    }
}

impl ChartContext {
    pub fn new(options: ChartOptions, theme: Theme, container: Size) -> Self {
        let dims = Dimensions::from_container(container, &options);
        let resize = ResizeCoordinator::new(Duration::from_millis(options.resize_quiet_ms)).with_applied(container);
        let renderer = Renderer::new(options, theme);
        let scene = renderer.blank(&dims);
        Self {
            renderer,
            query: None,
            chart_type: ChartType::default(),
            last_data: None,
            dims,
            resize,
            state: ChartState::Empty,
            issued: 0,
            latest: None,
            scene,
        }
    }

    /// Issue a query: returns the URL to fetch, tagged with a fresh token.
    pub fn chart_query(&mut self, query: &str, chart_type: ChartType) -> QueryRequest {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.latest = Some(token);
        self.query = Some(query.to_string());
        self.chart_type = chart_type;
        self.state = ChartState::Loading;

        let opts = &self.renderer.options;
        let url = request_url(&opts.endpoint, query);
        let display = display_url(&url, opts.url_display_chars);
        tracing::debug!(%token, %url, "query issued");
        QueryRequest { token, url, display }
    }

    /// Apply the response for `token`. Stale tokens are dropped and yield `None`.
    pub fn complete(&mut self, token: RequestToken, result: Result<String, FetchError>) -> Option<RenderOutcome> {
        if self.latest != Some(token) {
            tracing::debug!(%token, latest = ?self.latest.map(RequestToken::get), "dropping stale response");
            return None;
        }
        let outcome = match result.map_err(ChartError::from).and_then(|body| Table::from_tsv(&body)) {
            Ok(table) => {
                tracing::debug!(%token, rows = table.len(), columns = table.columns().len(), "response received");
                self.last_data = Some(table);
                self.rerender()
            }
            Err(err) => {
                self.last_data = None;
                self.fail(err)
            }
        };
        Some(outcome)
    }

    /// Issue `query`, fetch it from `source` and present the outcome on `host`.
    pub fn run_query<S, H>(&mut self, source: &mut S, host: &mut H, query: &str, chart_type: ChartType) -> RenderOutcome
    where
        S: QuerySource + ?Sized,
        H: ChartHost + ?Sized,
    {
        let request = self.chart_query(query, chart_type);
        host.show_request_link(&request.url, &request.display);
        let result = source.fetch(&request.url);
        let outcome = self.complete(request.token, result).unwrap_or_default();
        self.deliver(host, &outcome);
        outcome
    }

    /// Container changed size: recompute dimensions and redraw the last data.
    pub fn on_viewport_change(&mut self, container: Size) -> RenderOutcome {
        self.dims = Dimensions::from_container(container, &self.renderer.options);
        self.rerender()
    }

    /// Record a viewport change; it is applied by `poll_resize` once things settle.
    pub fn request_resize(&mut self, container: Size, now: Instant) {
        self.resize.request(container, now);
    }

    pub fn poll_resize(&mut self, now: Instant) -> Option<RenderOutcome> {
        let size = self.resize.poll(now)?;
        Some(self.on_viewport_change(size))
    }

    /// Apply a pending viewport change right away.
    pub fn flush_resize(&mut self) -> Option<RenderOutcome> {
        let size = self.resize.flush()?;
        Some(self.on_viewport_change(size))
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) -> RenderOutcome {
        self.chart_type = chart_type;
        self.rerender()
    }

    /// Push an outcome to a host: alert first, then the new scene.
    pub fn deliver<H: ChartHost + ?Sized>(&self, host: &mut H, outcome: &RenderOutcome) {
        if let Some(message) = &outcome.alert {
            host.alert(message);
        }
        host.present(&self.scene, &outcome.changes);
    }

    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn state(&self) -> &ChartState { &self.state }
    pub fn dimensions(&self) -> &Dimensions { &self.dims }
    pub fn chart_type(&self) -> ChartType { self.chart_type }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn last_data(&self) -> Option<&Table> { self.last_data.as_ref() }
    pub fn options(&self) -> &ChartOptions { &self.renderer.options }

    fn rerender(&mut self) -> RenderOutcome {
        match render_table(self.last_data.as_ref(), self.chart_type, &self.dims, &self.renderer) {
            Ok(scene) => {
                if !scene.is_blank() {
                    self.state = ChartState::Rendered;
                } else if !matches!(self.state, ChartState::Error(_)) {
                    self.state = ChartState::Empty;
                }
                RenderOutcome { changes: self.replace_scene(scene), alert: None }
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: ChartError) -> RenderOutcome {
        tracing::warn!(error = %err, "chart query failed");
        let message = truncate_error(&err.to_string(), self.renderer.options.error_display_chars);
        self.state = ChartState::Error(message.clone());
        let blank = self.renderer.blank(&self.dims);
        RenderOutcome { changes: self.replace_scene(blank), alert: Some(message) }
    }

    fn replace_scene(&mut self, scene: Scene) -> Vec<SceneChange> {
        let changes = scene.diff(&self.scene);
        self.scene = scene;
        changes
    }
}
