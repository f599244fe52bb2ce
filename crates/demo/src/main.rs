// File: crates/demo/src/main.rs
// Summary: CLI that runs a query (or loads a TSV file), renders the chart and writes PNG/SVG.

mod cli;
mod fetch;

use anyhow::{bail, Context, Result};
use clap::Parser;
use querychart_core::{theme, ChartContext, ChartHost, ChartOptions, QuerySource, Scene, SceneChange, Size};
use querychart_render_skia::SkiaRenderer;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::fetch::{FileSource, HttpSource};

/// Prints the request link and alerts to the terminal.
#[derive(Default)]
struct ConsoleHost {
    alert: Option<String>,
}

impl ChartHost for ConsoleHost {
    fn show_request_link(&mut self, href: &str, text: &str) {
        println!("Query: {text}");
        tracing::debug!(%href, "request");
    }

    fn alert(&mut self, message: &str) {
        eprintln!("error: {message}");
        self.alert = Some(message.to_string());
    }

    fn present(&mut self, scene: &Scene, changes: &[SceneChange]) {
        tracing::info!(changes = changes.len(), nodes = scene.node_count(), "scene updated");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = ChartOptions { endpoint: cli.endpoint.clone(), ..ChartOptions::default() };
    let mut ctx = ChartContext::new(options, theme::find(&cli.theme), Size::new(cli.width, cli.height));
    let mut host = ConsoleHost::default();

    let mut source: Box<dyn QuerySource> = match &cli.input {
        Some(path) => Box::new(FileSource::new(path.clone())),
        None => Box::new(HttpSource::new()),
    };
    let query = match (&cli.query, &cli.input) {
        (Some(q), _) => q.clone(),
        (None, Some(path)) => path.display().to_string(),
        (None, None) => bail!("either --query or --input is required"),
    };
    ctx.run_query(source.as_mut(), &mut host, &query, cli.chart_type);

    for size in &cli.resize {
        ctx.request_resize(*size, std::time::Instant::now());
        if let Some(outcome) = ctx.flush_resize() {
            ctx.deliver(&mut host, &outcome);
        }
    }

    write_scene(ctx.scene(), &cli.out).with_context(|| format!("failed to write '{}'", cli.out.display()))?;
    println!("Wrote {}", cli.out.display());

    if let Some(message) = host.alert {
        bail!("chart could not be drawn: {message}");
    }
    Ok(())
}

fn write_scene(scene: &Scene, out: &std::path::Path) -> Result<()> {
    let is_svg = out.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(out, scene.to_svg())?;
    } else {
        SkiaRenderer::new().render_to_png(scene, out)?;
    }
    Ok(())
}
