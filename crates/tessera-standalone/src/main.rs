//! Tessera standalone host: embeds plugin editors in native windows.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tessera_core::{Editor, EditorConfig, EditorLifecycle, HostStub, ParameterHost};
use tessera_gui::BaseviewBackend;
use tessera_standalone::{Harness, HostWindowConfig, host_window};

/// Open host windows and embed a plugin editor in each.
#[derive(Parser, Debug)]
#[command(name = "tessera-standalone")]
#[command(about = "Embed Tessera plugin editors in native host windows")]
#[command(version)]
struct Args {
    /// Number of host windows, each with its own editor
    #[arg(default_value_t = 1)]
    windows: usize,

    /// Editor config file (default: user config dir, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interval between idle ticks in milliseconds
    #[arg(long)]
    idle_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    // Route log:: output from baseview/egui into tracing.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    tracing_log::LogTracer::init().ok();

    let args = Args::parse();

    let mut config = EditorConfig::load_or_default(args.config.as_deref())
        .context("failed to load editor config")?;
    if let Some(idle_ms) = args.idle_ms {
        config.idle_interval_ms = idle_ms;
        config.validate().context("invalid --idle-ms")?;
    }

    tracing::info!(windows = args.windows, rect = %config.rect(), "starting Tessera host");

    let host: Arc<dyn ParameterHost> = Arc::new(HostStub::new());
    let backend = Arc::new(BaseviewBackend);
    let editor_config = config.clone();
    let mut harness = Harness::new(move || {
        Box::new(Editor::with_config(
            Arc::clone(&host),
            Arc::clone(&backend),
            editor_config.clone(),
        )) as Box<dyn EditorLifecycle>
    });

    let (events, event_rx) = crossbeam_channel::unbounded();
    let mut threads = Vec::with_capacity(args.windows);
    for id in 0..args.windows {
        let Some(rect) = harness.create_editor(id) else {
            continue;
        };
        let window = HostWindowConfig {
            id,
            title: format!("Tessera Host {}", id + 1),
            rect,
            scale: config.scale,
        };
        let thread = host_window::spawn(window, events.clone())
            .with_context(|| format!("failed to spawn host window {id}"))?;
        threads.push(thread);
    }
    drop(events);

    harness.run(event_rx, config.idle_interval());

    for thread in threads {
        if thread.join().is_err() {
            tracing::error!("host window thread panicked");
        }
    }

    tracing::info!("all editors closed");
    Ok(())
}
