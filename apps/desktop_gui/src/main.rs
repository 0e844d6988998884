use std::sync::Arc;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::HttpCompanyDirectory;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::domain::{ContextId, UserRole};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{CateringDirectoryApp, StartupConfig};

const WINDOW_TITLE: &str = "Catering Companies";

#[derive(Parser, Debug)]
#[command(about = "Browse catering supplier companies")]
struct Args {
    /// Backend base URL, e.g. http://127.0.0.1:8000
    #[arg(long)]
    backend_url: Option<String>,
    /// Organization the directory is opened for
    #[arg(long)]
    organization_id: Option<String>,
    #[arg(long)]
    user_role: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = config::load_settings()?;

    let backend_url = args.backend_url.unwrap_or(settings.backend_url);
    if backend_url.is_empty() {
        tracing::warn!("no backend url configured; company loads will fail");
    }
    let organization_id = args
        .organization_id
        .or(settings.organization_id)
        .context("organization id is required (--organization-id or CATERING_ORGANIZATION_ID)")?;
    let startup = StartupConfig {
        backend_url: backend_url.clone(),
        organization_id: ContextId::new(organization_id),
        user_role: args.user_role.or(settings.user_role).map(UserRole::new),
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(
        cmd_rx,
        ui_tx,
        Arc::new(HttpCompanyDirectory::new(backend_url)),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(CateringDirectoryApp::new(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
