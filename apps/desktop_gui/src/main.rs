mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::EmailTriageApp;

#[derive(Parser, Debug)]
#[command(name = "email-triage-gui")]
struct Args {
    #[arg(long)]
    service_url: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(service_url) = args.service_url {
        settings.service_url = service_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = Some(timeout_secs);
    }
    let service_url = settings.service_url.clone();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Email Processor")
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([760.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Email Processor",
        options,
        Box::new(move |_cc| Ok(Box::new(EmailTriageApp::new(cmd_tx, ui_rx, service_url)))),
    )
}
