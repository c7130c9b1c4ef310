mod catalog;
mod credentials;
mod db;
mod ipc;
mod plan;
mod session;
mod student;

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use credentials::CredentialTable;
use session::{Content, Controller};

/// Session and lesson-flow sidecar for the YATIÑA-IA desktop shell.
/// Speaks newline-delimited JSON on stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "yatinad", version, about, long_about = None)]
struct Args {
    /// Open this workspace at startup instead of waiting for workspace.select
    #[arg(long)]
    workspace: Option<PathBuf>,

    /// Credential table to use instead of the bundled one
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    // stdout carries the protocol; logs go to stderr.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false),
        )
        .init();

    let mut state = match build_state(&args) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("startup failed: {e:#}");
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                tracing::warn!(error = %e, "unparseable request line");
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    tracing::info!("stdin closed, exiting");
}

fn build_state(args: &Args) -> anyhow::Result<ipc::AppState> {
    let credentials = match args.credentials.as_deref() {
        Some(path) => CredentialTable::load(path)
            .map_err(|e| e.context(format!("loading credentials from {}", path.display())))?,
        None => CredentialTable::bundled()?,
    };
    tracing::info!(
        teachers = credentials.teachers().len(),
        students = credentials.students().len(),
        "credential table loaded"
    );

    let controller = Controller::new(credentials, Content::bundled()?);
    let mut state = ipc::AppState::new(controller);
    if let Some(path) = args.workspace.as_deref() {
        ipc::open_workspace(&mut state, path)?;
    }
    Ok(state)
}
