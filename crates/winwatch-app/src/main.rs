use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use crossterm::style::{Stylize, style};
use tracing_subscriber::EnvFilter;
use winwatch_capture::{XcapCapture, XcapCatalog};
use winwatch_config::Config;
use winwatch_core::{MonitorEngine, MonitorError, PauseControl, WindowCatalog};
use winwatch_types::{MonitorMode, StopReason, WindowHandle};

use crate::cli::Cli;
use crate::controller::{AppController, SessionTiming, interruptible};
use crate::output::{FolderSink, create_screenshot_folder};
use crate::prompt::{Prompter, RULE};

mod alert;
mod cli;
mod controller;
mod keyboard;
mod output;
mod profile;
mod prompt;
mod status;

#[cfg(test)]
mod tests;

fn main() -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", style(format!("Failed to start runtime: {e}")).red());
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(start());
    // An interrupted menu leaves a stdin read parked on the blocking pool
    runtime.shutdown_background();
    code
}

async fn start() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match profile::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", style(format!("{e:#}")).red());
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut config);
    init_tracing(&config);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = match e.downcast_ref::<MonitorError>() {
                Some(monitor_error) => monitor_error.exit_code(),
                None => 1,
            };
            eprintln!("{}", style(format!("{e:#}")).red());
            ExitCode::from(code)
        }
    }
}

fn init_tracing(config: &Config) {
    // stderr keeps logs off the status line
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .init();
}

async fn run(config: Config) -> anyhow::Result<()> {
    print_banner();

    let catalog = Arc::new(XcapCatalog::new());
    let setup = {
        let catalog = catalog.clone();
        interruptible(move || choose_session(&catalog), interrupt()).await?
    };
    let Some(setup) = setup else {
        println!();
        println!("{}", style("Monitoring stopped by user.").yellow());
        return Ok(());
    };
    let Some((mode, window)) = setup? else {
        println!("{}", style("Exiting...").yellow());
        return Ok(());
    };

    if !catalog.exists(window.id) {
        println!(
            "{}",
            style("Window closed or no longer available. Stopping monitoring.").red()
        );
        return Ok(());
    }

    let pause = Arc::new(PauseControl::new());
    let engine = build_engine(&config, mode.clone(), window.clone(), catalog, pause.clone())?;

    print_session(&mode, &window);
    tracing::info!("starting session for window {} ({})", window.id, window.owner_name);

    let timing = SessionTiming {
        interval: config.monitor.interval(),
        keyboard_poll: config.monitor.keyboard_poll(),
        listen_keys: true,
    };
    let (reason, stats) = AppController::new(pause)
        .run(engine, timing, io::stdout(), interrupt())
        .await?;

    tracing::info!("stopped: {:?}", reason);
    if reason == StopReason::UserRequested && stats.ticks > 0 {
        println!("{} scans, {} alerts", stats.ticks, stats.alerts);
    }
    Ok(())
}

/// Resolves on the OS interrupt; never resolves if it cannot be watched
async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
}

fn choose_session(
    catalog: &XcapCatalog,
) -> Result<Option<(MonitorMode, WindowHandle)>, MonitorError> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let Some(mode) = prompter.choose_mode()? else {
        return Ok(None);
    };

    let windows = catalog.list_windows();
    Ok(prompter.choose_window(&windows)?.map(|window| (mode, window)))
}

fn build_engine(
    config: &Config,
    mode: MonitorMode,
    window: WindowHandle,
    catalog: Arc<XcapCatalog>,
    pause: Arc<PauseControl>,
) -> anyhow::Result<MonitorEngine> {
    let capture = Box::new(XcapCapture::new());

    let engine = match mode {
        MonitorMode::SavePictures => {
            let root = config
                .save
                .output_dir
                .clone()
                .unwrap_or_else(profile::desktop_dir);
            let folder =
                create_screenshot_folder(&root, &config.save.folder_prefix, chrono::Local::now())?;
            println!(
                "{} {}",
                style("Screenshots folder:").green(),
                folder.display()
            );

            MonitorEngine::save_pictures(
                window,
                catalog,
                capture,
                Box::new(FolderSink::new(folder)),
                pause,
            )
        }
        MonitorMode::ScanOcr(target) => {
            let recognizer = winwatch_capture::platform_recognizer(
                &config.ocr.language,
                &config.ocr.tesseract_bin,
            )?;

            MonitorEngine::scan_ocr(
                window,
                target,
                catalog,
                capture,
                recognizer,
                alert::from_config(config.alert.bell),
                pause,
            )
        }
    };
    Ok(engine)
}

fn print_banner() {
    println!("{}", style(RULE).cyan());
    println!("{}", style("Window Monitor").green().bold());
    println!("{}", style(RULE).cyan());
}

fn print_session(mode: &MonitorMode, window: &WindowHandle) {
    println!();
    println!(
        "{} {} - {}",
        style("Monitoring:").green(),
        style(&window.owner_name).blue(),
        window.title
    );
    match mode {
        MonitorMode::SavePictures => println!("{}", style("Mode: Save Pictures").cyan()),
        MonitorMode::ScanOcr(target) => println!(
            "{} {}",
            style("Mode: Scan for OCR -").cyan(),
            target.description()
        ),
    }
    println!(
        "{}",
        style("Press SPACE to pause/resume, Ctrl+C to stop").yellow()
    );
    println!("{}", style(RULE).cyan());
}
