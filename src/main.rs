// Main entry point - wiring of the poll loops and the command console
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use crate::application::gateway::RoverGateway;
use crate::application::input_reducer::{GamepadReducer, InputSource};
use crate::application::monitor::StatusMonitor;
use crate::application::plot::PolarPlot;
use crate::domain::instruction::Instruction;
use crate::infrastructure::config::load_console_config;
use crate::infrastructure::gamepad::GilrsSource;
use crate::infrastructure::http_gateway::HttpRoverGateway;
use crate::presentation::command::{self, ConsoleCommand};
use crate::presentation::{monitor_view, svg_map};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_console_config()?;
    let reducer_settings = config.input.reducer_settings()?;
    let snapshot_dir = PathBuf::from(&config.map.snapshot_dir);

    // Gateway (infrastructure layer)
    let gateway: Arc<dyn RoverGateway> = Arc::new(HttpRoverGateway::new(&config.backend.base_url));

    // Shared view models
    let plot = Arc::new(Mutex::new(PolarPlot::new(config.map.plot_settings())));
    let monitor = Arc::new(Mutex::new(StatusMonitor::default()));

    tracing::info!(backend = %config.backend.base_url, "starting rover console");

    // The gilrs context stays on one dedicated thread; emitted instructions
    // cross into the async world over a channel.
    let (instruction_tx, mut instruction_rx) = mpsc::unbounded_channel::<Instruction>();
    let input_alive = Arc::new(AtomicBool::new(true));
    let input_thread = {
        let alive = input_alive.clone();
        let interval = config.input.poll_interval();
        std::thread::spawn(move || {
            let mut source = match GilrsSource::new() {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!(error = %e, "gamepad backend unavailable, input disabled");
                    return;
                }
            };
            let mut reducer = GamepadReducer::new(reducer_settings);
            while alive.load(Ordering::Relaxed) {
                for instruction in reducer.tick(source.snapshot()) {
                    if instruction_tx.send(instruction).is_err() {
                        return;
                    }
                }
                std::thread::sleep(interval);
            }
        })
    };

    // Forward reduced instructions to the backend, one send per edge. A
    // failed send is logged and never retried.
    let instruction_task = tokio::spawn({
        let gateway = gateway.clone();
        async move {
            while let Some(instruction) = instruction_rx.recv().await {
                if let Err(e) = gateway.send_instruction(instruction).await {
                    tracing::warn!(%instruction, error = %e, "failed to send instruction");
                }
            }
        }
    });

    // Mapping poll loop. The request is awaited before the next tick and
    // missed ticks are skipped, so requests never overlap.
    let mapping_task = tokio::spawn({
        let gateway = gateway.clone();
        let plot = plot.clone();
        let mut ticker = tokio::time::interval(config.map.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        async move {
            loop {
                ticker.tick().await;
                let mut samples = gateway.mapping_values().await;
                if samples.is_empty() {
                    // Bulk endpoint empty: at least keep the newest reading.
                    samples.extend(gateway.latest_mapping_value().await);
                }
                if !samples.is_empty() {
                    plot.lock().expect("plot lock").enqueue(samples);
                }
            }
        }
    });

    // Flush loop, decoupled from the mapping poll rate.
    let flush_task = tokio::spawn({
        let plot = plot.clone();
        let mut ticker = tokio::time::interval(config.map.flush_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        async move {
            loop {
                ticker.tick().await;
                let mut plot = plot.lock().expect("plot lock");
                let flushed = plot.flush();
                if flushed > 0 {
                    tracing::trace!(flushed, live = plot.point_count(), "plotted mapping samples");
                }
            }
        }
    });

    // Status poll loop: battery level and monitor messages.
    let status_task = tokio::spawn({
        let gateway = gateway.clone();
        let monitor = monitor.clone();
        let mut ticker = tokio::time::interval(config.status.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        async move {
            loop {
                ticker.tick().await;
                let battery = gateway.latest_battery().await;
                let message = gateway.latest_message().await;

                let mut monitor = monitor.lock().expect("monitor lock");
                monitor.observe_battery(battery);
                if monitor.observe_message(message) {
                    if let Some(latest) = monitor.latest() {
                        tracing::info!("{}", monitor_view::format_message(latest));
                    }
                }
            }
        }
    });

    // Console command loop on stdin.
    let command_loop = run_command_loop(gateway.clone(), plot.clone(), monitor.clone(), snapshot_dir);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down");
        }
        result = command_loop => {
            if let Err(e) = result {
                tracing::error!(error = %e, "command loop failed");
            }
        }
    }

    // Teardown: stop the timers and discard anything in flight.
    instruction_task.abort();
    mapping_task.abort();
    flush_task.abort();
    status_task.abort();
    input_alive.store(false, Ordering::Relaxed);
    let _ = input_thread.join();

    Ok(())
}

async fn run_command_loop(
    gateway: Arc<dyn RoverGateway>,
    plot: Arc<Mutex<PolarPlot>>,
    monitor: Arc<Mutex<StatusMonitor>>,
    snapshot_dir: PathBuf,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match command::parse(&line) {
            Ok(command) => command,
            Err(command::CommandError::Empty) => continue,
            Err(e) => {
                tracing::warn!("{e}");
                continue;
            }
        };

        match command {
            ConsoleCommand::Pause => {
                plot.lock().expect("plot lock").set_paused(true);
                send_logged(&gateway, Instruction::Pause).await;
            }
            ConsoleCommand::Resume => {
                plot.lock().expect("plot lock").set_paused(false);
                send_logged(&gateway, Instruction::Play).await;
            }
            ConsoleCommand::ResetMap => {
                plot.lock().expect("plot lock").reset();
                tracing::info!("map cleared");
            }
            ConsoleCommand::Snapshot => {
                let snapshot = plot.lock().expect("plot lock").snapshot();
                match svg_map::write_snapshot(&snapshot, &snapshot_dir) {
                    Ok(path) => tracing::info!(path = %path.display(), "map snapshot written"),
                    Err(e) => tracing::warn!(error = %e, "snapshot failed"),
                }
            }
            ConsoleCommand::Status => {
                let monitor = monitor.lock().expect("monitor lock");
                println!("{}", monitor_view::format_battery(monitor.battery_level()));
                for message in monitor.messages() {
                    println!("{}", monitor_view::format_message(message));
                }
            }
            ConsoleCommand::Send(instruction) => {
                send_logged(&gateway, instruction).await;
            }
            ConsoleCommand::Quit => break,
        }
    }

    Ok(())
}

async fn send_logged(gateway: &Arc<dyn RoverGateway>, instruction: Instruction) {
    if let Err(e) = gateway.send_instruction(instruction).await {
        tracing::warn!(%instruction, error = %e, "failed to send instruction");
    }
}
