//! # homedeckd — homedeck daemon
//!
//! Composition root that wires the appliance panel together and runs it.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) — malformed configuration
//!   is fatal, there is no recovery path
//! - Initialize tracing
//! - Construct the event bus and the panel runtime (command loop + timers)
//! - Attach the console adapter (event renderer, optional stdin input)
//! - Handle graceful shutdown (SIGINT / `quit`), cancelling every periodic
//!   timer before exit
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use homedeck_app::event_bus::InProcessEventBus;
use homedeck_app::panel::Command;
use homedeck_app::ports::SystemClock;
use homedeck_app::runtime;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    let bus = Arc::new(InProcessEventBus::new(config.events.capacity));
    let shutdown = CancellationToken::new();

    let (handle, core_tasks) = runtime::spawn(Arc::clone(&bus), SystemClock, shutdown.clone());

    let renderer = tokio::spawn(homedeck_adapter_console::run_renderer(
        bus.subscribe(),
        shutdown.clone(),
    ));
    if config.console.input_enabled {
        // Not joined on shutdown: a pending blocking stdin read would hold
        // the process open. The task exits on its own once the token is
        // cancelled or the operator types `quit`.
        tokio::spawn(homedeck_adapter_console::run_input(
            handle.clone(),
            shutdown.clone(),
        ));
    }

    info!("Appliance Control System initialized successfully");
    handle.send(Command::Report).await;

    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        () = shutdown.cancelled() => {}
    }

    shutdown.cancel();
    for task in core_tasks {
        task.await?;
    }
    renderer.await?;

    info!("System shutdown complete");
    Ok(())
}
