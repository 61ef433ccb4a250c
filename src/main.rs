//! GridWatch CLI - Batch Job Completion Notifier
//!
//! Submits Grid Engine jobs, detaches into the background, waits for
//! every job to leave the queue, and sends a push notification.

use clap::Parser;
use gridwatch::config::{CliArgs, NotifyConfig, WatchConfig};
use gridwatch::core::{
    format_elapsed, now_epoch_secs, CompletionMonitor, MonitorOutcome, PendingSet,
};
use gridwatch::error::{GridWatchError, Result};
use gridwatch::notify::{build_notifier, dispatch, local_timestamp, CompletionMessage};
use gridwatch::scheduler::{submit, QstatReader, SubmittedJob};
use gridwatch::system::{acting_user, daemonize, run_companions};
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Initialize logging; RUST_LOG overrides the -v/-q default
    let default_level = if args.quiet && args.verbose == 0 {
        "warn"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    // Handle result
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let config = WatchConfig::from_cli(&args).map_err(GridWatchError::ConfigError)?;

    // Read and validate the notification settings while still attached, so
    // a broken settings file fails in plain sight.
    let notify_config = NotifyConfig::load(config.config_path.as_deref())?;
    notify_config.validate()?;

    let start_epoch = now_epoch_secs();

    // Submit every job up front; any failure aborts before detachment.
    let mut jobs = Vec::new();
    for command in &config.commands {
        jobs.push(submit(command, !config.quiet)?);
    }

    let label = resolve_label(&config, &jobs);
    let ids: Vec<u64> = jobs.iter().map(|job| job.id).collect();

    if config.foreground {
        tracing::info!("staying attached to the terminal");
    } else {
        daemonize()?;
    }

    // The HTTP client spawns its runtime thread, so it must be built after
    // the forks above.
    let notifier = build_notifier(&notify_config)?;

    let user = config.user_override.clone().or_else(acting_user);
    let probe = QstatReader::new(config.queue_program.clone(), user);
    let monitor = CompletionMonitor::new(probe, config.monitor.clone());
    let outcome = monitor.await_completion(PendingSet::new(ids.clone()));

    let message = compose_report(
        &outcome,
        &ids,
        label.as_deref(),
        &jobs,
        config.post_process,
        start_epoch,
        now_epoch_secs,
    );

    dispatch(notifier.as_ref(), &message);

    if !config.quiet {
        let summary = format!("{}\n", message.description);
        terminal_write(&mut std::io::stdout(), summary.as_bytes());
    }
    ring_bell();

    if !outcome.is_complete() && config.foreground {
        std::process::exit(2);
    }
    Ok(())
}

/// Resolve the display label: the explicit override wins, else the name
/// the scheduler reported for a single submitted job. Multiple jobs fall
/// back to the plural event label.
fn resolve_label(config: &WatchConfig, jobs: &[SubmittedJob]) -> Option<String> {
    if let Some(name) = &config.name_override {
        return Some(name.clone());
    }
    if jobs.len() == 1 {
        return jobs[0].label.clone();
    }
    None
}

/// Build the outgoing notification for a monitor outcome.
///
/// On completion the post-processing companions run first; the end time is
/// sampled only after they return, so the reported timestamp and duration
/// cover post-processing as well as the queue wait. A timed-out run skips
/// post-processing entirely.
fn compose_report(
    outcome: &MonitorOutcome,
    ids: &[u64],
    label: Option<&str>,
    jobs: &[SubmittedJob],
    want_post: bool,
    start_epoch: u64,
    now: impl Fn() -> u64,
) -> CompletionMessage {
    let post_processed = match outcome {
        MonitorOutcome::Completed { .. } => want_post && run_companions(jobs),
        MonitorOutcome::TimedOut { .. } => false,
    };
    let elapsed = format_elapsed(start_epoch, now());
    let timestamp = local_timestamp();
    match outcome {
        MonitorOutcome::Completed { .. } => {
            CompletionMessage::completed(ids, label, post_processed, &timestamp, &elapsed)
        }
        MonitorOutcome::TimedOut { remaining, .. } => {
            CompletionMessage::timed_out(remaining, &timestamp, &elapsed)
        }
    }
}

/// Best-effort write to the launching terminal, which may be gone once the
/// watcher has detached. Write failures are ignored.
fn terminal_write(out: &mut impl Write, bytes: &[u8]) {
    let _ = out.write_all(bytes);
    let _ = out.flush();
}

/// Ring the terminal bell.
fn ring_bell() {
    terminal_write(&mut std::io::stdout(), b"\x07");
}
