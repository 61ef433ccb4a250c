//! Configuration settings for GridWatch
//!
//! Defines all configuration options, CLI arguments, and defaults
//! for a watch run.

use clap::Parser;
use std::path::PathBuf;

use crate::core::MonitorOptions;

/// GridWatch - Batch job completion notifier for Grid Engine clusters
#[derive(Parser, Debug, Clone)]
#[command(name = "gridwatch")]
#[command(author = "GridWatch Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Submit batch jobs, wait for them to finish, get notified")]
#[command(long_about = r#"
GridWatch submits one or more batch jobs, detaches into the background,
and polls the queue until every job has left it. When the last job
finishes it can run post-processing scripts, and it sends a single push
notification carrying the elapsed wall-clock time.

The push service is configured in ~/.gridwatch/config.ini:

  [general]
  title = Grid engine notification

  [api]
  type = prowl
  key = <your API key>

Examples:
  gridwatch "qsub run.sh"                     # Submit and watch one job
  gridwatch "qsub a.sh" "qsub b.sh" -n build  # Watch two jobs as "build"
  gridwatch "qsub run.sh" -p                  # Run process_run.sh afterwards
  gridwatch "qsub run.sh" --timeout 12h       # Give up after 12 hours
"#)]
pub struct CliArgs {
    /// Submission command lines, one per job (quote each one)
    #[arg(value_name = "COMMAND", required = true)]
    pub commands: Vec<String>,

    /// Override the notification label (defaults to the submitted job name)
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Run process_<script> next to each submitted script when done
    #[arg(short = 'p', long)]
    pub process: bool,

    /// Queue user to watch (defaults to the login user)
    #[arg(short = 'u', long, value_name = "USER")]
    pub user: Option<String>,

    /// Time between queue polls
    #[arg(long, default_value = "30s", value_name = "DURATION")]
    pub interval: String,

    /// Give up after this long and report the jobs still pending
    #[arg(long, value_name = "DURATION")]
    pub timeout: Option<String>,

    /// Reproduce the historical matching behavior (substring matches,
    /// one job checked per poll)
    #[arg(long)]
    pub compat: bool,

    /// Queue listing program
    #[arg(long, default_value = "qstat", value_name = "PROGRAM")]
    pub qstat: String,

    /// Path to the notification settings file
    #[arg(long, env = "GRIDWATCH_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Stay attached to the terminal instead of detaching
    #[arg(long)]
    pub foreground: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Submission command lines in order
    pub commands: Vec<String>,
    /// Label override for the notification
    pub name_override: Option<String>,
    /// Run post-processing scripts after completion
    pub post_process: bool,
    /// Queue user override
    pub user_override: Option<String>,
    /// Polling options
    pub monitor: MonitorOptions,
    /// Queue listing program
    pub queue_program: String,
    /// Notification settings file override
    pub config_path: Option<PathBuf>,
    /// Stay in the foreground
    pub foreground: bool,
    /// Suppress acknowledgement echo
    pub quiet: bool,
}

impl WatchConfig {
    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, String> {
        let interval = humantime::parse_duration(&args.interval)
            .map_err(|e| format!("Invalid interval: {}", e))?;
        if interval.is_zero() {
            return Err("Interval must be greater than zero".to_string());
        }

        let deadline = args
            .timeout
            .as_deref()
            .map(humantime::parse_duration)
            .transpose()
            .map_err(|e| format!("Invalid timeout: {}", e))?;

        let mut monitor = MonitorOptions {
            interval,
            deadline,
            ..MonitorOptions::default()
        };
        if args.compat {
            monitor = monitor.compat();
        }

        Ok(Self {
            commands: args.commands.clone(),
            name_override: args.name.clone(),
            post_process: args.process,
            user_override: args.user.clone(),
            monitor,
            queue_program: args.qstat.clone(),
            config_path: args.config.clone(),
            foreground: args.foreground,
            quiet: args.quiet,
        })
    }
}
