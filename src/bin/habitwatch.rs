//! habitwatch CLI - Command-line interface for the habit detection engine
//!
//! Commands:
//! - replay: Run recorded frame records through a session (batch mode)
//! - run: Process streaming records from stdin (streaming mode)
//! - validate: Validate frame record schema
//! - doctor: Diagnose configuration and environment
//! - modes: List habit modes and timing presets

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use habitwatch::config::{ALERT_INTERVAL_CHOICES_MS, QUICK_PAUSE_PRESETS_MS};
use habitwatch::modes::ModeRegistry;
use habitwatch::schema::{FrameRecord, FrameRecordAdapter, ValidationError, SCHEMA_VERSION};
use habitwatch::stats::format_elapsed;
use habitwatch::ticker::{PauseTicker, StreamClock, DEFAULT_TICK_PERIOD};
use habitwatch::{
    ConfigUpdate, DetectionConfig, DetectionSession, EngineError, FrameOutcome, HabitMode,
    ReportEncoder, ENGINE_VERSION, PRODUCER_NAME,
};
use tracing::{info, warn};

/// habitwatch - On-device detection of body-focused repetitive habits
#[derive(Parser)]
#[command(name = "habitwatch")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Detect hand-to-face habits from landmark streams", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run recorded frame records through a session (batch mode)
    Replay {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        #[command(flatten)]
        detection: DetectionArgs,

        /// Write the session report to this file (use - for stdout)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Load session state from file
        #[arg(long)]
        load_state: Option<PathBuf>,

        /// Save session state to file after processing
        #[arg(long)]
        save_state: Option<PathBuf>,
    },

    /// Process streaming records from stdin (streaming mode)
    Run {
        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        #[command(flatten)]
        detection: DetectionArgs,

        /// Pause ticker period in milliseconds
        #[arg(long, default_value_t = DEFAULT_TICK_PERIOD.as_millis() as u64)]
        tick_ms: u64,

        /// Write the session report to this file on exit
        #[arg(long)]
        report: Option<PathBuf>,

        /// Load session state from file
        #[arg(long)]
        load_state: Option<PathBuf>,

        /// Save session state to file on exit
        #[arg(long)]
        save_state: Option<PathBuf>,

        /// Flush output after each record (--flush false to buffer)
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        flush: bool,
    },

    /// Validate frame record schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Check a config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Check a saved session state file
        #[arg(long)]
        state: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List habit modes and timing presets
    Modes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Detection settings shared by replay and run
#[derive(Args)]
struct DetectionArgs {
    /// Load detection config from a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Habit mode to watch (e.g. nail_biting)
    #[arg(long)]
    mode: Option<HabitMode>,

    /// Contact sensitivity in [0, 1]
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Minimum spacing between alerts in milliseconds
    #[arg(long)]
    alert_interval_ms: Option<u64>,

    /// Sustained contact before the first alert in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Disable alerts (contact is still tracked)
    #[arg(long)]
    mute: bool,
}

impl DetectionArgs {
    /// File config (or defaults) with flag overrides applied
    fn resolve(&self) -> Result<DetectionConfig, CliFailure> {
        let mut config = match &self.config {
            Some(path) => DetectionConfig::from_file(path)?,
            None => DetectionConfig::default(),
        };
        config.apply(&ConfigUpdate {
            habit_mode: self.mode,
            sensitivity: self.sensitivity,
            is_alert_enabled: if self.mute { Some(false) } else { None },
            alert_interval_ms: self.alert_interval_ms,
            debounce_delay_ms: self.debounce_ms,
        })?;
        Ok(config)
    }
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array of records
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one outcome per line)
    Ndjson,
    /// JSON array of outcomes
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Stdout carries data; logs go to stderr
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliFailure> {
    match cli.command {
        Commands::Replay {
            input,
            output,
            input_format,
            output_format,
            detection,
            report,
            load_state,
            save_state,
        } => cmd_replay(
            &input,
            &output,
            input_format,
            output_format,
            &detection,
            report.as_deref(),
            load_state.as_deref(),
            save_state.as_deref(),
        ),
        Commands::Run {
            output_format,
            detection,
            tick_ms,
            report,
            load_state,
            save_state,
            flush,
        } => cmd_run(
            output_format,
            &detection,
            tick_ms,
            report.as_deref(),
            load_state.as_deref(),
            save_state.as_deref(),
            flush,
        ),
        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),
        Commands::Doctor {
            config,
            state,
            json,
        } => cmd_doctor(config.as_deref(), state.as_deref(), json),
        Commands::Modes { json } => cmd_modes(json),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_replay(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    detection: &DetectionArgs,
    report: Option<&Path>,
    load_state: Option<&Path>,
    save_state: Option<&Path>,
) -> Result<(), CliFailure> {
    let input_data = read_input(input)?;

    let records = match input_format {
        InputFormat::Ndjson => FrameRecordAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => FrameRecordAdapter::parse_array(&input_data)?,
    };

    if records.is_empty() {
        return Err(CliFailure::NoRecords);
    }

    if let Some(failure) = FrameRecordAdapter::validate_records(&records).into_iter().next() {
        return Err(CliFailure::Validation(failure.error));
    }

    if let Some(idx) = FrameRecordAdapter::first_out_of_order(&records) {
        return Err(CliFailure::OutOfOrder(idx));
    }

    let start = records[0].timestamp_ms;
    let mut session = DetectionSession::new(detection.resolve()?, start)?;
    if let Some(path) = load_state {
        session.load_state(&fs::read_to_string(path)?, start)?;
    }

    let mut outcomes: Vec<FrameOutcome> = Vec::new();
    for record in &records {
        if let Some(outcome) = session.apply_record(record)? {
            outcomes.push(outcome);
        }
    }

    let end = records[records.len() - 1].timestamp_ms;
    info!(
        records = records.len(),
        frames = outcomes.len(),
        alerts = session.stats().alerts_triggered,
        elapsed = %format_elapsed(session.stats().elapsed(end)),
        "replay finished"
    );

    if let Some(path) = save_state {
        fs::write(path, session.save_state()?)?;
    }

    let output_data = format_output(&outcomes, &output_format)?;
    write_output(output, &output_data)?;

    if let Some(path) = report {
        let report_json = ReportEncoder::new().encode_to_json(&session, end)?;
        write_output(path, &(report_json + "\n"))?;
    }

    Ok(())
}

fn cmd_run(
    output_format: OutputFormat,
    detection: &DetectionArgs,
    tick_ms: u64,
    report: Option<&Path>,
    load_state: Option<&Path>,
    save_state: Option<&Path>,
    flush: bool,
) -> Result<(), CliFailure> {
    let config = detection.resolve()?;
    let clock = Arc::new(StreamClock::new(0));
    let period = Duration::from_millis(tick_ms.max(1));
    // Started on the first usable record so the session clock matches the stream's
    let mut running: Option<(Arc<Mutex<DetectionSession>>, PauseTicker)> = None;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut outcomes: Vec<FrameOutcome> = Vec::new();
    let mut last_timestamp = 0;

    for (line_num, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // A bad line is dropped; the stream keeps going
        let record: FrameRecord = match FrameRecordAdapter::parse_line(trimmed) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = line_num + 1, error = %e, "dropping malformed record");
                continue;
            }
        };
        if let Err(e) = record.validate() {
            warn!(line = line_num + 1, error = %e, "dropping invalid record");
            continue;
        }

        clock.observe(record.timestamp_ms);
        last_timestamp = record.timestamp_ms;

        let session = match &running {
            Some((session, _)) => Arc::clone(session),
            None => {
                let started = start_stream_session(
                    config.clone(),
                    record.timestamp_ms,
                    load_state,
                    clock.clone(),
                    period,
                )?;
                let session = Arc::clone(&started.0);
                running = Some(started);
                session
            }
        };

        let outcome = {
            let mut guard = session.lock().map_err(|_| CliFailure::SessionPoisoned)?;
            match guard.apply_record(&record) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(line = line_num + 1, error = %e, "record rejected");
                    None
                }
            }
        };

        if let Some(outcome) = outcome {
            match output_format {
                OutputFormat::Ndjson => {
                    writeln!(stdout, "{}", serde_json::to_string(&outcome)?)?;
                    if flush {
                        stdout.flush()?;
                    }
                }
                OutputFormat::Json | OutputFormat::JsonPretty => outcomes.push(outcome),
            }
        }
    }

    let (session, mut ticker) = match running {
        Some(started) => started,
        None => start_stream_session(config, 0, load_state, clock, period)?,
    };
    ticker.stop();

    if !outcomes.is_empty() {
        write!(stdout, "{}", format_output(&outcomes, &output_format)?)?;
    }
    stdout.flush()?;

    let guard = session.lock().map_err(|_| CliFailure::SessionPoisoned)?;
    info!(
        alerts = guard.stats().alerts_triggered,
        frames = guard.stats().frames_processed,
        elapsed = %guard.stats().elapsed_display(last_timestamp),
        "stream closed"
    );

    if let Some(path) = save_state {
        fs::write(path, guard.save_state()?)?;
    }

    if let Some(path) = report {
        let report_json = ReportEncoder::new().encode_to_json(&guard, last_timestamp)?;
        write_output(path, &(report_json + "\n"))?;
    }

    Ok(())
}

/// Session for a live stream starting at `start`, with its pause ticker running
fn start_stream_session(
    config: DetectionConfig,
    start: u64,
    load_state: Option<&Path>,
    clock: Arc<StreamClock>,
    period: Duration,
) -> Result<(Arc<Mutex<DetectionSession>>, PauseTicker), CliFailure> {
    let mut session = DetectionSession::new(config, start)?;
    if let Some(path) = load_state {
        session.load_state(&fs::read_to_string(path)?, start)?;
    }

    let session = Arc::new(Mutex::new(session));
    let ticker = PauseTicker::spawn(Arc::clone(&session), clock, period);
    Ok((session, ticker))
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), CliFailure> {
    let input_data = read_input(input)?;

    let records = match input_format {
        InputFormat::Ndjson => FrameRecordAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => FrameRecordAdapter::parse_array(&input_data)?,
    };

    let results = FrameRecordAdapter::validate_records(&records);
    let out_of_order = FrameRecordAdapter::first_out_of_order(&records);

    let report = ValidationReport {
        total_records: records.len(),
        valid_records: records.len() - results.len(),
        invalid_records: results.len(),
        first_out_of_order: out_of_order,
        errors: results
            .iter()
            .map(|r| ValidationErrorDetail {
                index: r.index,
                record_id: r.record_id.clone(),
                error: r.error.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if let Some(idx) = report.first_out_of_order {
            println!("Timestamps go backwards at index {}", idx);
        }

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - Record {} (index {}): {}",
                    err.record_id.as_deref().unwrap_or("unknown"),
                    err.index,
                    err.error
                );
            }
        }
    }

    if report.invalid_records > 0 {
        Err(CliFailure::ValidationFailed(report.invalid_records))
    } else if let Some(idx) = out_of_order {
        Err(CliFailure::OutOfOrder(idx))
    } else {
        Ok(())
    }
}

fn cmd_doctor(config: Option<&Path>, state: Option<&Path>, json: bool) -> Result<(), CliFailure> {
    let mut checks: Vec<DoctorCheck> = vec![
        DoctorCheck {
            name: "engine_version".to_string(),
            status: CheckStatus::Ok,
            message: format!("habitwatch version {}", ENGINE_VERSION),
        },
        DoctorCheck {
            name: "schema_version".to_string(),
            status: CheckStatus::Ok,
            message: format!("Input schema: {}", SCHEMA_VERSION),
        },
    ];

    if let Some(config_path) = config {
        checks.push(check_file("config", config_path, |content| {
            let config = DetectionConfig::from_json(content)?;
            Ok(format!(
                "Config valid (mode {}, sensitivity {})",
                config.habit_mode, config.sensitivity
            ))
        }));
    }

    if let Some(state_path) = state {
        checks.push(check_file("state", state_path, |content| {
            let mut session = DetectionSession::new(DetectionConfig::default(), 0)?;
            session.load_state(content, 0)?;
            Ok(format!(
                "Session state valid ({} alerts so far)",
                session.stats().alerts_triggered
            ))
        }));
    }

    // Check stdin is available (for streaming mode)
    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (streaming mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("habitwatch Doctor Report");
        println!("========================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");
        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(CliFailure::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_modes(json: bool) -> Result<(), CliFailure> {
    let modes: Vec<ModeInfo> = ModeRegistry::all()
        .iter()
        .map(|spec| ModeInfo {
            mode: spec.mode,
            label: spec.mode.label(),
            matcher: format!("{:?}", spec.matcher).to_lowercase(),
            target_count: spec.targets.len(),
            description: spec.description.to_string(),
        })
        .collect();

    let listing = ModeListing {
        modes,
        alert_interval_choices_ms: ALERT_INTERVAL_CHOICES_MS.to_vec(),
        quick_pause_presets_ms: QUICK_PAUSE_PRESETS_MS.to_vec(),
        defaults: DetectionConfig::default(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Habit Modes");
    println!("===========");
    for info in &listing.modes {
        let targets = if info.target_count > 0 {
            format!("{} landmarks", info.target_count)
        } else {
            "hair mask".to_string()
        };
        println!(
            "  {:<18} {:<22} {:<10} {}",
            info.mode.as_str(),
            info.label,
            info.matcher,
            targets
        );
        println!("  {:<18} {}", "", info.description);
    }

    println!("\nAlert intervals: {}", join_seconds(&listing.alert_interval_choices_ms));
    println!(
        "Quick pauses:    {}",
        listing
            .quick_pause_presets_ms
            .iter()
            .map(|ms| format!("{} min", ms / 60_000))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "Defaults:        mode {}, sensitivity {}, interval {} s, debounce {} ms",
        listing.defaults.habit_mode,
        listing.defaults.sensitivity,
        listing.defaults.alert_interval_ms / 1_000,
        listing.defaults.debounce_delay_ms
    );

    Ok(())
}

// Helper functions

fn read_input(input: &Path) -> Result<String, CliFailure> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn write_output(output: &Path, data: &str) -> Result<(), CliFailure> {
    if output.to_string_lossy() == "-" {
        print!("{}", data);
        io::stdout().flush()?;
    } else {
        fs::write(output, data)?;
    }
    Ok(())
}

fn format_output(outcomes: &[FrameOutcome], format: &OutputFormat) -> Result<String, CliFailure> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for outcome in outcomes {
                lines.push(serde_json::to_string(outcome)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(outcomes)? + "\n"),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(outcomes)? + "\n"),
    }
}

fn join_seconds(values_ms: &[u64]) -> String {
    values_ms
        .iter()
        .map(|ms| format!("{} s", ms / 1_000))
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_file(
    name: &str,
    path: &Path,
    check: impl FnOnce(&str) -> Result<String, EngineError>,
) -> DoctorCheck {
    if !path.exists() {
        return DoctorCheck {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: format!("{} file does not exist", name),
        };
    }

    match fs::read_to_string(path) {
        Ok(content) => match check(&content) {
            Ok(message) => DoctorCheck {
                name: name.to_string(),
                status: CheckStatus::Ok,
                message,
            },
            Err(e) => DoctorCheck {
                name: name.to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            },
        },
        Err(e) => DoctorCheck {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: format!("Cannot read {} file: {}", name, e),
        },
    }
}

// Error types

#[derive(Debug)]
enum CliFailure {
    Io(io::Error),
    Engine(EngineError),
    Json(serde_json::Error),
    Validation(ValidationError),
    NoRecords,
    OutOfOrder(usize),
    ValidationFailed(usize),
    DoctorFailed,
    SessionPoisoned,
}

impl From<io::Error> for CliFailure {
    fn from(e: io::Error) -> Self {
        CliFailure::Io(e)
    }
}

impl From<EngineError> for CliFailure {
    fn from(e: EngineError) -> Self {
        CliFailure::Engine(e)
    }
}

impl From<serde_json::Error> for CliFailure {
    fn from(e: serde_json::Error) -> Self {
        CliFailure::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CliFailure> for CliError {
    fn from(e: CliFailure) -> Self {
        match e {
            CliFailure::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CliFailure::Engine(e @ EngineError::InvalidConfig(_)) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Sensitivity must be within [0, 1]".to_string()),
            },
            CliFailure::Engine(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(format!("Ensure input matches {} schema", SCHEMA_VERSION)),
            },
            CliFailure::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            CliFailure::Validation(e) => CliError {
                code: "VALIDATION_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'habitwatch validate' for details".to_string()),
            },
            CliFailure::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            CliFailure::OutOfOrder(idx) => CliError {
                code: "OUT_OF_ORDER".to_string(),
                message: format!("Timestamp goes backwards at record {}", idx),
                hint: Some("Records must be in frame clock order".to_string()),
            },
            CliFailure::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            CliFailure::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
            CliFailure::SessionPoisoned => CliError {
                code: "INTERNAL_ERROR".to_string(),
                message: "Session lock poisoned".to_string(),
                hint: None,
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    first_out_of_order: Option<usize>,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    record_id: Option<String>,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

#[derive(serde::Serialize)]
struct ModeListing {
    modes: Vec<ModeInfo>,
    alert_interval_choices_ms: Vec<u64>,
    quick_pause_presets_ms: Vec<u64>,
    defaults: DetectionConfig,
}

#[derive(serde::Serialize)]
struct ModeInfo {
    mode: HabitMode,
    label: String,
    matcher: String,
    target_count: usize,
    description: String,
}
