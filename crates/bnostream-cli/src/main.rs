use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use bnostream_core::serial::{
    DEFAULT_BAUD_RATE, DeviceIds, SerialFrameSource, available_ports, discover_and_open, open_port,
};
use bnostream_core::{CaptureReport, EventSource, SensorEvent, SourceError, decode_capture_file};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BNOSTREAM_BUILD_COMMIT"),
    " ",
    env!("BNOSTREAM_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "bnostream")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode BNO motion-sensor telemetry from a serial link.",
    long_about = None,
    after_help = "Examples:\n  bnostream stream\n  bnostream stream --port /dev/ttyACM0 --json\n  bnostream decode dump.bin --json --pretty"
)]
struct Cli {
    /// Log discovery and framing details
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read events from the sensor until interrupted or disconnected.
    Stream(StreamArgs),
    /// List serial ports and their USB ids.
    Ports {
        #[command(flatten)]
        device: DeviceArgs,
    },
    /// Decode a recorded dump of the serial stream.
    Decode {
        /// Path to the raw dump file
        input: PathBuf,

        /// Print the decoded capture as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
}

#[derive(Args, Debug)]
struct StreamArgs {
    /// Serial port to open instead of discovering the sensor
    #[arg(short, long)]
    port: Option<String>,

    /// Serial baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    baud_rate: u32,

    #[command(flatten)]
    device: DeviceArgs,

    /// Print one JSON object per event
    #[arg(long)]
    json: bool,

    /// Stop after this many events
    #[arg(short = 'n', long)]
    count: Option<u64>,
}

#[derive(Args, Debug)]
struct DeviceArgs {
    /// USB vendor id to match (hex)
    #[arg(long, value_parser = parse_hex_u16, default_value = "2341")]
    vid: u16,

    /// USB product id to match (hex)
    #[arg(long, value_parser = parse_hex_u16, default_value = "0043")]
    pid: u16,
}

impl DeviceArgs {
    fn ids(&self) -> DeviceIds {
        DeviceIds {
            vid: self.vid,
            pid: self.pid,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Stream(args) => cmd_stream(args),
        Commands::Ports { device } => cmd_ports(device.ids()),
        Commands::Decode {
            input,
            json,
            pretty,
        } => cmd_decode(input, json, pretty, cli.quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<SourceError> for CliError {
    fn from(err: SourceError) -> Self {
        let hint = match &err {
            SourceError::DeviceNotFound { .. } => Some(
                "check the USB cable, run `bnostream ports`, or pass --port explicitly".to_string(),
            ),
            SourceError::Closed => Some("the device disconnected or was reset".to_string()),
            SourceError::Serial { .. } => {
                Some("check permissions on the port (e.g. the dialout group)".to_string())
            }
            _ => None,
        };
        CliError::new(err.to_string(), hint)
    }
}

fn cmd_stream(args: StreamArgs) -> Result<(), CliError> {
    if args.count == Some(0) {
        return Ok(());
    }
    let ids = args.device.ids();
    let events = EventSource::connect(|| -> Result<SerialFrameSource, SourceError> {
        match args.port.as_deref() {
            Some(name) => open_port(name, args.baud_rate),
            None => discover_and_open(ids, args.baud_rate),
        }
    })?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut printed = 0u64;
    for event in events {
        let event = event?;
        write_event(&mut out, &event, args.json).context("failed to write event")?;
        printed += 1;
        if args.count.is_some_and(|limit| printed >= limit) {
            break;
        }
    }
    info!(printed, "stream finished");
    Ok(())
}

fn cmd_ports(ids: DeviceIds) -> Result<(), CliError> {
    let ports = available_ports()?;
    if ports.is_empty() {
        warn!("no serial ports found");
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for port in &ports {
        let usb = port
            .usb
            .map(|usb| usb.to_string())
            .unwrap_or_else(|| "-".to_string());
        let marker = if ids.matches(port) { "  <- sensor" } else { "" };
        writeln!(out, "{}\t{}{}", port.name, usb, marker).context("failed to write port list")?;
    }
    Ok(())
}

fn cmd_decode(input: PathBuf, json: bool, pretty: bool, quiet: bool) -> Result<(), CliError> {
    if !input.is_file() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a raw dump captured from the serial port".to_string()),
        ));
    }
    let report = decode_capture_file(&input)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let text = serialize_report(&report, pretty)?;
        writeln!(out, "{}", text).context("failed to write report")?;
    } else {
        for event in &report.events {
            write_event(&mut out, event, false).context("failed to write event")?;
        }
    }
    if !quiet {
        eprintln!(
            "decoded {} events from {} frames ({} dropped)",
            report.events.len(),
            report.frames_total,
            report.frames_dropped
        );
    }
    Ok(())
}

fn write_event(out: &mut impl Write, event: &SensorEvent, json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, event).context("JSON serialization failed")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}\n", event)?;
    }
    out.flush()?;
    Ok(())
}

fn serialize_report(report: &CaptureReport, pretty: bool) -> Result<String, CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    text.context("JSON serialization failed").map_err(Into::into)
}

fn parse_hex_u16(value: &str) -> Result<u16, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u16::from_str_radix(digits, 16).map_err(|err| format!("invalid hex id '{value}': {err}"))
}
