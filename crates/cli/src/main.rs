//! Trace-driven cache simulator CLI.
//!
//! This binary replays a memory trace against one simulated cache. It performs:
//! 1. **Configuration:** Loads an optional JSON config and applies command-line overrides.
//! 2. **Replay:** Streams `0xHEX OP` records from the trace file into the cache.
//! 3. **Reporting:** Prints the access/miss report (text or JSON) and an optional block dump.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cachesim_core::Simulator;
use cachesim_core::config::{CacheConfig, Organization, ReplacementPolicy};
use cachesim_core::core::units::cache::CacheDump;
use cachesim_core::stats::CacheStats;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven cache simulator",
    long_about = "Replay a memory trace against a direct-mapped, fully associative, or set-associative cache and report compulsory, capacity, and conflict misses.\n\nEach trace line is `0xADDRESS OP`, where OP `r` is a read and anything else is a write.\n\nExamples:\n  cachesim traces/gcc.trace\n  cachesim --organization set --ways 4 --policy plru --size 32768 traces/gcc.trace\n  cachesim --config l1d.json --json traces/gcc.trace"
)]
struct Cli {
    /// Trace file to replay.
    trace: PathBuf,

    /// JSON cache configuration; command-line options override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cache organization.
    #[arg(short, long, value_enum)]
    organization: Option<OrganizationArg>,

    /// Cache size in bytes (power of two).
    #[arg(short, long)]
    size: Option<u32>,

    /// Block size in bytes (power of two).
    #[arg(short, long)]
    line: Option<u32>,

    /// Associativity for set-associative caches (2, 4, 8, 16, 32).
    #[arg(short, long)]
    ways: Option<u32>,

    /// Replacement policy for associative caches.
    #[arg(short, long, value_enum)]
    policy: Option<PolicyArg>,

    /// Seed for random replacement.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Print every block's valid/dirty/tag state after the run.
    #[arg(long)]
    dump: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrganizationArg {
    /// Direct-mapped.
    Direct,
    /// Fully associative.
    Full,
    /// N-way set associative.
    Set,
}

impl From<OrganizationArg> for Organization {
    fn from(arg: OrganizationArg) -> Self {
        match arg {
            OrganizationArg::Direct => Self::DirectMapped,
            OrganizationArg::Full => Self::FullyAssociative,
            OrganizationArg::Set => Self::SetAssociative,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    /// Random victim.
    Random,
    /// True least-recently-used.
    Lru,
    /// Tree pseudo-LRU.
    Plru,
}

impl From<PolicyArg> for ReplacementPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Random => Self::Random,
            PolicyArg::Lru => Self::Lru,
            PolicyArg::Plru => Self::Plru,
        }
    }
}

/// JSON report layout.
#[derive(Serialize)]
struct Report<'a> {
    config: &'a CacheConfig,
    records: usize,
    stats: CacheStats,
    miss_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    dump: Option<CacheDump>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs the stderr subscriber; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Builds the effective configuration from the optional file and the overrides.
fn resolve_config(cli: &Cli) -> Result<CacheConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => CacheConfig::from_file(path)?,
        None => CacheConfig::default(),
    };
    if let Some(organization) = cli.organization {
        config.organization = organization.into();
    }
    if let Some(size) = cli.size {
        config.size_bytes = size;
    }
    if let Some(line) = cli.line {
        config.line_bytes = line;
    }
    if let Some(ways) = cli.ways {
        config.ways = ways;
    }
    if let Some(policy) = cli.policy {
        config.policy = policy.into();
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    Ok(config)
}

/// Replays the trace and prints the report.
fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(cli)?;
    info!(?config, "configuration resolved");
    let mut sim = Simulator::new(&config)?;

    let trace = File::open(&cli.trace)
        .map_err(|e| format!("could not open trace '{}': {e}", cli.trace.display()))?;
    let records = sim.run_reader(BufReader::new(trace))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        let stats = sim.stats();
        let report = Report {
            config: &config,
            records,
            stats,
            miss_rate: stats.miss_rate(),
            dump: cli.dump.then(|| sim.cache.dump()),
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    let geometry = sim.cache.geometry();
    writeln!(out, "Configuration:")?;
    writeln!(
        out,
        "  Organization: {:?}  Size: {} B  Block: {} B  Sets: {}  Ways: {}",
        geometry.organization,
        geometry.cache_size,
        geometry.block_size,
        geometry.num_sets,
        geometry.ways
    )?;
    if let Some(policy) = sim.cache.policy() {
        writeln!(out, "  Policy: {:?}", policy.kind())?;
    }
    writeln!(out, "  Trace: {} ({records} records)", cli.trace.display())?;
    writeln!(out)?;

    sim.stats().write_report(&mut out)?;

    if cli.dump {
        writeln!(out)?;
        write!(out, "{}", sim.cache.dump())?;
    }
    Ok(())
}
