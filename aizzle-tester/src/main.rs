mod common;
mod logic;

use aizzle_game::{Catalog, PuzzleCategory, SelectionPolicy};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use common::{parse_categories, parse_levels, parse_rolls, split_csv};
use logic::{
    DEFAULT_TOLERANCE, Sampler, SeedInfo, TestReport, check_distribution, check_samples,
    list_checks, resolve_seed_inputs, run_distribution, simulate_sessions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestMode {
    /// Print generated puzzles per category, level and seed
    Sample,
    /// Compare tier and sub-kind shares against the selection policy
    Distribution,
    /// Simulate play and cross-check score and streak bookkeeping
    Session,
    /// Run every mode
    All,
}

impl TestMode {
    const fn includes(self, other: Self) -> bool {
        matches!(self, Self::All) || self as u8 == other as u8
    }
}

#[derive(Debug, Parser)]
#[command(name = "aizzle-tester", version = "0.1.0")]
#[command(about = "Automated QA for the Aizzle puzzle engine")]
struct Args {
    /// Test mode: sample, distribution, session, or all
    #[arg(long, value_enum, default_value_t = TestMode::All)]
    mode: TestMode,

    /// Categories to exercise (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    categories: String,

    /// Levels to exercise (comma-separated, ranges like `1-5` allowed)
    #[arg(long, default_value = "1,2,3,5,10")]
    levels: String,

    /// Seeds to run (comma-separated; integers, 0x hex, or phrases)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Draws per distribution row, or rounds per simulated session
    #[arg(long, default_value_t = 2000)]
    iterations: usize,

    /// Unit rolls replayed for every sample instead of a seeded stream
    #[arg(long)]
    rolls: Option<String>,

    /// Allowed drift between observed and expected shares
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Optional selection policy JSON overriding the built-in mix
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// List all available checks and exit
    #[arg(long)]
    list_checks: bool,
}

/// Parsed run plan shared by every mode.
struct RunPlan {
    categories: Vec<PuzzleCategory>,
    levels: Vec<u32>,
    seeds: Vec<SeedInfo>,
    rolls: Option<Vec<f64>>,
    policy: SelectionPolicy,
}

impl RunPlan {
    fn from_args(args: &Args) -> Result<Self> {
        let policy = match &args.policy {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let policy = SelectionPolicy::from_json(&raw)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                policy.validate()?;
                policy
            }
            None => SelectionPolicy::default(),
        };
        Ok(Self {
            categories: parse_categories(&args.categories)?,
            levels: parse_levels(&args.levels)?,
            seeds: resolve_seed_inputs(&split_csv(&args.seeds))?,
            rolls: args.rolls.as_deref().map(parse_rolls).transpose()?,
            policy,
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_checks(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let plan = RunPlan::from_args(&args)?;
    let report = run_checks(&args, &plan)?;
    write_reports(&args, &report, start_time)?;

    if !report.passed() {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_checks(args: &Args) -> Result<bool> {
    if !args.list_checks {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available checks:")?;
    for (key, description) in list_checks() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    eprintln!("{}", "🧠 Aizzle Puzzle Tester".bright_cyan().bold());
    eprintln!("{}", "=======================".cyan());
}

fn run_checks(args: &Args, plan: &RunPlan) -> Result<TestReport> {
    let catalog = Catalog::builtin();
    catalog
        .validate()
        .context("built-in catalog failed validation")?;
    let mut report = TestReport::default();

    if args.mode.includes(TestMode::Sample) {
        eprintln!("{}", "🧩 Sampling puzzles".bright_yellow().bold());
        let sampler = Sampler::new(catalog, plan.policy, args.verbose);
        let samples = sampler.run(
            &plan.categories,
            &plan.levels,
            &plan.seeds,
            plan.rolls.as_deref(),
        )?;
        report.checks.push(check_samples(&samples));
        report.samples = samples;
    }

    if args.mode.includes(TestMode::Distribution) {
        eprintln!("{}", "🎲 Measuring tier distribution".bright_yellow().bold());
        let rows = run_distribution(
            catalog,
            &plan.policy,
            &plan.categories,
            &plan.levels,
            &plan.seeds,
            args.iterations,
        )?;
        report.checks.push(check_distribution(&rows, args.tolerance));
        report.distribution = rows;
    }

    if args.mode.includes(TestMode::Session) {
        eprintln!("{}", "🎮 Simulating sessions".bright_yellow().bold());
        report.checks.push(simulate_sessions(
            catalog,
            &plan.policy,
            &plan.categories,
            &plan.levels,
            &plan.seeds,
            args.iterations,
        ));
    }

    Ok(report)
}

fn write_reports(args: &Args, report: &TestReport, start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, report)?,
        "markdown" => logic::reports::generate_markdown_report(&mut output_target, report)?,
        _ => logic::reports::generate_console_report(
            &mut output_target,
            report,
            start_time.elapsed(),
        )?,
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
