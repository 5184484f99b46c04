use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use super::checks::CheckResult;
use super::distribution::DistributionRow;
use super::sampler::SampleRecord;

/// Everything a tester run produced.
#[derive(Debug, Default, Serialize)]
pub struct TestReport {
    pub checks: Vec<CheckResult>,
    pub samples: Vec<SampleRecord>,
    pub distribution: Vec<DistributionRow>,
}

impl TestReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    fn passed_count(&self) -> usize {
        self.checks.iter().filter(|check| check.passed).count()
    }

    #[allow(clippy::cast_precision_loss)]
    fn success_rate(&self) -> f64 {
        if self.checks.is_empty() {
            return 100.0;
        }
        (self.passed_count() as f64 / self.checks.len() as f64) * 100.0
    }
}

pub fn generate_console_report<W: Write>(
    writer: &mut W,
    report: &TestReport,
    total_duration: Duration,
) -> Result<()> {
    if !report.samples.is_empty() {
        writeln!(writer, "{}", "🧩 Sampled Puzzles".bright_cyan().bold())?;
        writeln!(writer, "{}", "==================".cyan())?;
        for record in &report.samples {
            writeln!(
                writer,
                "[{} L{} seed {} {}#{}] {}",
                record.category.to_string().bold(),
                record.level,
                record.seed,
                record.trace.pool_id,
                record.trace.index,
                record.puzzle.question
            )?;
            writeln!(writer, "   Answer: {}", record.puzzle.solution.green())?;
        }
        writeln!(writer)?;
    }

    if !report.distribution.is_empty() {
        writeln!(writer, "{}", "🎲 Tier Distribution".bright_yellow().bold())?;
        writeln!(writer, "{}", "====================".yellow())?;
        for row in &report.distribution {
            writeln!(
                writer,
                "{:<9} L{:<3} seed {:<20} advanced {:.3} (expected {:.3}) drift {:.3}",
                row.category.to_string(),
                row.level,
                row.seed,
                row.observed.advanced,
                row.expected.advanced,
                row.max_drift()
            )?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "📊 Check Results Summary".bright_cyan().bold())?;
    writeln!(writer, "{}", "========================".cyan())?;
    let total = report.checks.len();
    let passed = report.passed_count();
    writeln!(writer, "Total checks: {total}")?;
    writeln!(writer, "Passed: {}", passed.to_string().green())?;
    writeln!(writer, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(writer, "Success rate: {:.1}%", report.success_rate())?;
    writeln!(writer, "Total time: {total_duration:?}")?;
    writeln!(writer)?;

    for check in &report.checks {
        let status = if check.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(writer, "{} {}", status, check.check_name.bold())?;
        writeln!(writer, "   Samples: {}", check.samples_run)?;
        writeln!(writer, "   Time: {:?}", check.duration)?;
        if !check.failures.is_empty() {
            writeln!(writer, "   Failures:")?;
            for failure in &check.failures {
                writeln!(writer, "     • {}", failure.red())?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn generate_json_report<W: Write>(writer: &mut W, report: &TestReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(writer: &mut W, report: &TestReport) -> Result<()> {
    writeln!(writer, "# Aizzle Puzzle Engine Test Results\n")?;

    let total = report.checks.len();
    let passed = report.passed_count();
    writeln!(writer, "## Summary\n")?;
    writeln!(writer, "- **Total checks**: {total}")?;
    writeln!(writer, "- **Passed**: {passed}")?;
    writeln!(writer, "- **Failed**: {}", total - passed)?;
    writeln!(writer, "- **Success rate**: {:.1}%\n", report.success_rate())?;

    if !report.distribution.is_empty() {
        writeln!(writer, "## Tier Distribution\n")?;
        writeln!(
            writer,
            "| Category | Level | Seed | Draws | Advanced | Expected | Max drift |"
        )?;
        writeln!(writer, "|---|---|---|---|---|---|---|")?;
        for row in &report.distribution {
            writeln!(
                writer,
                "| {} | {} | {} | {} | {:.3} | {:.3} | {:.3} |",
                row.category,
                row.level,
                row.seed,
                row.draws,
                row.observed.advanced,
                row.expected.advanced,
                row.max_drift()
            )?;
        }
        writeln!(writer)?;
    }

    if !report.samples.is_empty() {
        writeln!(writer, "## Sampled Puzzles\n")?;
        for record in &report.samples {
            writeln!(
                writer,
                "- **{} L{}** (seed {}): {} → `{}`",
                record.category,
                record.level,
                record.seed,
                record.puzzle.question,
                record.puzzle.solution
            )?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "## Detailed Results\n")?;
    if report.checks.is_empty() {
        writeln!(writer, "_No checks executed._")?;
    }
    for check in &report.checks {
        let status = if check.passed { "✅" } else { "❌" };
        writeln!(writer, "### {} {}\n", status, check.check_name)?;
        writeln!(writer, "- **Samples**: {}", check.samples_run)?;
        writeln!(writer, "- **Time**: {:?}", check.duration)?;
        if !check.failures.is_empty() {
            writeln!(writer, "- **Failures**:")?;
            for failure in &check.failures {
                writeln!(writer, "  - {failure}")?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}
