use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use crate::tester::ScenarioResult;

#[allow(clippy::cast_precision_loss)]
fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    (passed as f64 / results.len() as f64) * 100.0
}

pub fn generate_console_report(
    w: &mut impl Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", "📊 Invariant Results Summary".bright_cyan().bold())?;
    writeln!(w, "{}", "============================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();

    writeln!(w, "Total runs: {total}")?;
    writeln!(w, "Passed: {}", passed.to_string().green())?;
    writeln!(w, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(w, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(w, "Total time: {total_duration:?}")?;
    writeln!(w)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            w,
            "{status} {} (seed {})",
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            w,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(w, "   Average time: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(w, "   Failures:")?;
            for failure in &result.failures {
                writeln!(w, "     • {}", failure.red())?;
            }
        }
        writeln!(w)?;
    }

    let fastest = results.iter().min_by_key(|r| r.average_duration);
    let slowest = results.iter().max_by_key(|r| r.average_duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(w, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(w, "{}", "=====================".yellow())?;
        writeln!(
            w,
            "Fastest: {} ({:?})",
            fastest.scenario_name.green(),
            fastest.average_duration
        )?;
        writeln!(
            w,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.average_duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(w: &mut impl Write, results: &[ScenarioResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, results)?;
    writeln!(w)?;
    Ok(())
}

pub fn generate_markdown_report(w: &mut impl Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(w, "# Tactics Invariant Results\n")?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();

    writeln!(w, "## Summary\n")?;
    writeln!(w, "- **Total runs**: {total}")?;
    writeln!(w, "- **Passed**: {passed}")?;
    writeln!(w, "- **Failed**: {}", total - passed)?;
    writeln!(w, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(w, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            w,
            "### {status} {} (seed {})\n",
            result.scenario_name, result.seed
        )?;
        writeln!(
            w,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(w, "- **Average time**: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(w, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(w, "  - {failure}")?;
            }
        }
        writeln!(w)?;
    }
    Ok(())
}
