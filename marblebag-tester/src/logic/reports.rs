use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use marblebag_game::Marble;
use marblebag_game::numbers::ratio;

use super::ScenarioResult;
use super::sweep::{SessionRecord, StrategyAggregate};

fn success_rate(results: &[ScenarioResult]) -> (usize, usize, f64) {
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    let rate = ratio(
        u64::try_from(passed).unwrap_or(u64::MAX),
        u64::try_from(total).unwrap_or(u64::MAX),
    ) * 100.0;
    (total, passed, rate)
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    aggregates: &[StrategyAggregate],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Logic Test Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;

    let (total_tests, passed_tests, success_rate) = success_rate(results);
    writeln!(out, "Total scenarios: {total_tests}")?;
    writeln!(out, "Passed: {}", passed_tests.to_string().green())?;
    writeln!(out, "Failed: {}", (total_tests - passed_tests).to_string().red())?;
    writeln!(out, "Success rate: {success_rate:.1}%")?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(
            out,
            "{} {} (seed {})",
            status,
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    if let (Some(fastest), Some(slowest)) = (
        results.iter().min_by_key(|r| r.average_duration),
        results.iter().max_by_key(|r| r.average_duration),
    ) {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Fastest: {} ({:?})",
            fastest.scenario_name.green(),
            fastest.average_duration
        )?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.average_duration
        )?;
        writeln!(out)?;
    }

    if !aggregates.is_empty() {
        writeln!(out, "{}", "🎲 Strategy Summary".bright_magenta().bold())?;
        writeln!(out, "{}", "===================".magenta())?;
        for aggregate in aggregates {
            writeln!(
                out,
                "{:14} runs {:4} | bust {:5.1}% | finish {:5.1}% | net {:+.2} ± {:.2} (expected {:+.2}) | rounds {:.1}",
                aggregate.strategy.to_string(),
                aggregate.iterations,
                aggregate.bust_rate * 100.0,
                aggregate.finish_rate * 100.0,
                aggregate.mean_net,
                aggregate.std_net,
                aggregate.expected_net,
                aggregate.mean_rounds
            )?;
        }
    }

    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Marble Bag Logic Test Results\n")?;

    let (total_tests, passed_tests, success_rate) = success_rate(results);
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total_tests}")?;
    writeln!(out, "- **Passed**: {passed_tests}")?;
    writeln!(out, "- **Failed**: {}", total_tests - passed_tests)?;
    writeln!(out, "- **Success rate**: {success_rate:.1}%\n")?;

    writeln!(out, "## Detailed Results\n")?;

    for result in results {
        let status = if result.passed { "✅" } else { "❌" };

        writeln!(
            out,
            "### {} {} (seed {})\n",
            status, result.scenario_name, result.seed
        )?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, records: &[SessionRecord]) -> Result<()> {
    writeln!(
        out,
        "strategy,seed,ending,rounds,final_gold,net,red,green,black,white,rng_draws"
    )?;
    for record in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{}",
            record.strategy.key(),
            record.seed,
            record.ending,
            record.rounds_played,
            record.final_gold,
            record.net,
            record.colors.get(Marble::Red),
            record.colors.get(Marble::Green),
            record.colors.get(Marble::Black),
            record.colors.get(Marble::White),
            record.rng_draws
        )?;
    }
    Ok(())
}
