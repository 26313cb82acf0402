//! `tierscope validate` - batch scenario validation

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tierscope::models::{ScenarioInput, ScenarioValidationResult, ValidationBatchStats};
use tierscope::{ComplexityValidationConfig, ProgressEventKind, Tier, ValidationEngine};

pub struct ValidateArgs {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub format: String,
    pub output: Option<PathBuf>,
    pub strict: bool,
    pub workers: usize,
    pub explain: bool,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let scenarios: Vec<ScenarioInput> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid scenario JSON in {}", args.input.display()))?;

    let mut config = match &args.config {
        Some(path) => ComplexityValidationConfig::load_from(path),
        None => ComplexityValidationConfig::load_from(&PathBuf::from("tierscope.toml")),
    };
    if args.strict {
        config.strict_mode = true;
    }

    let bar = ProgressBar::new(scenarios.len() as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("#>-"),
    );
    let progress_bar = bar.clone();

    let engine = ValidationEngine::new(config)
        .with_workers(args.workers)
        .with_progress_callback(Box::new(move |event| match event.kind {
            ProgressEventKind::ValidationProgress => {
                progress_bar.set_position(event.current as u64);
                if let Some(msg) = &event.message {
                    progress_bar.set_message(msg.clone());
                }
            }
            ProgressEventKind::BatchComplete => {
                progress_bar.finish_and_clear();
            }
            ProgressEventKind::ValidationStart | ProgressEventKind::ValidationComplete => {}
        }));

    let (results, stats) = engine.validate_batch(&scenarios)?;

    let rendered = match args.format.as_str() {
        "json" => render_json(&results, &stats)?,
        _ => render_text(&results, &stats),
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", style(path.display()).cyan());
        }
        None => print!("{rendered}"),
    }

    if args.explain {
        for result in &results {
            println!("\n---\n# {}\n", result.scenario_id);
            println!("{}", engine.scorer().explain(&result.score));
        }
    }

    Ok(())
}

fn render_json(
    results: &[ScenarioValidationResult],
    stats: &ValidationBatchStats,
) -> Result<String> {
    let doc = serde_json::json!({
        "results": results,
        "stats": stats,
    });
    Ok(serde_json::to_string_pretty(&doc)? + "\n")
}

fn render_text(results: &[ScenarioValidationResult], stats: &ValidationBatchStats) -> String {
    let mut out = String::new();

    for result in results {
        let verdict = if result.is_valid {
            style("PASS").green().to_string()
        } else {
            style("FAIL").red().to_string()
        };
        out.push_str(&format!(
            "{verdict}  {}  score {:>5.1}  {} -> {}  confidence {:.2}\n",
            result.scenario_id,
            result.score.overall_score,
            result.score.intended_tier,
            result.score.predicted_tier,
            result.score.confidence_score,
        ));
        if let Some(reason) = &result.regeneration_reason {
            out.push_str(&format!("      {reason}\n"));
        }
        for hint in &result.prompt_enhancements {
            out.push_str(&format!("      - {hint}\n"));
        }
    }

    out.push_str(&format!(
        "\n{} scenarios: {} passed, {} failed ({:.0}% pass rate)\n",
        stats.total_validated,
        style(stats.passed).green(),
        style(stats.failed).red(),
        stats.pass_rate * 100.0,
    ));
    out.push_str(&format!(
        "avg confidence {:.2}, avg validation time {:.1}ms\n",
        stats.avg_confidence_score, stats.avg_validation_time_ms,
    ));
    for tier in Tier::all() {
        if let Some(rate) = stats.tier_match_rate.get(&tier) {
            let intended = stats.intended_tier_distribution.get(&tier).unwrap_or(&0);
            out.push_str(&format!(
                "  {tier}: {intended} intended, {:.0}% tier match\n",
                rate * 100.0
            ));
        }
    }
    out
}
