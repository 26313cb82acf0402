//! `tierscope init` - write an example config file

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const EXAMPLE_CONFIG: &str = r#"# Tierscope validation configuration
# All settings are optional; omitted values use the defaults shown here.

# Require exact tier matches (false tolerates allowed_tier_deviation)
strict_mode = false

# Ordinal tier distance tolerated between predicted and intended tier
allowed_tier_deviation = 1

# Regeneration attempts before a failing scenario is given up on
max_regeneration_attempts = 3

# Scores below this confidence never pass validation
minimum_confidence = 0.5

[weights]
wood = 0.25
campbell = 0.25
liu_li = 0.30
interactivity = 0.20

[tier_thresholds]
simple_max = 15.0
moderate_max = 30.0

[interactivity]
simple_max_ratio = 0.4
moderate_min_ratio = 0.25
moderate_max_ratio = 0.75
complex_min_ratio = 0.5
simple_max_depth = 1
moderate_min_depth = 1
moderate_max_depth = 3
complex_min_depth = 2
"#;

pub fn run(path: &Path) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join("tierscope.toml");
    if config_path.exists() {
        anyhow::bail!("Config already exists: {}", config_path.display());
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!(
        "{} Wrote {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    Ok(())
}
