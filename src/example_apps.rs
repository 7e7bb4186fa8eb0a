use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};
use serde::Serialize;

use crate::config::PoolConfig;
use crate::constants::demo::{DEFAULT_DRAW_COUNT, DEFAULT_ROUNDS, LOG_FILTER_ENV};
use crate::data::CodeRecipe;
use crate::metrics::{CategorySkew, PoolStats, category_skew};
use crate::recipe_pool::RecipePool;
use crate::source::{MarkdownAssetSource, MarkdownSourceConfig};

#[derive(Debug, Parser)]
#[command(
    name = "draw_demo",
    disable_help_subcommand = true,
    about = "Draw unique random batches of code recipes",
    long_about = "Load markdown code recipes from an asset directory and draw batches of distinct recipes without repeats until the collection is exhausted."
)]
/// CLI for `draw_demo`.
///
/// Common usage:
/// - Three batches of three: `--assets ./assets`
/// - Reproducible output: `--assets ./assets --seed 7`
/// - Machine-readable output: `--assets ./assets --json`
struct DrawDemoCli {
    #[arg(
        long = "assets",
        value_name = "PATH",
        help = "Directory of markdown recipe documents"
    )]
    assets: PathBuf,
    #[arg(
        long,
        default_value_t = DEFAULT_DRAW_COUNT,
        help = "Number of distinct recipes per batch (0 draws nothing)"
    )]
    count: usize,
    #[arg(
        long,
        default_value_t = DEFAULT_ROUNDS,
        value_parser = parse_positive_usize,
        help = "Number of batches to draw"
    )]
    rounds: usize,
    #[arg(long, help = "Optional deterministic seed")]
    seed: Option<u64>,
    #[arg(long, help = "Print batches and stats as JSON")]
    json: bool,
}

/// JSON report printed by `draw_demo --json`.
#[derive(Debug, Serialize)]
struct DrawReport<'a> {
    source_id: &'a str,
    recipes: usize,
    batches: &'a [Vec<CodeRecipe>],
    stats: PoolStats,
    last_batch_skew: Option<CategorySkew>,
}

/// Run the draw demo with `args_iter` (program name excluded).
pub fn run_draw_demo<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env(LOG_FILTER_ENV))
        .with_writer(std::io::stderr)
        .try_init();

    let Some(cli) =
        parse_cli::<DrawDemoCli, _>(std::iter::once("draw_demo".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let mut config = PoolConfig::default();
    config.seed = cli.seed;
    let source = MarkdownAssetSource::new(MarkdownSourceConfig::new(&cli.assets));
    let pool = RecipePool::new(Box::new(source), config);
    let total = pool.warm_up();

    let batches: Vec<Vec<CodeRecipe>> = (0..cli.rounds).map(|_| pool.draw(cli.count)).collect();
    let last_batch_skew = batches.last().and_then(|batch| category_skew(batch));

    if cli.json {
        let report = DrawReport {
            source_id: pool.source_id(),
            recipes: total,
            batches: &batches,
            stats: pool.stats(),
            last_batch_skew,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "=== source '{}' ({} recipes) ===",
        pool.source_id(),
        total
    );
    for (round, batch) in batches.iter().enumerate() {
        println!("--- batch {} ({} recipes) ---", round + 1, batch.len());
        for recipe in batch {
            if recipe.description.is_empty() {
                println!("  {}", recipe.summary());
            } else {
                println!("  {} - {}", recipe.summary(), recipe.description);
            }
        }
    }
    let stats = pool.stats();
    println!(
        "stats: draws={} refills={} requeues={} dispensed={} capped={} trimmed={}",
        stats.draws,
        stats.refills,
        stats.requeues,
        stats.dispensed,
        stats.capped_draws,
        stats.trimmed
    );
    if let Some(skew) = last_batch_skew {
        println!(
            "last batch: {} categories, max share {:.2}",
            skew.categories, skew.max_share
        );
        for entry in &skew.per_category {
            println!("  {:<16} {} ({:.2})", entry.category, entry.count, entry.share);
        }
    }
    Ok(())
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw.parse::<usize>().map_err(|_| {
        format!(
            "Could not parse --rounds value '{}' as a positive integer",
            raw
        )
    })?;
    if parsed == 0 {
        return Err("--rounds must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn cli_defaults_apply() {
        let cli = DrawDemoCli::try_parse_from(["draw_demo", "--assets", "/tmp/assets"]).unwrap();
        assert_eq!(cli.count, DEFAULT_DRAW_COUNT);
        assert_eq!(cli.rounds, DEFAULT_ROUNDS);
        assert!(cli.seed.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn zero_rounds_are_rejected() {
        let err = DrawDemoCli::try_parse_from(["draw_demo", "--assets", "x", "--rounds", "0"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn missing_assets_flag_is_an_error() {
        assert!(run_draw_demo(Vec::<String>::new().into_iter()).is_err());
    }

    #[test]
    fn help_exits_cleanly() {
        assert!(run_draw_demo(["--help".to_string()].into_iter()).is_ok());
    }

    #[test]
    fn runs_against_a_temporary_asset_directory() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("one.md"), "# One\nFirst.").unwrap();
        std::fs::write(temp.path().join("two.md"), "# Two\nSecond.").unwrap();
        let args = vec![
            "--assets".to_string(),
            temp.path().to_string_lossy().to_string(),
            "--count".to_string(),
            "2".to_string(),
            "--seed".to_string(),
            "5".to_string(),
            "--json".to_string(),
        ];
        assert!(run_draw_demo(args.into_iter()).is_ok());
    }
}
