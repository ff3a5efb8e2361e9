mod config;
mod output;
mod parse;

use clap::Parser;
use rbo_core::constants::DEFAULT_PERSISTENCE;
use rbo_core::{RankItem, ScoreOrder, average_overlap, rank_by_score, rbo};
use std::path::{Path, PathBuf};

use crate::config::RboConfig;
use crate::output::Report;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "rbo", version, about = "Compare two rankings with rank-biased overlap")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Compute RBO (min, res, ext) between two rankings
    Compare(CompareArgs),
    /// Write a commented default config file
    Init {
        /// Where to write it (default: ~/.config/rbo/config.toml, or under $XDG_CONFIG_HOME)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Parser)]
struct CompareArgs {
    /// First ranking: JSON array (strings, or arrays for ties) or one rank per line, ties tab-separated
    #[arg(long)]
    a: PathBuf,

    /// Second ranking, same format as --a
    #[arg(long)]
    b: PathBuf,

    /// Persistence: probability of looking one rank deeper (0 < p < 1). Default: 0.9
    #[arg(long)]
    p: Option<f64>,

    /// Evaluation depth. Default: length of the shorter ranking
    #[arg(long)]
    depth: Option<usize>,

    /// Inputs are item -> score maps (JSON object, or "item score" lines) instead of rankings
    #[arg(long)]
    scores: bool,

    /// With --scores: lower scores rank first
    #[arg(long)]
    ascending: bool,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Show what was loaded and which settings were used
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/rbo/config.toml, or under $XDG_CONFIG_HOME)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare(args) => run_compare(args),
        Commands::Init { config: target } => {
            let path = target
                .or_else(config::default_path)
                .unwrap_or_else(|| bail("No config location: set HOME or XDG_CONFIG_HOME, or pass --config"));
            config::write_template(&path).unwrap_or_else(|e| bail(e));
            println!("Created config at {}", path.display());
            println!("Edit it to set your default p, depth, etc.");
        }
    }
}

fn read_input(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read {}: {e}", path.display())))
}

/// Load one ranking from either format, owning the items.
fn load_ranking(path: &Path, scores: bool, order: ScoreOrder, verbose: bool) -> Vec<RankItem<String>> {
    let content = read_input(path);

    let ranking = if scores {
        let map = parse::parse_scores(&content)
            .unwrap_or_else(|e| bail(format!("{}: {e}", path.display())));
        let ranked = rank_by_score(&map, order)
            .unwrap_or_else(|e| bail(format!("{}: {e}", path.display())));
        ranked
            .into_iter()
            .map(|rank| RankItem::tied(rank.iter().map(|item| (*item).clone())))
            .collect()
    } else {
        parse::parse_ranking(&content).unwrap_or_else(|e| bail(format!("{}: {e}", path.display())))
    };

    if verbose {
        let ties = ranking.iter().filter(|rank| rank.is_tie()).count();
        let items: usize = ranking.iter().map(RankItem::len).sum();
        eprintln!(
            "Loaded {}: {} ranks, {} items, {} tied ranks",
            path.display(),
            ranking.len(),
            items,
            ties,
        );
    }
    ranking
}

fn run_compare(args: CompareArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().or_else(config::default_path);
    let cfg = match &config_path {
        Some(path) => RboConfig::load(path).unwrap_or_else(|e| bail(e)),
        None => RboConfig::default(),
    };

    let p = args.p.or(cfg.p).unwrap_or(DEFAULT_PERSISTENCE);
    let depth = args.depth.or(cfg.depth);
    let ascending = args.ascending || cfg.ascending.unwrap_or(false);
    let order = if ascending { ScoreOrder::Ascending } else { ScoreOrder::Descending };

    if ascending && !args.scores {
        eprintln!("Warning: --ascending has no effect without --scores.");
    }

    if args.verbose {
        let p_source = if args.p.is_some() {
            "flag"
        } else if cfg.p.is_some() {
            "config"
        } else {
            "default"
        };
        match &config_path {
            Some(path) => eprintln!("Config: {}", path.display()),
            None => eprintln!("Config: none (HOME not set)"),
        }
        eprintln!("p = {p} ({p_source}), depth = {}", depth.map_or("shorter length".to_string(), |d| d.to_string()));
    }

    let list_a = load_ranking(&args.a, args.scores, order, args.verbose);
    let list_b = load_ranking(&args.b, args.scores, order, args.verbose);

    let result = rbo(&list_a, &list_b, p, depth).unwrap_or_else(|e| bail(e));
    let evaluated_depth = depth.unwrap_or_else(|| list_a.len().min(list_b.len()));
    let average = average_overlap(&list_a, &list_b, depth).unwrap_or_else(|e| bail(e));

    if args.verbose && evaluated_depth > list_a.len().max(list_b.len()) {
        eprintln!(
            "Depth {evaluated_depth} exceeds both rankings; only observed ranks are used",
        );
    }

    let report = Report {
        result,
        upper: result.upper(),
        average_overlap: average,
        p,
        depth: evaluated_depth,
        len_a: list_a.len(),
        len_b: list_b.len(),
    };

    if args.json {
        output::print_json(&report);
    } else {
        output::print_table(&report);
    }
}
