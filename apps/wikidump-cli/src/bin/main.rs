use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use indicatif::ProgressBar;
use tracing::info;

use wikidump_cli::cli::{Cli, Commands};
use wikidump_cli::{base_dir, init_tracing, load_settings, parse_query, pick_path, read_queries};
use wikidump_core::config::{Settings, StrategyConfig};
use wikidump_core::{Query, Resolution};
use wikidump_index::HashIndex;
use wikidump_resolve::{resolve, Strategy};

struct ResolveArgs {
    queries: Vec<String>,
    queries_file: Option<PathBuf>,
    strategy: Strategy,
    dump: Option<PathBuf>,
    index: Option<PathBuf>,
    batch_lines: Option<usize>,
    total_lines: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = load_settings()?;

    match cli.command {
        Commands::Resolve { queries, queries_file, strategy, dump, index, batch_lines, total_lines } => run_resolve(
            &settings,
            ResolveArgs { queries, queries_file, strategy, dump, index, batch_lines, total_lines },
        ),
        Commands::BuildIndex { dump, index } => run_build_index(&settings, dump, index),
        Commands::Compare { dump, batch_lines } => run_compare(&settings, dump, batch_lines),
    }
}

fn run_resolve(settings: &Settings, args: ResolveArgs) -> anyhow::Result<()> {
    let base = base_dir();
    let mut queries: Vec<_> = args.queries.iter().map(|q| parse_query(q)).collect();
    if let Some(file) = &args.queries_file {
        queries.extend(read_queries(file)?);
    }
    if queries.is_empty() {
        anyhow::bail!("no queries given");
    }

    let dump = pick_path(args.dump, settings.dump.resolved_path(&base), "dump")?;
    let mut config = settings.search.clone();
    if let Some(n) = args.batch_lines {
        config.batch_line_count = n;
    }
    if args.total_lines.is_some() {
        config.progress_hint = args.total_lines;
    }

    let index = match args.strategy {
        Strategy::Hash => {
            let path = pick_path(args.index, settings.index.resolved_path(&base), "index")?;
            info!(path = %path.display(), "loading hash index");
            let index = HashIndex::load(&path)?;
            index.check_dump(&dump)?;
            Some(index)
        }
        Strategy::Heuristic | Strategy::Naive => None,
    };

    let docs = resolve(&dump, &queries, args.strategy, index.as_ref(), &config)?;
    let rows: Vec<_> = queries
        .iter()
        .zip(&docs)
        .map(|(q, d)| serde_json::json!({ "query": q, "document": d }))
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn run_build_index(settings: &Settings, dump: Option<PathBuf>, index: Option<PathBuf>) -> anyhow::Result<()> {
    let base = base_dir();
    let dump = pick_path(dump, settings.dump.resolved_path(&base), "dump")?;
    let out = pick_path(index, settings.index.resolved_path(&base), "index")?;

    println!("Hash index build\n================");
    println!("Dump : {}", dump.display());
    println!("Index: {}", out.display());
    let started = Instant::now();
    let index = HashIndex::build_with_progress(&dump, ProgressBar::new(0))?;
    println!("Indexed {} distinct lines in {:.2?}", index.len(), started.elapsed());
    index.save(&out)?;
    println!("✅ Hash index stored in {}", out.display());
    Ok(())
}

fn workloads() -> Vec<(&'static str, Vec<Query>)> {
    let ten = vec![
        Query::new("Heat", Some(1995)),
        Query::new("The Cookout", None),
        Query::new("Jumanji 2", None),
        Query::new("Jumanji", None),
        Query::new("Toy Story", None),
        Query::new("Toy Story 3", None),
        Query::new("Toy Story 2", None),
        Query::new("The Cookout", None),
        Query::new("Deadfall", None),
        Query::new("Never Talk to Strangers", None),
    ];
    vec![("1_query", ten[..1].to_vec()), ("5_query", ten[..5].to_vec()), ("10_query", ten)]
}

fn run_compare(settings: &Settings, dump: Option<PathBuf>, batch_lines: usize) -> anyhow::Result<()> {
    let dump = pick_path(dump, settings.dump.resolved_path(&base_dir()), "dump")?;
    let config = StrategyConfig { batch_line_count: batch_lines, progress_hint: None, ..settings.search.clone() };

    let started = Instant::now();
    let index = HashIndex::build(&dump)?;
    println!("index build: {:.3} ms", started.elapsed().as_secs_f64() * 1000.0);

    for strategy in Strategy::ALL {
        for (label, queries) in workloads() {
            let started = Instant::now();
            let docs = resolve(&dump, &queries, strategy, Some(&index), &config)?;
            let summary = Resolution::of(&docs);
            println!(
                "{strategy}_{label}: {:.3} ms ({}/{} resolved)",
                started.elapsed().as_secs_f64() * 1000.0,
                summary.resolved,
                summary.total
            );
        }
    }
    Ok(())
}
