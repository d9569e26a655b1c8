mod consolidate;
mod detect;
mod discovery;
mod fetch;
mod graph;
mod parser;
mod pipeline;
mod record;
mod settings;
mod store;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use consolidate::synonyms::SynonymMap;
use consolidate::Consolidator;
use detect::Detector;
use discovery::Crawl;
use fetch::{HttpSource, PageSource};
use graph::{Namespaces, Provenance};
use settings::Settings;

#[derive(Parser)]
#[command(name = "recipe_kg", about = "Recipe site to knowledge graph pipeline")]
struct Cli {
    /// Settings file (default: ./recipe_kg.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl category pages and save recipe URLs
    Discover {
        /// Start paths (default: configured scopes)
        #[arg(long, num_args = 1..)]
        scope: Vec<String>,
        /// Stop after this many recipes
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(short, long, default_value = "recipe_urls.json")]
        output: PathBuf,
    },
    /// Extract one recipe page and print it as JSON
    Extract { url: String },
    /// Full pipeline: discover, extract, detect, consolidate, write Turtle
    Run {
        /// Start paths, or a single recipe URL
        #[arg(long, num_args = 1..)]
        scope: Vec<String>,
        /// Stop after this many recipes (discovered or listed)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(short, long, default_value = "knowledge_graph.ttl")]
        output: PathBuf,
        /// Write the extracted records before consolidation
        #[arg(long)]
        save_raw: Option<PathBuf>,
        /// Skip discovery and extraction, consolidate a saved dump
        #[arg(long, conflicts_with_all = ["urls", "scope"])]
        load_raw: Option<PathBuf>,
        /// Skip discovery, extract the URLs listed in a `discover` output file
        #[arg(long, conflicts_with = "scope")]
        urls: Option<PathBuf>,
        /// Minimum number of recipes a label needs to be kept
        #[arg(long)]
        min_frequency: Option<usize>,
        /// Synonym table (TOML) replacing the built-in one
        #[arg(long)]
        synonyms: Option<PathBuf>,
    },
    /// Merge raw dumps; the first record per URL wins
    Merge {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Discover { scope, limit, output } => {
            let source = HttpSource::new(&settings)?;
            let scopes = if scope.is_empty() { settings.default_scopes.clone() } else { scope };
            let found = Crawl::new(&settings.base_url, &settings.blocked_paths, limit)?
                .run(&source, &scopes)
                .await;
            store::save_urls(&output, &found.recipes)?;
            println!(
                "Found {} recipes ({} pages crawled, {} errors). Saved to {}",
                found.recipes.len(),
                found.pages_crawled,
                found.errors,
                output.display()
            );
            Ok(())
        }
        Commands::Extract { url } => {
            let source = HttpSource::new(&settings)?;
            let html = source.fetch(&url).await?;
            let record = parser::parse_recipe(&html, &url);
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Commands::Run {
            scope,
            limit,
            output,
            save_raw,
            load_raw,
            urls,
            min_frequency,
            synonyms,
        } => {
            let opts = RunOptions {
                scope,
                limit,
                output,
                save_raw,
                load_raw,
                urls,
                min_frequency: min_frequency.unwrap_or(settings.min_frequency),
                synonyms: synonyms.or_else(|| settings.synonyms_path.clone()),
            };
            run(&settings, opts).await
        }
        Commands::Merge { inputs, output } => {
            let merged = store::merge_raw(&inputs)?;
            store::save_raw(&output, &merged)?;
            println!(
                "Merged {} files into {} records. Saved to {}",
                inputs.len(),
                merged.len(),
                output.display()
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

struct RunOptions {
    scope: Vec<String>,
    limit: Option<usize>,
    output: PathBuf,
    save_raw: Option<PathBuf>,
    load_raw: Option<PathBuf>,
    urls: Option<PathBuf>,
    min_frequency: usize,
    synonyms: Option<PathBuf>,
}

async fn run(settings: &Settings, opts: RunOptions) -> Result<()> {
    let detector = Detector::new()?;

    let records = match &opts.load_raw {
        Some(path) => {
            let mut records = store::load_raw(path)?;
            println!("Loaded {} records from {}", records.len(), path.display());
            let filled = pipeline::fill_detection(&mut records, &detector);
            if filled > 0 {
                info!("Ran detection for {} records without it", filled);
            }
            records
        }
        None => {
            let source = HttpSource::new(settings)?;

            // Phase 1: Discovery
            let t_discover = Instant::now();
            let recipe_urls = resolve_urls(settings, &opts, &source).await?;
            println!(
                "Found {} recipes in {:.1}s",
                recipe_urls.len(),
                t_discover.elapsed().as_secs_f64()
            );

            // Phase 2+3: Extraction with per-record detection
            let t_extract = Instant::now();
            let (records, stats) = pipeline::extract_batch(&source, &recipe_urls, &detector).await?;
            println!(
                "Extracted {} pages ({} ok, {} errors) in {:.1}s",
                stats.total,
                stats.ok,
                stats.errors,
                t_extract.elapsed().as_secs_f64()
            );
            records
        }
    };

    if let Some(path) = &opts.save_raw {
        store::save_raw(path, &records)?;
        println!("Raw extraction data saved to {}", path.display());
    }

    // Phase 4: Consolidation
    let synonyms = match &opts.synonyms {
        Some(path) => SynonymMap::from_path(path)?,
        None => SynonymMap::builtin()?,
    };
    info!("Synonym table: {} variants", synonyms.len());
    let consolidated = Consolidator::new(opts.min_frequency, synonyms).process(records);
    let report = &consolidated.report;
    for (category, r) in &report.per_category {
        println!("  {:<16} {:>4} / {:<4} labels kept", category.to_string(), r.promoted, r.candidates);
    }
    println!("  {} ingredients, {} units", report.ingredients, report.units);

    // Phase 5: Graph
    let ns = Namespaces::new(&settings.graph_base)?;
    let provenance = Provenance {
        source: settings.base_url.clone(),
        generated_at: Some(chrono::Utc::now()),
    };
    let graph = graph::emit(
        &consolidated.records,
        &consolidated.vocabularies,
        &consolidated.ontology,
        &ns,
        &provenance,
    );
    store::write_text(&opts.output, &graph::to_turtle(&graph, &ns.prefixes()))?;
    println!(
        "Knowledge graph ({} recipes, {} triples) saved to {}",
        consolidated.records.len(),
        graph.len(),
        opts.output.display()
    );
    Ok(())
}

/// Recipe URLs for a run: a URL file, a single recipe given as scope, or a crawl.
async fn resolve_urls<S: PageSource>(settings: &Settings, opts: &RunOptions, source: &S) -> Result<Vec<String>> {
    if let Some(path) = &opts.urls {
        let listed = store::load_urls(path)?;
        let urls = pipeline::unique_urls(listed, opts.limit);
        info!("Using {} URLs from {}", urls.len(), path.display());
        return Ok(urls);
    }

    if let [only] = opts.scope.as_slice() {
        if discovery::is_recipe_url(only) {
            let url = absolute_url(&settings.base_url, only)?;
            println!("Scope is a single recipe: {}", url);
            return Ok(vec![url]);
        }
    }

    let scopes = if opts.scope.is_empty() {
        settings.default_scopes.clone()
    } else {
        opts.scope.clone()
    };
    let found = Crawl::new(&settings.base_url, &settings.blocked_paths, opts.limit)?
        .run(source, &scopes)
        .await;
    Ok(found.recipes)
}

fn absolute_url(base: &str, href: &str) -> Result<String> {
    let base = url::Url::parse(base).with_context(|| format!("Invalid base URL: {}", base))?;
    let joined = base
        .join(href)
        .with_context(|| format!("Invalid recipe URL: {}", href))?;
    Ok(joined.to_string())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
