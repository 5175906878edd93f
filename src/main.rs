mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use channel_insights::analytics::{DualScoringFilters, SortKey};
use channel_insights::config::AnalyticsConfig;
use channel_insights::error::{Error, Result};
use channel_insights::keywords::{AirtableRecord, FieldDefinition, KeywordFilter};
use channel_insights::scoring::{AbsoluteTier, InsightCategory, RelativeTier};
use channel_insights::synthetic::generate_synthetic_channel;
use channel_insights::format::{format_count, format_fixed, format_percent};
use channel_insights::{analyze_videos, keyword_view, AnalysisReport, AnalysisRequest, ScoredVideo};
use tracing::info;

#[derive(Parser)]
#[command(name = "channel-insights", about = "YouTube channel dual-scoring analytics")]
struct Cli {
    /// Path to the TOML config (defaults to ANALYTICS_CONFIG_PATH or config/analytics.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Keywords(KeywordArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct AnalyzeArgs {
    /// JSON array of scored videos
    #[arg(long, conflicts_with = "synthetic")]
    input: Option<PathBuf>,
    /// Generate N synthetic videos instead of reading a file
    #[arg(long)]
    synthetic: Option<usize>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = "views")]
    sort: String,
    #[arg(long = "absolute-tier")]
    absolute_tiers: Vec<String>,
    #[arg(long = "relative-tier")]
    relative_tiers: Vec<String>,
    #[arg(long)]
    min_absolute: Option<f64>,
    #[arg(long)]
    min_relative: Option<f64>,
    #[arg(long = "insight")]
    insights: Vec<String>,
    #[arg(long)]
    limit: Option<usize>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct KeywordArgs {
    /// JSON array of Airtable records ({id, createdTime, fields})
    #[arg(long)]
    records: PathBuf,
    /// JSON array of field definitions; inferred from the records when absent
    #[arg(long)]
    fields: Option<PathBuf>,
    #[arg(long = "select")]
    selected: Vec<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    web_root: Option<String>,
    /// Persist suggestions to this JSON file instead of memory
    #[arg(long)]
    store: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_path) = AnalyticsConfig::load(cli.config)?;
    if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
        info!(path = %path.display(), "loaded config");
    }

    let command = cli.command.unwrap_or_else(|| {
        Command::Analyze(AnalyzeArgs {
            synthetic: Some(24),
            seed: 42,
            sort: "combined".to_string(),
            ..AnalyzeArgs::default()
        })
    });

    match command {
        Command::Analyze(args) => run_analyze(args, &config),
        Command::Keywords(args) => run_keywords(args),
        Command::Serve(args) => server::serve(apply_serve_args(config, args)).await,
    }
}

fn run_analyze(args: AnalyzeArgs, config: &AnalyticsConfig) -> Result<()> {
    let videos: Vec<ScoredVideo> = match (&args.input, args.synthetic) {
        (Some(path), _) => read_json(path)?,
        (None, Some(count)) => generate_synthetic_channel("synthetic", count, args.seed),
        (None, None) => {
            return Err(Error::InvalidInput(
                "pass --input <videos.json> or --synthetic <count>".to_string(),
            ))
        }
    };

    let request = AnalysisRequest {
        filters: build_filters(&args)?,
        sort: SortKey::from_str(&args.sort),
        limit: args.limit,
    };
    request.validate()?;
    let report = analyze_videos(&videos, &request, &config.combined);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_report(&report);
    Ok(())
}

fn build_filters(args: &AnalyzeArgs) -> Result<DualScoringFilters> {
    let absolute_tiers =
        parse_all(&args.absolute_tiers, AbsoluteTier::from_str, "absolute tier")?;
    let relative_tiers =
        parse_all(&args.relative_tiers, RelativeTier::from_str, "relative tier")?;
    let insight_categories =
        parse_all(&args.insights, InsightCategory::from_str, "insight category")?;

    Ok(DualScoringFilters {
        absolute_tiers,
        relative_tiers,
        min_absolute_score: args.min_absolute,
        min_relative_score: args.min_relative,
        insight_categories,
    })
}

fn parse_all<T>(values: &[String], parse: fn(&str) -> Option<T>, what: &str) -> Result<Vec<T>> {
    values
        .iter()
        .map(|value| {
            parse(value).ok_or_else(|| Error::InvalidInput(format!("invalid {}: {}", what, value)))
        })
        .collect()
}

fn print_report(report: &AnalysisReport) {
    let stats = &report.stats;
    println!(
        "Videos: {} matched of {} (sorted by {})",
        format_count(report.matched as u64),
        format_count(report.total as u64),
        report.sort.label()
    );
    println!(
        "Dual-scored: {} | avg absolute {} | avg relative {}",
        stats.total_with_scores,
        format_fixed(stats.average_absolute_score, 1),
        format_fixed(stats.average_relative_score, 1)
    );

    println!("\nAbsolute tiers:");
    for (tier, count) in &stats.absolute_tier_distribution {
        println!("  {:<18} {}", tier.label(), count);
    }
    println!("Relative tiers:");
    for (tier, count) in &stats.relative_tier_distribution {
        println!("  {:<18} {}", tier.label(), count);
    }
    if !stats.insight_distribution.is_empty() {
        println!("Insights:");
        for (category, count) in &stats.insight_distribution {
            println!("  {:<18} {}", category.key(), count);
        }
    }

    if report.videos.is_empty() {
        return;
    }
    println!();
    for view in &report.videos {
        let video = &view.video;
        let engagement = video
            .metrics()
            .map(|metrics| format_percent(metrics.engagement_rate))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "- {} | views {} | abs {} ({}) | rel {} ({}) | ratio {} | eng {} | {}",
            if video.title.is_empty() { &video.video_id } else { &video.title },
            format_count(video.view_count.unwrap_or(0)),
            score_text(video.absolute_score),
            view.absolute_tier.map(|tier| tier.label()).unwrap_or("-"),
            score_text(video.relative_score),
            view.relative_tier.map(|tier| tier.label()).unwrap_or("-"),
            video
                .relative_ratio
                .map(|ratio| format!("{}x", format_fixed(ratio, 2)))
                .unwrap_or_else(|| "-".to_string()),
            engagement,
            view.insight
                .as_ref()
                .map(|insight| insight.category.key())
                .unwrap_or("-"),
        );
    }
}

fn score_text(score: Option<f64>) -> String {
    score
        .map(|value| format_fixed(value, 1))
        .unwrap_or_else(|| "-".to_string())
}

fn run_keywords(args: KeywordArgs) -> Result<()> {
    let records: Vec<AirtableRecord> = read_json(&args.records)?;
    let fields: Vec<FieldDefinition> = match args.fields.as_ref() {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let view = keyword_view(&records, &fields, args.selected);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }
    print_keywords(&view);
    Ok(())
}

fn print_keywords(view: &KeywordFilter) {
    println!("Keywords ({}):", view.available_keywords.len());
    for group in &view.available_keywords {
        println!("  {} ({})", group.keyword, group.count);
    }

    if view.selected_keywords.is_empty() {
        println!("\nTitles ({}):", view.filtered_titles.len());
    } else {
        println!(
            "\nTitles matching {} ({}):",
            view.selected_keywords.join(", "),
            view.filtered_titles.len()
        );
    }
    for title in &view.filtered_titles {
        println!("- {} [{}]", title.title, title.keywords.join(", "));
    }
}

fn apply_serve_args(mut config: AnalyticsConfig, args: ServeArgs) -> AnalyticsConfig {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(web_root) = args.web_root {
        config.server.web_root = Some(web_root);
    }
    if let Some(store) = args.store {
        config.store.path = Some(store);
    }
    config
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
