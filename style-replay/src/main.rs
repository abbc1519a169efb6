//! style-replay - Replay shopping actions through the Stylecast state container

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use libstylecast::config::CartMergePolicy;
use libstylecast::logging::{LogFormat, LoggingConfig};
use libstylecast::service::cart::CartSummary;
use libstylecast::service::recommendations::recommendation_reason;
use libstylecast::{Action, AppState, Catalog, Config, StaticCatalog, Store, StylecastError};

#[derive(Parser, Debug)]
#[command(name = "style-replay")]
#[command(version, about = "Replay shopping actions and print the resulting state")]
#[command(long_about = r#"Replay a stream of shopping actions through the Stylecast state container
and print the state they leave behind.

INPUT FORMAT:
    One JSON action per line, tagged by "type" with camelCase fields.
    Blank lines and lines starting with '#' are skipped.

    {"type":"NAVIGATE_TO","screen":"discovery"}
    {"type":"ADD_TO_CART","productId":"prod_1"}
    {"type":"ADD_TO_CART","productId":"prod_1","variantId":"size_m"}
    {"type":"REMOVE_FROM_CART","productId":"prod_1"}
    {"type":"START_TRY_ON","productId":"prod_3"}
    {"type":"NEXT_OUTFIT"}
    {"type":"SET_LOADING","isLoading":true}

    Unknown action types are accepted and leave the state unchanged.

EXAMPLES:
    # Replay a recorded session
    style-replay session.jsonl

    # Read actions from stdin
    echo '{"type":"ADD_TO_CART","productId":"prod_1"}' | style-replay

    # Start with the outfit deck loaded so NEXT_OUTFIT can advance
    style-replay --load-deck session.jsonl

    # Keep one cart line per size
    style-replay --merge-policy by-variant session.jsonl

    # Human-readable overview with cart totals
    style-replay --format summary session.jsonl

    # Continue from a saved state, then save the result
    style-replay --initial-state before.json --format json more.jsonl > after.json

    # Watch the dispatch log at a readable pace
    style-replay --verbose --delay 250ms session.jsonl

OUTPUT FORMATS:
    pretty  - Indented JSON state (default)
    json    - Compact JSON state on one line
    summary - Screen, liked styles and cart totals as text

EXIT CODES:
    0 - Success
    1 - Error (unreadable input, config error, rejected action)
    3 - Invalid input (malformed action or state JSON)
"#)]
struct Cli {
    /// Action stream, one JSON action per line
    #[arg(value_name = "FILE")]
    #[arg(help = "File with one JSON action per line (reads stdin when omitted or '-')")]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    /// How repeated adds of a product are merged
    #[arg(long, value_enum, value_name = "POLICY")]
    #[arg(help = "Cart merge policy, overriding the config file")]
    merge_policy: Option<MergePolicy>,

    /// Start from a saved state instead of an empty session
    #[arg(long, value_name = "FILE")]
    initial_state: Option<PathBuf>,

    /// Load the catalog's outfit deck before replaying
    #[arg(long)]
    load_deck: bool,

    /// Skip rejected actions instead of stopping
    #[arg(short, long)]
    keep_going: bool,

    /// Pause between actions
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    #[arg(help = "Pause between actions, e.g. 250ms or 1s")]
    delay: Option<Duration>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    #[arg(help = "Config file (default: $STYLECAST_CONFIG or ~/.config/stylecast/config.toml)")]
    config: Option<PathBuf>,

    /// Log output format (text, json, pretty)
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MergePolicy {
    ByProduct,
    ByVariant,
}

impl From<MergePolicy> for CartMergePolicy {
    fn from(policy: MergePolicy) -> Self {
        match policy {
            MergePolicy::ByProduct => CartMergePolicy::ByProduct,
            MergePolicy::ByVariant => CartMergePolicy::ByVariant,
        }
    }
}

/// Knobs for a single replay
#[derive(Debug, Default)]
struct ReplayOptions {
    keep_going: bool,
    delay: Option<Duration>,
}

/// Outcome counts of a replay
#[derive(Debug, Default, PartialEq, Eq)]
struct ReplayStats {
    applied: usize,
    rejected: usize,
}

fn main() {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if let Some(format) = cli.log_format {
        logging.format = format;
    }
    logging.verbose = cli.verbose;
    logging.init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    let mut state = match cli.initial_state {
        Some(ref path) => load_state(path)?,
        None => AppState::with_config(config.store),
    };
    if let Some(policy) = cli.merge_policy {
        state.config.cart_merge = policy.into();
    }

    let catalog = StaticCatalog::new();
    let mut store = Store::with_state(state);
    if cli.load_deck && store.state().outfit_photos.is_empty() {
        store.dispatch(Action::SetOutfitPhotos {
            photos: catalog.outfit_photos(),
        })?;
    }

    let options = ReplayOptions {
        keep_going: cli.keep_going,
        delay: cli.delay,
    };

    let stats = match cli.input.as_deref() {
        None => replay(&mut store, io::stdin().lock(), &options)?,
        Some(path) if path == Path::new("-") => replay(&mut store, io::stdin().lock(), &options)?,
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            replay(&mut store, BufReader::new(file), &options)?
        }
    };
    tracing::info!(
        applied = stats.applied,
        rejected = stats.rejected,
        "Replay finished"
    );

    let output = render(
        store.state(),
        cli.format,
        &catalog,
        config.checkout.tax_rate_bps,
    )?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    Ok(())
}

fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<StylecastError>()
        .map(StylecastError::exit_code)
        .unwrap_or(1)
}

fn load_state(path: &Path) -> Result<AppState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state from {}", path.display()))?;
    let state: AppState = serde_json::from_str(&content).map_err(|e| {
        StylecastError::InvalidInput(format!("{} is not a saved state: {}", path.display(), e))
    })?;
    state
        .validate()
        .with_context(|| format!("{} is not a usable saved state", path.display()))?;
    Ok(state)
}

/// Parse one line of the action stream
///
/// Returns `None` for blank lines and `#` comments.
fn parse_line(line_no: usize, line: &str) -> Result<Option<Action>, StylecastError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    serde_json::from_str(line)
        .map(Some)
        .map_err(|e| StylecastError::InvalidInput(format!("line {}: {}", line_no, e)))
}

/// Dispatch every action in `reader` through the store
///
/// Stops at the first malformed line. A rejected action stops the replay
/// too unless `keep_going` is set; actions before it stay applied.
fn replay<R: BufRead>(store: &mut Store, reader: R, options: &ReplayOptions) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.context("Failed to read action stream")?;
        let Some(action) = parse_line(line_no, &line)? else {
            continue;
        };

        if stats.applied + stats.rejected > 0 {
            if let Some(delay) = options.delay {
                std::thread::sleep(delay);
            }
        }

        let kind = action.kind();
        match store.dispatch(action) {
            Ok(_) => stats.applied += 1,
            Err(e) if options.keep_going => {
                tracing::warn!(line = line_no, action = kind, error = %e, "Skipping rejected action");
                stats.rejected += 1;
            }
            Err(e) => {
                return Err(StylecastError::from(e))
                    .with_context(|| format!("line {}: {} rejected", line_no, kind));
            }
        }
    }

    Ok(stats)
}

fn render(
    state: &AppState,
    format: OutputFormat,
    catalog: &dyn Catalog,
    tax_rate_bps: u32,
) -> Result<String> {
    let output = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(state)?,
        OutputFormat::Json => serde_json::to_string(state)?,
        OutputFormat::Summary => render_summary(state, catalog, tax_rate_bps),
    };
    Ok(output)
}

fn render_summary(state: &AppState, catalog: &dyn Catalog, tax_rate_bps: u32) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Screen:     {}", state.current_screen.title());
    if state.outfit_photos.is_empty() {
        let _ = writeln!(out, "Outfits:    none loaded");
    } else {
        let _ = writeln!(
            out,
            "Outfits:    {} of {}",
            state.current_outfit_index.saturating_add(1),
            state.outfit_photos.len()
        );
    }

    let liked = state.liked_styles();
    if liked.is_empty() {
        let _ = writeln!(out, "Liked:      nothing yet");
    } else {
        let _ = writeln!(out, "Liked:      {}", liked.join(", "));
    }
    let _ = writeln!(out, "For you:    {}", recommendation_reason(&state.liked_outfits));

    if let Some(ref product_id) = state.selected_product_for_try_on {
        let _ = writeln!(out, "Trying on:  {}", catalog.product_or_placeholder(product_id).title);
    }

    let summary = CartSummary::compute(&state.cart_items, catalog, tax_rate_bps);
    if summary.is_empty() {
        let _ = write!(out, "Cart:       empty");
        return out;
    }

    let _ = writeln!(out, "Cart:       {} items", summary.total_items);
    for line in &summary.lines {
        let title = match line.item.variant_id {
            Some(ref variant) => format!("{} ({})", line.product.title, variant),
            None => line.product.title.clone(),
        };
        let _ = writeln!(
            out,
            "  {:>3} x {:<36}{:>10}",
            line.item.quantity,
            title,
            line.line_total.to_string()
        );
    }
    let _ = writeln!(out, "Subtotal:   {:>39}", summary.subtotal.to_string());
    let _ = writeln!(out, "Tax:        {:>39}", summary.tax.to_string());
    let _ = write!(out, "Total:      {:>39}", summary.total.to_string());
    out
}
