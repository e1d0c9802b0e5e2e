//! k2gap-select: run the K2GAP selection function over a star catalogue.

mod input;

use clap::{Parser, Subcommand, ValueEnum};
use input::StarTable;
use k2gap_select::{
    evaluate, RegionTable, SelectionConfig, StarColumns, StarEvaluation, DEFAULT_RADIUS_DEG,
};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "k2gap-select")]
#[command(about = "K2 Galactic Archaeology Program target selection function")]
#[command(version)]
struct Cli {
    /// Region table JSON (e.g. the survey's k2circles.json) to use instead of
    /// the bundled one, whose module centres are approximate
    #[arg(long, global = true)]
    regions: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the selection function to a CSV file of stars
    Select {
        /// CSV with columns campaign (or cno), ra, dec, jmag, hmag, kmag; `-` for stdin
        input: PathBuf,
        /// Distance in degrees from the nearest module centre that counts as on-field
        #[arg(long, default_value_t = DEFAULT_RADIUS_DEG)]
        radius: f64,
        /// Approximate an on-silicon footprint check (forces radius to 1.4)
        #[arg(long)]
        simulate_on_silicon: bool,
        /// Print only selected stars
        #[arg(long)]
        selected_only: bool,
        /// Print timing to stderr
        #[arg(long)]
        timing: bool,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Summarise the region table
    Regions,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let loaded;
    let table: &RegionTable = match &cli.regions {
        Some(path) => {
            loaded = RegionTable::from_path(path)?;
            &loaded
        }
        None => {
            tracing::info!("using bundled region table; module centres are approximate");
            RegionTable::bundled()?
        }
    };

    match cli.command {
        Commands::Regions => print_regions(table),
        Commands::Select {
            input,
            radius,
            simulate_on_silicon,
            selected_only,
            timing,
            format,
        } => {
            let stars = read_stars(&input)?;
            let config = SelectionConfig {
                radius,
                simulate_on_silicon,
            };
            let columns = StarColumns::new(
                &stars.campaign[..],
                &stars.ra,
                &stars.dec,
                &stars.jmag,
                &stars.hmag,
                &stars.kmag,
            );

            let start = timing.then(Instant::now);
            let results = evaluate(table, &columns, &config)?;
            if let Some(start_time) = start {
                eprintln!(
                    "Selection of {} stars completed in {:.2} ms",
                    results.len(),
                    start_time.elapsed().as_secs_f64() * 1000.0
                );
            }

            let rows: Vec<(usize, &StarEvaluation)> = results
                .iter()
                .enumerate()
                .filter(|(_, e)| !selected_only || e.selected)
                .collect();

            match format {
                OutputFormat::Table => print_table(&rows, &stars),
                OutputFormat::Json => print_json(&rows, &stars)?,
                OutputFormat::Csv => print_csv(&rows, &stars),
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn read_stars(input: &Path) -> anyhow::Result<StarTable> {
    if input.as_os_str() == "-" {
        return StarTable::read(io::stdin().lock());
    }
    let file = File::open(input)
        .map_err(|e| anyhow::anyhow!("Failed to open star file {:?}: {}", input, e))?;
    StarTable::read(BufReader::new(file))
}

fn print_regions(table: &RegionTable) {
    println!("Source: {}", table.source_name());
    println!("Total regions: {}", table.len());
    for (campaign, count) in table.campaign_counts() {
        println!("  C{:<3} {:>3} modules", campaign, count);
    }
}

fn module_label(module: Option<u8>) -> String {
    module.map_or_else(|| "-".to_string(), |m| m.to_string())
}

fn print_table(rows: &[(usize, &StarEvaluation)], stars: &StarTable) {
    for &(i, e) in rows {
        println!(
            "{:6}: C{:<3} RA={:10.5}° Dec={:+9.5}° J={:6.3} J-K={:6.3} V={:6.3} ccd={:>2}/{:>2} {}",
            i,
            e.campaign,
            stars.ra[i],
            stars.dec[i],
            stars.jmag[i],
            e.observables.color,
            e.observables.vmag,
            module_label(e.observables.ccd_narrow),
            module_label(e.observables.ccd_wide),
            if e.selected { "SELECTED" } else { "-" }
        );
    }

    if rows.is_empty() {
        println!("No stars to report.");
    } else {
        let selected = rows.iter().filter(|(_, e)| e.selected).count();
        println!("\nSelected {} of {} stars", selected, stars.len());
    }
}

#[derive(serde::Serialize)]
struct JsonStar {
    index: usize,
    campaign: i64,
    ra_deg: f64,
    dec_deg: f64,
    color_jk: f64,
    vmag: f64,
    ccd_narrow: Option<u8>,
    ccd_wide: Option<u8>,
    circ_id: i64,
    selected: bool,
}

fn print_json(rows: &[(usize, &StarEvaluation)], stars: &StarTable) -> anyhow::Result<()> {
    let out: Vec<JsonStar> = rows
        .iter()
        .map(|&(i, e)| JsonStar {
            index: i,
            campaign: e.campaign,
            ra_deg: stars.ra[i],
            dec_deg: stars.dec[i],
            color_jk: e.observables.color,
            vmag: e.observables.vmag,
            ccd_narrow: e.observables.ccd_narrow,
            ccd_wide: e.observables.ccd_wide,
            circ_id: e.wide_assignment.raw_id(),
            selected: e.selected,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn print_csv(rows: &[(usize, &StarEvaluation)], stars: &StarTable) {
    println!("index,campaign,ra,dec,color_jk,vmag,ccd_narrow,ccd_wide,circ_id,selected");
    for &(i, e) in rows {
        println!(
            "{},{},{},{},{},{},{},{},{},{}",
            i,
            e.campaign,
            stars.ra[i],
            stars.dec[i],
            e.observables.color,
            e.observables.vmag,
            e.observables.ccd_narrow.map_or(-1, i16::from),
            e.observables.ccd_wide.map_or(-1, i16::from),
            e.wide_assignment.raw_id(),
            e.selected
        );
    }
}
