mod cycles;
mod db;
mod model;
mod output;
mod parser;
mod pipeline;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pushjerk_log", about = "Rebuild a training log from archived PushJerk pages")]
struct Cli {
    /// SQLite store for raw pages and cycle names
    #[arg(long, global = true, default_value = db::DEFAULT_DB_PATH)]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a raw page archive (JSON array of pages) into the store
    Import {
        /// Archive file, e.g. data/pushjerk_raw_pages.json
        file: PathBuf,
    },
    /// Rebuild workouts, cycles, weeks and sampling pools from stored pages
    Process {
        /// Output directory for the JSON files
        #[arg(short, long, default_value = output::DEFAULT_OUT_DIR)]
        out: PathBuf,
    },
    /// Show store statistics
    Stats,
    /// Cycles overview table from the last processed output
    Cycles {
        #[arg(short, long, default_value = output::DEFAULT_OUT_DIR)]
        out: PathBuf,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Give a cycle a custom name (kept across reprocessing runs)
    Rename { cycle_id: u32, name: String },
    /// Store the names from the last processed cycles.json
    BackupNames {
        #[arg(short, long, default_value = output::DEFAULT_OUT_DIR)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let conn = db::connect(&cli.db)?;
    db::init_schema(&conn)?;

    let result = match cli.command {
        Commands::Import { file } => {
            let pages = db::load_archive(&file)?;
            let inserted = db::insert_pages(&conn, &pages)?;
            println!("Imported {} pages from {}", inserted, file.display());
            Ok(())
        }
        Commands::Process { out } => {
            let pages = db::fetch_pages(&conn)?;
            if pages.is_empty() {
                println!("No raw pages stored. Run 'import' first.");
                return Ok(());
            }
            let names = db::fetch_cycle_names(&conn)?;

            println!("Processing {} pages...", pages.len());
            let run = process_pages(&pages, &names)?;
            let summary = output::write_all(&out, &run)?;
            summary.print();
            Ok(())
        }
        Commands::Stats => {
            let s = db::get_stats(&conn)?;
            let range = match (s.first_page, s.last_page) {
                (Some(lo), Some(hi)) => format!("{}-{}", lo, hi),
                _ => "None".to_string(),
            };
            println!("Pages:        {}", s.pages);
            println!("Page range:   {}", range);
            println!("Named cycles: {}", s.named_cycles);
            Ok(())
        }
        Commands::Cycles { out, limit } => {
            let cycles = output::read_cycles(&out)?;
            if cycles.is_empty() {
                println!("No cycles with more than 2 weeks.");
                return Ok(());
            }

            println!(
                "{:>4} | {:<28} | {:<20} | {:>7} | {:>5} | {:>8}",
                "ID", "Name", "Start", "Planned", "Weeks", "Workouts"
            );
            println!("{}", "-".repeat(88));

            for c in cycles.iter().rev().take(limit) {
                let planned = c.total_weeks.map(|w| w.to_string()).unwrap_or_else(|| "-".into());
                println!(
                    "{:>4} | {:<28} | {:<20} | {:>7} | {:>5} | {:>8}",
                    c.cycle_id,
                    truncate(&c.name, 28),
                    truncate(&c.start_date, 20),
                    planned,
                    c.week_count(),
                    c.workouts.len()
                );
            }

            println!("\n{} cycles", cycles.len());
            Ok(())
        }
        Commands::Rename { cycle_id, name } => {
            db::save_cycle_names(&conn, &[(cycle_id, name.clone())])?;
            println!("Cycle {} is now '{}'. Run 'process' to apply.", cycle_id, name);
            Ok(())
        }
        Commands::BackupNames { out } => {
            let cycles = output::read_cycles(&out)?;
            let names: Vec<(u32, String)> =
                cycles.into_iter().map(|c| (c.cycle_id, c.name)).collect();
            let saved = db::save_cycle_names(&conn, &names)?;
            println!("Backed up {} cycle names", saved);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Feed pages through one run, oldest first, with a progress bar.
fn process_pages(
    pages: &[db::RawPage],
    names: &std::collections::HashMap<u32, String>,
) -> anyhow::Result<pipeline::Reprocessed> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let run = pipeline::reprocess(pb.wrap_iter(pages.iter()), names);
    pb.finish_and_clear();
    Ok(run)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
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
