//! atlas-runner: headless population seeder and stats reporter.
//!
//! Usage:
//!   atlas-runner --seed 42 --count 40 --db scores.db
//!   atlas-runner --db scores.db --keep --keyword 王 --min-total 450
//!   atlas-runner --db scores.db --export-csv out.csv --export-json out.json

use anyhow::Result;
use atlas_core::{
    export, generator,
    rng::AtlasRng,
    stats::{self, StatsReport},
    store::{ScoreStore, StudentFilter},
    subject::TOTAL_MAX,
};
use std::env;
use std::fs;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let count = parse_arg(&args, "--count", 40usize).clamp(10, 120);
    let db = str_arg(&args, "--db").unwrap_or(":memory:");
    let keep = args.iter().any(|a| a == "--keep");
    let keyword = str_arg(&args, "--keyword").unwrap_or("").to_string();
    let min_total = parse_arg(&args, "--min-total", 0i64);
    let max_total = parse_arg(&args, "--max-total", TOTAL_MAX);
    let limit: Option<usize> = str_arg(&args, "--limit").and_then(|v| v.parse().ok());

    println!("Score Atlas — atlas-runner");
    println!("  db:      {db}");
    println!(
        "  started: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!();

    let store = ScoreStore::open(db)?;
    store.migrate()?;

    let existing = store.student_count()?;
    if keep && existing > 0 {
        println!("keeping existing population of {existing} students");
    } else {
        let mut rng = match str_arg(&args, "--seed") {
            Some(v) => AtlasRng::seed_from(v.parse()?),
            None => AtlasRng::from_entropy(),
        };
        let inserted = generator::reseed(&store, count, &mut rng)?;
        println!("seeded {inserted} students");
    }

    // Stats always run over the full filtered set; --limit only caps
    // the ranked listing below.
    let filter = StudentFilter {
        keyword,
        min_total,
        max_total,
        limit: None,
    };
    let students = store.fetch_students(&filter)?;
    let report = stats::compute(&students);
    print_summary(&report);

    if let Some(n) = limit {
        println!();
        println!("=== RANKED LISTING (first {n}) ===");
        let listing = store.fetch_students(&StudentFilter {
            limit: Some(n),
            ..filter
        })?;
        for (rank, s) in listing.iter().enumerate() {
            println!("  {:>3}. {:<6} {:>3}", rank + 1, s.name, s.total);
        }
    }

    // Exports cover the full population, not the filtered view.
    if let Some(path) = str_arg(&args, "--export-csv") {
        let all = store.fetch_students(&StudentFilter::default())?;
        fs::write(path, export::to_csv(&all)?)?;
        println!("wrote CSV export to {path}");
    }
    if let Some(path) = str_arg(&args, "--export-json") {
        let all = store.fetch_students(&StudentFilter::default())?;
        fs::write(path, export::to_json(&all)?)?;
        println!("wrote JSON export to {path}");
    }

    Ok(())
}

fn print_summary(report: &StatsReport) {
    println!("=== POPULATION SUMMARY ===");
    println!("  students:       {}", report.count);
    println!("  avg total:      {:.2}", report.avg_total);
    println!("  max total:      {}", report.max_total);
    println!("  min total:      {}", report.min_total);
    println!("  excellent rate: {:.2}%", report.excellent_rate);
    println!("  qualified rate: {:.2}%", report.qualified_rate);

    println!();
    println!("=== SUBJECT AVERAGES ===");
    for avg in &report.subject_averages {
        println!("  {} | avg {:>6.2} / {}", avg.label, avg.avg, avg.max);
    }

    println!();
    println!("=== SEGMENTS ===");
    for seg in &report.segments {
        println!("  {:<10} {}", seg.label, seg.count);
    }

    println!();
    println!("=== TOP 10 ===");
    for (rank, s) in report.top10.iter().enumerate() {
        println!(
            "  {:>2}. {:<6} total {:>3} | 语 {:>3} 数 {:>3} 英 {:>3} 物 {:>3} 化 {:>3} 生 {:>3}",
            rank + 1,
            s.name,
            s.total,
            s.chinese,
            s.math,
            s.english,
            s.physics,
            s.chemistry,
            s.biology,
        );
    }

    let strongest = report
        .correlations
        .iter()
        .filter(|c| c.x != c.y)
        .max_by(|a, b| {
            a.value
                .abs()
                .partial_cmp(&b.value.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    if let Some(cell) = strongest {
        println!();
        println!(
            "  strongest correlation: {} × {} = {:.4}",
            cell.x, cell.y, cell.value
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
