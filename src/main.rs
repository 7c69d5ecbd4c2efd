use anyhow::{Context, Result, bail};
use log::info;
use std::fs;
use std::path::Path;

use text_diff::cli::{self, Cli, View};
use text_diff::line_diff::decode_input;
use text_diff::pairing::pair_for_side_by_side_view_with_threshold;
use text_diff::{
    DiffReport, DiffStats, Side, calculate_diff, calculate_diff_with_options, check_line_limit,
};

fn main() -> Result<()> {
    env_logger::init();
    let args = cli::parse_args();

    if !(0.0..=1.0).contains(&args.threshold) {
        bail!("--threshold must be between 0.0 and 1.0, got {}", args.threshold);
    }

    let original_bytes = read_input(&args.original)?;
    let modified_bytes = read_input(&args.modified)?;
    let original = decode_input(&original_bytes, Side::Original)
        .with_context(|| format!("Failed to decode {}", args.original.display()))?;
    let modified = decode_input(&modified_bytes, Side::Modified)
        .with_context(|| format!("Failed to decode {}", args.modified.display()))?;
    check_line_limit(original, modified, args.max_lines)?;

    let options = args.diff_options();

    // Stats and the unaligned columns only need the line diff itself
    if args.stats || args.view == View::SideBySide {
        let result = calculate_diff(original, modified);
        log_comparison(&args, result.lines.len());

        if args.stats {
            print_stats(&args, &result.stats);
        } else {
            let columns = pair_for_side_by_side_view_with_threshold(
                &result.lines,
                options.enable_char_diff,
                options.char_diff_threshold,
            );
            println!("{}", serde_json::to_string_pretty(&columns)?);
        }
        return Ok(());
    }

    let report = calculate_diff_with_options(original, modified, &options);
    log_comparison(&args, report.result.lines.len());
    print_rows(&args, &report)?;

    Ok(())
}

fn log_comparison(args: &Cli, lines: usize) {
    info!(
        "compared {} and {}: {} lines",
        args.original.display(),
        args.modified.display(),
        lines
    );
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Emit the collapsed unified or aligned rows as JSON on stdout.
fn print_rows(args: &Cli, report: &DiffReport) -> Result<()> {
    let json = if args.view == View::Unified {
        serde_json::to_string_pretty(&report.unified)?
    } else {
        serde_json::to_string_pretty(&report.side_by_side)?
    };
    println!("{json}");
    Ok(())
}

fn print_stats(args: &Cli, stats: &DiffStats) {
    println!(
        "Comparison of {} and {}",
        args.original.display(),
        args.modified.display()
    );
    println!("─────────────────────────────────────");
    println!("  Added:      {}", stats.added);
    println!("  Removed:    {}", stats.removed);
    println!("  Modified:   {}", stats.modified);
    println!("  Unchanged:  {}", stats.unchanged);
    println!("  Similarity: {:.0}%", stats.similarity);

    if stats.added == 0 && stats.removed == 0 && stats.modified == 0 {
        println!("\n✓ Texts are identical");
    }
}
