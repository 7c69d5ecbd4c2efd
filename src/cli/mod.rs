use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::DiffOptions;
use crate::context::DEFAULT_CONTEXT_LINES;

#[derive(Parser, Debug)]
#[command(name = "text-diff", about = "Line and character level comparison of two texts")]
pub struct Cli {
    /// Path to the original text.
    pub original: PathBuf,

    /// Path to the modified text.
    pub modified: PathBuf,

    /// Layout of the emitted rows.
    #[arg(long, value_enum, default_value_t = View::Aligned)]
    pub view: View,

    /// Unchanged rows kept around each change.
    #[arg(short = 'C', long, default_value_t = DEFAULT_CONTEXT_LINES)]
    pub context: usize,

    /// Emit every row without collapsing unchanged runs.
    #[arg(long)]
    pub full: bool,

    /// Disable character-level highlighting of changed line pairs.
    #[arg(long)]
    pub no_char_diff: bool,

    /// Minimum similarity (0.0-1.0) for character highlighting.
    #[arg(long, default_value_t = crate::DEFAULT_CHAR_DIFF_THRESHOLD)]
    pub threshold: f64,

    /// Refuse inputs with more lines than this on either side (0 = unlimited).
    #[arg(long, default_value_t = 50_000)]
    pub max_lines: usize,

    /// Print a summary of the comparison instead of JSON rows.
    #[arg(short, long)]
    pub stats: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// Single interleaved sequence.
    Unified,
    /// Two unaligned columns.
    SideBySide,
    /// Row-aligned pairs with blank cells for missing counterparts.
    Aligned,
}

impl Cli {
    /// The core options selected on the command line.
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            enable_char_diff: !self.no_char_diff,
            context_lines: (!self.full).then_some(self.context),
            char_diff_threshold: self.threshold,
        }
    }
}

/// Parse CLI arguments.
pub fn parse_args() -> Cli {
    Cli::parse()
}
