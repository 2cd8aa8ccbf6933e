//! Builds an AVL map and a splay map from the same token stream, many
//! times over, and reports the mean build time of each plus the splay
//! tree's expensive-insert count.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use pivot_forest::{AvlMap, SplayMap};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file containing whitespace-separated tokens.
    input: PathBuf,
    /// Output file for the timing summary.
    output: PathBuf,
    /// How many times each tree is rebuilt from scratch.
    #[arg(short, long, default_value_t = 100)]
    runs: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot open {}", args.input.display()))?;
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let start = Instant::now();
    for _ in 0..args.runs {
        let mut avl = AvlMap::<String, i32>::new();
        for t in &tokens {
            avl.set((*t).to_string(), 0);
        }
    }
    let avl_secs = start.elapsed().as_secs_f64() / f64::from(args.runs.max(1));

    // The expensive-insert count is input-determined, so the first run's
    // value stands for all of them.
    let mut expensive = 0u64;
    let start = Instant::now();
    for run in 0..args.runs {
        let mut splay = SplayMap::<String, i32>::new();
        for t in &tokens {
            splay.set((*t).to_string(), 0);
        }
        if run == 0 {
            expensive = splay.report();
        }
    }
    let splay_secs = start.elapsed().as_secs_f64() / f64::from(args.runs.max(1));

    let summary = format_summary(tokens.len(), avl_secs, splay_secs, expensive);
    fs::write(&args.output, summary)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    Ok(())
}

fn format_summary(insertions: usize, avl_secs: f64, splay_secs: f64, expensive: u64) -> String {
    format!(
        "{insertions} insertions\n\
         AVL: {avl_secs} seconds\n\
         Splay: {splay_secs} seconds\n\
         Splay expensive: {expensive}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::format_summary;

    #[test]
    fn summary_lists_counts_and_times() {
        let s = format_summary(42, 0.25, 0.5, 3);
        assert_eq!(
            s,
            "42 insertions\nAVL: 0.25 seconds\nSplay: 0.5 seconds\nSplay expensive: 3\n"
        );
    }
}
