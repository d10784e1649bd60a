//! Per-mode histograms of benchmark metrics.
//!
//! A metrics csv (`Mode`, `Throughput`, `LatencyP99`, `HeapUsed`) is loaded, split by `Mode`,
//! cut down to the head of each mode, and drawn as three side by side histograms in one png
//! next to the input.

use std::path::PathBuf;
use std::time::Instant;

use atty::Stream;
use cpu_time::ProcessTime;
use crossterm::style::{Color, ResetColor, SetForegroundColor};

pub mod cli;
pub mod error;
pub mod gen;
pub mod group;
pub mod histogram;
pub mod load;
pub mod render;
pub mod summary;

use cli::CliCfg;
use error::MetricsError;
use gen::fmt_size;
use load::Record;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn color_if_tty(c: Color) -> String {
    if atty::is(Stream::Stderr) {
        format!("{}", SetForegroundColor(c))
    } else {
        String::new()
    }
}

fn reset_if_tty() -> String {
    if atty::is(Stream::Stderr) {
        format!("{}", ResetColor)
    } else {
        String::new()
    }
}

/// Load, group, sample and render.
///
/// Returns the written image path, or `None` when the input file does not exist. A missing
/// input is reported on stderr and is not an error; nothing is written in that case.
pub fn analyze_metrics(cfg: &CliCfg) -> Result<Option<PathBuf>> {
    let start_f = Instant::now();
    let startcpu = ProcessTime::now();

    if cfg.verbose >= 1 {
        let size = std::fs::metadata(&cfg.file).map(|m| m.len()).unwrap_or(0);
        eprintln!("{}<<< reading {}  size: {}{}", color_if_tty(Color::Blue), cfg.file.display(), fmt_size(size, 4), reset_if_tty());
    }
    let table = match load::load_metrics(cfg) {
        Ok(t) => t,
        Err(err) => {
            if let Some(MetricsError::FileNotFound(_)) = err.downcast_ref::<MetricsError>() {
                eprintln!("{}Error: {}{}", color_if_tty(Color::Red), err, reset_if_tty());
                return Ok(None);
            }
            return Err(err);
        }
    };
    if cfg.verbose >= 1 {
        eprintln!("rows: {}  columns: {}  load time: {:.3}s", table.records.len(), table.headers.len(), start_f.elapsed().as_secs_f64());
    }

    let grouped = group::group_by_mode(&table);
    if grouped.skipped > 0 && cfg.verbose >= 1 {
        eprintln!("skipped {} row(s) with an empty {}", grouped.skipped, load::MODE_COLUMN);
    }
    let samples: Vec<(&str, &[Record])> = grouped
        .groups
        .iter()
        .map(|g| (g.mode.as_str(), g.sample(cfg.sample_size)))
        .collect();
    if cfg.verbose >= 1 {
        for (mode, s) in &samples {
            eprintln!("mode {}: plotting {} row(s)", mode, s.len());
        }
    }

    if cfg.stats {
        let stdout = std::io::stdout();
        let mut writer = stdout.lock();
        summary::write_summary(&grouped.groups, cfg.sample_size, &mut writer)?;
    }

    let output_file = cfg.output_path();
    render::render_histograms(&samples, &output_file, cfg)?;

    if cfg.verbose >= 1 {
        eprintln!("total time: {:.3}s  cpu: {:.3}s", start_f.elapsed().as_secs_f64(), startcpu.elapsed().as_secs_f64());
    }
    Ok(Some(output_file))
}
