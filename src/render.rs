use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::cli::CliCfg;
use crate::error::MetricsError;
use crate::histogram::Histogram;
use crate::load::{Metric, Record};
use crate::Result;

// tab10, the usual cycle for overlaid series
const SERIES_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

const BAR_ALPHA: f64 = 0.7;
// share of a bin covered by bars once there is more than one series
const MULTI_SERIES_FILL: f64 = 0.8;

const TITLE_FONT_SIZE: u32 = 22;
const LABEL_FONT_SIZE: u32 = 16;

/// One panel per metric: the histogram over every mode's sample of that metric.
pub fn panel_histograms(samples: &[(&str, &[Record])], bins: usize) -> Vec<(Metric, Histogram)> {
    Metric::ALL
        .iter()
        .map(|&metric| {
            let series: Vec<Vec<f64>> = samples
                .iter()
                .map(|(_, recs)| recs.iter().map(|r| r.value(metric)).collect())
                .collect();
            (metric, Histogram::build(&series, bins))
        })
        .collect()
}

/// x extent of the bar for `series` inside `bin`. Bars of one bin sit side by side, centered.
pub fn bar_span(edges: &[f64], bin: usize, series: usize, n_series: usize) -> (f64, f64) {
    let fill = if n_series > 1 { MULTI_SERIES_FILL } else { 1.0 };
    let (left, right) = (edges[bin], edges[bin + 1]);
    let width = right - left;
    let bar = width * fill / n_series.max(1) as f64;
    let start = left + width * (1.0 - fill) / 2.0 + bar * series as f64;
    (start, start + bar)
}

fn format_tick(v: f64) -> String {
    let a = v.abs();
    if a >= 1e5 {
        format!("{:.1e}", v)
    } else if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else if a >= 100.0 {
        format!("{:.1}", v)
    } else {
        format!("{:.2}", v)
    }
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    metric: Metric,
    hist: &Histogram,
    modes: &[&str],
) -> Result<()> {
    let (lo, hi) = hist.range();
    let y_top = (hist.max_count() as f64 * 1.08).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(metric.title(), ("sans-serif", TITLE_FONT_SIZE))
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(lo..hi, 0f64..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(metric.axis_label())
        .y_desc("Frequency")
        .x_labels(8)
        .x_label_formatter(&|v: &f64| format_tick(*v))
        .y_label_formatter(&|v: &f64| format!("{:.0}", v))
        .axis_desc_style(("sans-serif", LABEL_FONT_SIZE))
        .draw()?;

    let n_series = hist.counts.len();
    for (idx, (mode, counts)) in modes.iter().zip(&hist.counts).enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        chart
            .draw_series(counts.iter().enumerate().filter(|(_, c)| **c > 0).map(|(bin, c)| {
                let (x0, x1) = bar_span(&hist.edges, bin, idx, n_series);
                Rectangle::new([(x0, 0.0), (x1, *c as f64)], color.mix(BAR_ALPHA).filled())
            }))?
            .label(*mode)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.mix(BAR_ALPHA).filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .label_font(("sans-serif", LABEL_FONT_SIZE))
        .draw()?;
    Ok(())
}

/// Draw the three panels side by side and write the image to `out`, replacing any file there.
pub fn render_histograms(samples: &[(&str, &[Record])], out: &Path, cfg: &CliCfg) -> Result<()> {
    if samples.is_empty() {
        return Err(MetricsError::NoData.into());
    }
    let modes: Vec<&str> = samples.iter().map(|(m, _)| *m).collect();
    let panels = panel_histograms(samples, cfg.bins);
    if cfg.verbose > 1 {
        for (metric, hist) in &panels {
            let (lo, hi) = hist.range();
            eprintln!("{}: {} bins over [{}, {}] tallest bar {}", metric.column(), hist.bins(), lo, hi, hist.max_count());
        }
    }

    let root = BitMapBackend::new(out, (cfg.width, cfg.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((1, 3));
    for (area, (metric, hist)) in areas.iter().zip(&panels) {
        draw_panel(area, *metric, hist, &modes)?;
    }
    root.present()?;
    Ok(())
}
