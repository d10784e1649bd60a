use itertools::{Itertools, MinMaxResult};

/// Equal width bins shared by every series of one panel, with a count per series per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<Vec<u64>>,
}

impl Histogram {
    /// Bin every series over the combined range of all of them.
    /// Non-finite values are left out. A single-valued range is widened to v-0.5..v+0.5.
    pub fn build(series: &[Vec<f64>], bins: usize) -> Histogram {
        let edges = bin_edges(series.iter().flatten().copied(), bins);
        let counts = series.iter().map(|s| bin_counts(s, &edges)).collect();
        Histogram { edges, counts }
    }

    pub fn bins(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn range(&self) -> (f64, f64) {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) => (*lo, *hi),
            _ => (0.0, 1.0),
        }
    }

    /// tallest bar over all series
    pub fn max_count(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

pub fn bin_edges<I: Iterator<Item = f64>>(values: I, bins: usize) -> Vec<f64> {
    let bins = bins.max(1);
    let (mut lo, mut hi) = match values.filter(|v| v.is_finite()).minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => (0.0, 1.0),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
    edges.push(hi);
    edges
}

/// Count `values` into the bins described by `edges`. Bins are half open except the
/// last one, which also takes values equal to the top edge.
pub fn bin_counts(values: &[f64], edges: &[f64]) -> Vec<u64> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0u64; bins];
    if bins == 0 {
        return counts;
    }
    let (lo, hi) = (edges[0], edges[bins]);
    for &v in values.iter().filter(|v| v.is_finite()) {
        if v < lo || v > hi {
            continue;
        }
        // partition_point finds the first edge above v; step back one to get the bin
        let idx = edges.partition_point(|e| *e <= v).saturating_sub(1).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}
