use std::io::Read;

use csv::{StringRecord, Trim};

use crate::cli::CliCfg;
use crate::error::MetricsError;
use crate::gen::open_decompress;
use crate::Result;

pub const MODE_COLUMN: &str = "Mode";

/// The numeric columns plotted, one histogram panel each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Throughput,
    LatencyP99,
    HeapUsed,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Throughput, Metric::LatencyP99, Metric::HeapUsed];

    pub fn column(self) -> &'static str {
        match self {
            Metric::Throughput => "Throughput",
            Metric::LatencyP99 => "LatencyP99",
            Metric::HeapUsed => "HeapUsed",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Metric::Throughput => "Throughput Histogram",
            Metric::LatencyP99 => "Latency P99 Histogram",
            Metric::HeapUsed => "Heap Used Histogram",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Metric::Throughput => "Throughput",
            Metric::LatencyP99 => "Latency P99",
            Metric::HeapUsed => "Heap Used",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub mode: String,
    pub throughput: f64,
    pub latency_p99: f64,
    pub heap_used: f64,
}

impl Record {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Throughput => self.throughput,
            Metric::LatencyP99 => self.latency_p99,
            Metric::HeapUsed => self.heap_used,
        }
    }
}

#[derive(Debug, Default)]
pub struct MetricsTable {
    /// header names after trimming, in file order
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

// column positions resolved from the header
struct ColumnIdx {
    mode: usize,
    metrics: [usize; 3],
}

fn resolve_columns(headers: &StringRecord) -> Result<ColumnIdx> {
    let find = |name: &str| headers.iter().position(|h| h == name);
    let mut missing: Vec<String> = Vec::new();
    let mode = find(MODE_COLUMN);
    if mode.is_none() { missing.push(MODE_COLUMN.to_string()); }
    let mut metrics = [0usize; 3];
    for (slot, m) in metrics.iter_mut().zip(Metric::ALL) {
        match find(m.column()) {
            Some(i) => *slot = i,
            None => missing.push(m.column().to_string()),
        }
    }
    match mode {
        Some(mode) if missing.is_empty() => Ok(ColumnIdx { mode, metrics }),
        _ => Err(MetricsError::MissingColumns(missing).into()),
    }
}

fn create_csv_builder(cfg: &CliCfg) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // only the header names get trimmed, cell values are left as found
    builder.delimiter(cfg.delimiter as u8).has_headers(true).trim(Trim::Headers);
    if let Some(q) = cfg.quote {
        builder.quote(q as u8);
    }
    if let Some(c) = cfg.comment {
        builder.comment(Some(c as u8));
    }
    builder
}

// An empty cell is a missing value: it loads as NaN and is left out of binning.
fn parse_num(rec: &StringRecord, idx: usize, row: usize, column: &str) -> Result<f64> {
    let raw = rec.get(idx).unwrap_or("");
    let cell = raw.trim();
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    match cell.parse::<f64>() {
        Ok(v) => Ok(v),
        Err(_) => Err(MetricsError::BadNumber { row, column: column.to_string(), value: raw.to_string() }.into()),
    }
}

/// Read every row of a metrics csv from any reader.
pub fn read_metrics<R: Read>(rdr: R, cfg: &CliCfg) -> Result<MetricsTable> {
    let mut csv_rdr = create_csv_builder(cfg).from_reader(rdr);
    let headers = csv_rdr.headers()?.clone();
    if cfg.verbose > 1 {
        eprintln!("header: [{}]", headers.iter().collect::<Vec<_>>().join(","));
    }
    let cols = resolve_columns(&headers)?;

    let mut records = Vec::new();
    for (i, rec) in csv_rdr.records().enumerate() {
        let rec = rec?;
        let row = i + 1;
        let mode = rec.get(cols.mode).unwrap_or("").to_string();
        let mut vals = [0f64; 3];
        for ((v, idx), m) in vals.iter_mut().zip(cols.metrics).zip(Metric::ALL) {
            *v = parse_num(&rec, idx, row, m.column())?;
        }
        records.push(Record { mode, throughput: vals[0], latency_p99: vals[1], heap_used: vals[2] });
    }
    Ok(MetricsTable { headers: headers.iter().map(|s| s.to_string()).collect(), records })
}

/// Open `cfg.file` (plain or compressed) and load it.
pub fn load_metrics(cfg: &CliCfg) -> Result<MetricsTable> {
    let rdr = open_decompress(&cfg.file, cfg.verbose.into())?;
    read_metrics(rdr, cfg)
}
