use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{ArgAction, Parser};
use lazy_static::lazy_static;

use crate::Result;

pub const DEFAULT_METRICS_FILE: &str = "metrics.csv";
pub const DEFAULT_OUTPUT_NAME: &str = "histograms.png";
pub const DEFAULT_SAMPLE_SIZE: usize = 60;
pub const DEFAULT_BINS: usize = 25;

lazy_static! {
    pub static ref BUILD_INFO: String = format!("  ver: {}  rev: {}",
        env!("CARGO_PKG_VERSION"), env!("BUILD_GIT_HASH"));
}

#[derive(Parser, Debug, Clone)]
#[command(version = BUILD_INFO.as_str(), rename_all = "kebab-case")]
/// Plot per-mode histograms of throughput, p99 latency and heap usage from a benchmark metrics csv.
///
/// Rows are grouped by the Mode column and only the first --sample_size rows of each
/// mode are plotted.  The image is written into the directory holding the input file.
pub struct CliCfg {
    /// csv file with Mode, Throughput, LatencyP99 and HeapUsed columns (.gz and .zst are read too)
    #[arg(default_value = DEFAULT_METRICS_FILE)] pub file: PathBuf,
    /// rows taken from the head of each mode
    #[arg(short='n', long="sample_size", default_value_t = DEFAULT_SAMPLE_SIZE)] pub sample_size: usize,
    /// bins per histogram
    #[arg(short='b', long="bins", default_value_t = DEFAULT_BINS)] pub bins: usize,
    /// image file name, written next to the input file
    #[arg(short='o', long="output_name", default_value = DEFAULT_OUTPUT_NAME)] pub output_name: String,
    #[arg(long="width", default_value_t = 1800)] pub width: u32,
    #[arg(long="height", default_value_t = 600)] pub height: u32,
    #[arg(short='d', long="input_delimiter", value_parser=parse_escape, default_value=",")] pub delimiter: char,
    #[arg(short='q', long="quote", value_parser=parse_escape)] pub quote: Option<char>,
    #[arg(short='C', long="comment", value_parser=parse_escape)] pub comment: Option<char>,
    /// print a per-mode summary table to stdout
    #[arg(long="stats")] pub stats: bool,
    /// Verbosity - use more than one v for greater detail
    #[arg(short='v', action=ArgAction::Count)] pub verbose: u8,
}

impl CliCfg {
    /// Config for `path` with every other option at its default.
    pub fn for_file<P: AsRef<Path>>(path: P) -> CliCfg {
        CliCfg {
            file: path.as_ref().to_path_buf(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            bins: DEFAULT_BINS,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            width: 1800,
            height: 600,
            delimiter: ',',
            quote: None,
            comment: None,
            stats: false,
            verbose: 0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 { Err("--sample_size must be 1 or greater")?; }
        if self.bins == 0 { Err("--bins must be 1 or greater")?; }
        if self.width == 0 || self.height == 0 {
            Err(format!("image size must be non-zero, got {}x{}", self.width, self.height))?;
        }
        let name = Path::new(&self.output_name);
        if self.output_name.is_empty() || name.file_name().map(|f| f != name.as_os_str()).unwrap_or(true) {
            Err(format!("--output_name must be a plain file name, got \"{}\"", self.output_name))?;
        }
        if !self.output_name.to_ascii_lowercase().ends_with(".png") {
            Err(format!("--output_name must end in .png, got \"{}\"", self.output_name))?;
        }
        for (what, c) in [("delimiter", Some(self.delimiter)), ("quote", self.quote), ("comment", self.comment)] {
            match c {
                Some(c) if !c.is_ascii() => Err(format!("{} must be an ascii character, got \"{}\"", what, c))?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Where the image lands: the input's directory joined with the output name.
    pub fn output_path(&self) -> PathBuf {
        match self.file.parent() {
            Some(dir) => dir.join(&self.output_name),
            None => PathBuf::from(&self.output_name),
        }
    }
}

pub fn get_cli() -> Result<CliCfg> {
    let cfg: CliCfg = CliCfg::parse();
    cfg.validate()?;
    if cfg.verbose > 1 {
        eprintln!("{:#?}", &cfg);
    }
    Ok(cfg)
}

fn escape_parser(s: &str) -> Result<char> {
    if let Some(stripped) = s.strip_prefix("\\d") {
        match u8::from_str(stripped) {
            Ok(v) if v <= 127 => Ok(v as char),
            _ => Err(format!("Expect delimiter escape decimal to a be a number between 0 and 127 but got: \"{}\"", stripped))?,
        }
    } else {
        match s {
            "\\t" => Ok('\t'),
            "\\0" => Ok('\0'),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err("Delimiter not understood - must be 1 character OR \\t or \\0 or \\d<dec num>".to_string())?,
                }
            }
        }
    }
}

// clap wants errors that are Send + Sync + 'static
fn parse_escape(s: &str) -> std::result::Result<char, String> {
    escape_parser(s).map_err(|e| e.to_string())
}
