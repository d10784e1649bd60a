use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::MetricsError;
use crate::Result;

// Open a plain or compressed input by extension and hand back a boxed Read.
// A path that cannot be found comes back as MetricsError::FileNotFound so the caller can
// tell "nothing to do" apart from real IO trouble.
pub fn open_decompress(path: &Path, verbosity: usize) -> Result<Box<dyn Read>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(MetricsError::FileNotFound(path.to_path_buf()).into());
        }
        Err(err) => return Err(format!("unable to open \"{}\": {}", path.display(), err).into()),
    };
    if path.is_dir() {
        return Err(format!("\"{}\" is a directory, expected a csv file", path.display()).into());
    }
    match ext.as_str() {
        "gz" | "tgz" => {
            if verbosity > 1 { eprintln!("opening gzip file {}", path.display()); }
            Ok(Box::new(GzDecoder::new(BufReader::new(file))))
        }
        "zst" | "zstd" => {
            if verbosity > 1 { eprintln!("opening zstd file {}", path.display()); }
            match zstd::stream::read::Decoder::new(file) {
                Ok(dec) => Ok(Box::new(dec)),
                Err(err) => Err(format!("zstd decoder error for \"{}\": {}", path.display(), err).into()),
            }
        }
        _ => {
            if verbosity > 2 { eprintln!("opening plain file {}", path.display()); }
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Byte count scaled to B/KB/MB/GB/TB, `sig` characters of mantissa, right aligned.
pub fn fmt_size(bytes: u64, sig: usize) -> String {
    const UNITS: [&str; 5] = ["B ", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = UNITS[0];
    for u in &UNITS[1..] {
        if value < 1024.0 { break; }
        value /= 1024.0;
        unit = u;
    }
    let mut s = value.to_string();
    s.truncate(sig + 1);
    if s.ends_with('.') { s.pop(); }
    format!("{:>width$} {}", s, unit, width = sig + 1)
}
