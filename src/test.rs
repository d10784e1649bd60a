#![allow(unused)]

extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::{Command, Stdio};

#[macro_use]
extern crate lazy_static;

#[cfg(test)]
mod tests {
    lazy_static! {
        static ref TWO_MODES_OVER_SAMPLE: String = create_fake_metrics(&[("G1", 75), ("ZGC", 64)], "Mode,Throughput,LatencyP99,HeapUsed");
        static ref PADDED_HEADER: String = create_fake_metrics(&[("jit", 20), ("aot", 12)], "  Mode ,Throughput , LatencyP99,HeapUsed  ");
    }
    use super::*;
    use std::fmt::Write as _;
    use std::io::Write;

    fn create_fake_metrics(modes: &[(&str, usize)], header: &str) -> String {
        let mut input_str = String::from(header);
        input_str.push('\n');
        for (m, n) in modes {
            for i in 0..*n {
                let throughput = 10_000 + (i * 37) % 900;
                let latency = 2.0 + (i % 11) as f64 * 0.75;
                let heap = 64 * 1024 * 1024 + i * 8192;
                writeln!(input_str, "{},{},{},{}", m, throughput, latency, heap).unwrap();
            }
        }
        input_str
    }

    fn write_input(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).expect("could not write test input");
        path
    }

    #[test]
    fn two_modes_write_image() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = write_input(dir.path(), "metrics.csv", &TWO_MODES_OVER_SAMPLE);
        let expected = dir.path().join("histograms.png");
        Command::cargo_bin("mhist")?
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains("Histograms saved to").and(predicate::str::contains("histograms.png")));
        assert!(expected.exists());
        assert!(std::fs::metadata(&expected)?.len() > 0);
        Ok(())
    }

    #[test]
    fn rerun_overwrites() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = write_input(dir.path(), "metrics.csv", &TWO_MODES_OVER_SAMPLE);
        let out = dir.path().join("histograms.png");
        std::fs::write(&out, b"stale")?;
        Command::cargo_bin("mhist")?.arg(&input).assert().success();
        Command::cargo_bin("mhist")?.arg(&input).assert().success();
        assert_ne!(std::fs::read(&out)?, b"stale".to_vec());
        Ok(())
    }

    #[test]
    fn missing_file_is_not_fatal() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("nope.csv");
        Command::cargo_bin("mhist")?
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("File not found"));
        assert!(!dir.path().join("histograms.png").exists());
        Ok(())
    }

    #[test]
    fn padded_headers_and_stats() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = write_input(dir.path(), "metrics.csv", &PADDED_HEADER);
        let output = Command::cargo_bin("mhist")?
            .args([input.to_string_lossy().as_ref(), "--stats"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?
            .wait_with_output()?;
        assert!(output.status.success(), "Process failed: {:?} stderr: {}", output.status, String::from_utf8_lossy(&output.stderr));
        let stdout = String::from_utf8_lossy(&output.stdout);
        println!("Results:  >>{}<<END", stdout);
        assert!(stdout.contains("k:Mode"));
        // aot sorts first, and a group smaller than the sample is plotted whole
        let aot = stdout.lines().find(|l| l.contains("aot")).expect("no aot row");
        assert!(aot.contains("12"));
        assert!(stdout.find("aot").unwrap() < stdout.find("jit").unwrap());
        assert!(dir.path().join("histograms.png").exists());
        Ok(())
    }

    #[test]
    fn custom_output_name_and_sample_size() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = write_input(dir.path(), "metrics.csv", &TWO_MODES_OVER_SAMPLE);
        Command::cargo_bin("mhist")?
            .args([input.to_string_lossy().as_ref(), "-n", "10", "-b", "8", "-o", "small.png", "--stats"])
            .assert()
            .success()
            .stdout(predicate::str::contains("small.png"));
        assert!(dir.path().join("small.png").exists());
        assert!(!dir.path().join("histograms.png").exists());
        Ok(())
    }

    #[test]
    fn missing_column_fails() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = write_input(dir.path(), "metrics.csv", "Mode,Throughput,HeapUsed\nA,1,2\n");
        Command::cargo_bin("mhist")?
            .arg(&input)
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:").and(predicate::str::contains("LatencyP99")));
        assert!(!dir.path().join("histograms.png").exists());
        Ok(())
    }

    #[test]
    fn bad_number_fails() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = write_input(dir.path(), "metrics.csv", "Mode,Throughput,LatencyP99,HeapUsed\nA,1,fast,2\n");
        Command::cargo_bin("mhist")?
            .arg(&input)
            .assert()
            .failure()
            .stderr(predicate::str::contains("not a number"));
        Ok(())
    }

    #[test]
    fn empty_cells_still_plot() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = write_input(dir.path(), "metrics.csv", "Mode,Throughput,LatencyP99,HeapUsed\nG1,100,2.5,300\nG1,,2.0,310\nZGC,90,1.5,280\n");
        Command::cargo_bin("mhist")?
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains("histograms.png"));
        assert!(dir.path().join("histograms.png").exists());
        Ok(())
    }

    #[test]
    fn header_only_fails_without_output() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = write_input(dir.path(), "metrics.csv", "Mode,Throughput,LatencyP99,HeapUsed\n");
        Command::cargo_bin("mhist")?
            .arg(&input)
            .assert()
            .failure()
            .stderr(predicate::str::contains("No rows"));
        assert!(!dir.path().join("histograms.png").exists());
        Ok(())
    }

    #[test]
    fn gzip_input() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("metrics.csv.gz");
        let mut enc = flate2::write::GzEncoder::new(std::fs::File::create(&path)?, flate2::Compression::default());
        enc.write_all(TWO_MODES_OVER_SAMPLE.as_bytes())?;
        enc.finish()?;
        Command::cargo_bin("mhist")?.arg(&path).assert().success();
        assert!(dir.path().join("histograms.png").exists());
        Ok(())
    }

    #[test]
    fn version_has_revision() -> Result<(), Box<dyn std::error::Error>> {
        Command::cargo_bin("mhist")?
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("rev:"));
        Ok(())
    }
}
