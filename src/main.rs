use mhist::cli::get_cli;
use mhist::Result;

fn main() {
    if let Err(err) = _main() {
        eprintln!("error: {}", &err);
        std::process::exit(1);
    }
}

fn _main() -> Result<()> {
    let cfg = get_cli()?;
    if let Some(output_file) = mhist::analyze_metrics(&cfg)? {
        println!("Histograms saved to {}", output_file.display());
    }
    Ok(())
}
