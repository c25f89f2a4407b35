// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use std::path::Path;

// Use library instead of local modules
use private_laws_dashboard::{config, Dataset};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let data_file = if args.len() > 1 {
        args[1].clone()
    } else {
        config::DATA_FILE.to_string()
    };

    let dataset = load_dataset(&data_file)?;

    run_ui_mode(dataset)
}

fn load_dataset(data_file: &str) -> Result<Dataset> {
    println!("📜 Private Law Database Dashboard");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let path = Path::new(data_file);

    if path.exists() {
        println!("\n📂 Loading {}...", data_file);
        Dataset::load_csv(path)
    } else if config::USE_SAMPLE_IF_MISSING {
        println!("\n⚠ {} not found. Using sample data for testing.", data_file);
        let dataset = Dataset::sample(config::SAMPLE_RECORD_COUNT);
        println!("✓ Generated {} sample records", dataset.len());
        Ok(dataset)
    } else {
        eprintln!("❌ Data file not found: {}", data_file);
        std::process::exit(1);
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode(dataset: Dataset) -> Result<()> {
    let (year_min, year_max) = dataset.year_bounds();
    println!("✓ Loaded {} private laws ({} - {})\n", dataset.len(), year_min, year_max);
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(dataset);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_dataset: Dataset) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use web UI: cargo run --bin laws-server --features server");
    std::process::exit(1);
}
