//! Converts every `.xlsx` tag sheet in the working directory to JSON.

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

use tagsheet::convert::{BatchOptions, ConvertOptions, convert_files, discover_workbooks};
use tagsheet::ingestion::StdErrObserver;

const RULE: &str = "============================================================";

fn main() {
    println!("{RULE}");
    println!("Tag sheet to JSON converter");
    println!("{RULE}");
    println!();

    let dir = env::current_dir().unwrap_or_else(|_| ".".into());
    if let Err(e) = run(&dir) {
        eprintln!("error: {e}");
    }

    pause();
}

fn run(dir: &Path) -> tagsheet::ConvertResult<()> {
    println!("Scanning directory: {}", dir.display());
    println!();

    let files = discover_workbooks(dir)?;
    if files.is_empty() {
        println!("No .xlsx files found in current directory.");
        return Ok(());
    }

    println!("Found {} Excel file(s):", files.len());
    for f in &files {
        println!("  - {}", file_name(f));
    }
    println!();

    let options = ConvertOptions {
        observer: Some(Arc::new(StdErrObserver)),
        ..Default::default()
    };
    let summary = convert_files(&files, &options, &BatchOptions::default())?;
    for outcome in &summary.outcomes {
        println!("  Processing: {}", file_name(&outcome.input));
        match &outcome.result {
            Ok(converted) => {
                println!("    ✓ {}", converted.stats);
                println!("    ✓ Saved to: {}", file_name(&converted.output));
            }
            Err(e) => println!("    ✗ Error: {e}"),
        }
        println!();
    }

    println!("{RULE}");
    println!(
        "Conversion complete: {}/{} files converted",
        summary.converted(),
        summary.total()
    );
    println!("{RULE}");
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn pause() {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return;
    }
    print!("\nPress Enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = stdin.lock().read_line(&mut line);
}
