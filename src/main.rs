//! # kakaoslack CLI
//!
//! Command-line interface for kakaoslack library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use kakaoslack::ConvertError;
use kakaoslack::cli::{Args, Command};
use kakaoslack::config::{AnonymizeConfig, ConvertConfig};
use kakaoslack::core::{anonymize_archive, convert_dir_with};

fn main() {
    init_tracing();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout stays the human-readable report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns `Ok(false)` when the run finished but some transcripts failed.
fn run() -> Result<bool, ConvertError> {
    let args = <Args as ClapParser>::parse();

    println!("📦 kakaoslack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    match &args.command {
        Command::Convert {
            source,
            dest,
            split,
        } => {
            let config = ConvertConfig::new().with_split_attachments(*split);
            run_convert(source, dest, &config)
        }
        Command::Anonymize { dest, split } => {
            let config = AnonymizeConfig::new().with_split_attachments(*split);
            run_anonymize(dest, &config).map(|()| true)
        }
    }
}

fn run_convert(source: &Path, dest: &Path, config: &ConvertConfig) -> Result<bool, ConvertError> {
    let start = Instant::now();

    println!("📂 Source:  {}", source.display());
    println!("💾 Archive: {}", dest.display());
    if config.split_attachments {
        println!("✂️  Mode:    text/attachment split");
    }
    println!();

    let report = convert_dir_with(source, dest, config, |path, result| {
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        match result {
            Ok(r) => println!(
                "✅ {} → #{} ({} events, {} files)",
                name, r.channel, r.events, r.files
            ),
            Err(e) => println!("❌ {}: {}", name, e),
        }
    })?;

    if report.total() == 0 {
        println!("⚠️  No *.txt transcripts found in {}", source.display());
    }

    let elapsed = start.elapsed();
    let new_users: usize = report.converted.iter().map(|r| r.new_users).sum();

    println!();
    println!("📊 Summary:");
    println!("   Converted: {} transcripts", report.converted.len());
    println!("   Failed:    {} transcripts", report.failed.len());
    println!("   Events:    {}", report.total_events());
    println!("   New users: {}", new_users);

    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", elapsed.as_secs_f64());

    if new_users > 0 {
        println!();
        println!(
            "📝 Fill in {} before running `kakaoslack anonymize`",
            dest.join(kakaoslack::core::USERS_FILE).display()
        );
    }

    Ok(report.is_success())
}

fn run_anonymize(dest: &Path, config: &AnonymizeConfig) -> Result<(), ConvertError> {
    let start = Instant::now();

    println!("💾 Archive: {}", dest.display());
    if config.split_attachments {
        println!("✂️  Mode:    text/attachment split");
    }
    println!();
    println!("🕶️  Anonymizing...");

    let stats = anonymize_archive(dest, config)?;

    println!();
    println!("✅ Done!");
    println!();
    println!("📊 Summary:");
    println!("   Scanned:       {} files", stats.files_scanned);
    println!("   Rewritten:     {} files", stats.files_rewritten);
    println!("   Substitutions: {}", stats.substitutions);
    println!("   Total time:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
