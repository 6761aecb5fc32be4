use anyhow::{Context, Result};
use byte_unit::{Byte, UnitType};
use cli::Cli;
use config_wizard::Configuration;
use indicatif::{ProgressBar, ProgressStyle};
use profile::ProfileDocument;
use std::process::ExitCode;

mod cli;
mod config_wizard;
mod profile;
mod publish;
mod sinks {
    pub mod pdf;
    pub use pdf::{Locale, PageSize, PDF};
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn progress_bar() -> ProgressBar {
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("can parse progress style")
            .progress_chars("#>-"),
    );
    progress.set_message("Laying out CV...");
    progress
}

fn print_stats(stats: &sinks::pdf::RenderStats) {
    let size = Byte::from_u64(stats.bytes as u64)
        .get_appropriate_unit(UnitType::Binary)
        .to_string();
    println!("  Pages:    {}", stats.page_count);
    println!("  Size:     {size}");
    println!("  Sections: {}", stats.sections.join(", "));
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Config => config_wizard::run(&cli.config),
        cli::Commands::Render(args) => {
            println!("Loading configuration...");
            let Configuration { pdf, .. } = Configuration::load(&cli.config)?;
            let profile = ProfileDocument::load(&args.profile)?;

            let progress = progress_bar();
            let (bytes, stats) = publish::generate(&pdf, &profile, args.photo.as_deref(), &progress)
                .with_context(|| format!("Failed to render CV for {}", args.profile.display()))?;
            progress.finish_and_clear();

            let outfile = args.out.as_ref().unwrap_or(&pdf.outfile);
            std::fs::write(outfile, &bytes)
                .with_context(|| format!("Failed to write {}", outfile.display()))?;

            println!();
            println!("  CV PDF:   {}", outfile.display());
            print_stats(&stats);
            Ok(())
        }
        cli::Commands::Publish(args) => {
            println!("Loading configuration...");
            let Configuration {
                pdf,
                publish: blob_store,
            } = Configuration::load(&cli.config)?;
            let blobs = blob_store.with_context(|| {
                format!(
                    "No [publish] section in {}, run `cv-book config` to add one",
                    cli.config.display()
                )
            })?;
            let profile = ProfileDocument::load(&args.profile)?;
            let registry = publish::JsonProfileRegistry::new(&args.profile);

            let progress = progress_bar();
            let published = publish::publish(
                &pdf,
                &profile,
                args.photo.as_deref(),
                &blobs,
                &registry,
                &progress,
            )
            .with_context(|| format!("Failed to publish CV for {}", args.profile.display()))?;
            progress.finish_and_clear();

            println!();
            println!("  CV URL:   {}", console::style(&published.url).green());
            print_stats(&published.stats);
            Ok(())
        }
    }
}
