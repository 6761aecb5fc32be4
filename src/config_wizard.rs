//! Interactive configuration wizard for creating `cv-book.toml`.
//!
//! The wizard asks for the handful of settings people actually change (locale,
//! page size, font, output file and where published CVs go) and leaves every
//! other layout value at its default, written out in full so it can be tweaked
//! by hand afterwards.

use crate::publish::DirectoryBlobStore;
use crate::sinks::{Locale, PageSize, PDF};
use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration for cv-book.
#[derive(Deserialize, Serialize, Default)]
pub struct Configuration {
    #[serde(default)]
    pub pdf: PDF,
    /// Where `publish` stores CVs; required only by that command
    pub publish: Option<DirectoryBlobStore>,
}

impl Configuration {
    /// Read the configuration, falling back to defaults when the file doesn't exist.
    pub fn load(path: &Path) -> Result<Configuration> {
        if !path.exists() {
            log::info!("{} not found, using default configuration", path.display());
            return Ok(Configuration::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse TOML")
    }
}

/// Run the interactive configuration wizard.
///
/// Prompts for output options, then writes the configuration to `path`.
pub fn run(path: &Path) -> Result<()> {
    let theme = ColorfulTheme {
        ..ColorfulTheme::default()
    };

    let locale_options: Vec<String> = Locale::all().iter().map(|l| l.to_string()).collect();
    let locale = FuzzySelect::with_theme(&theme)
        .with_prompt("CV language")
        .items(&locale_options)
        .default(0)
        .interact()?;
    let locale = Locale::all()[locale];

    let page_size_options: Vec<String> = PageSize::all().iter().map(|p| p.to_string()).collect();
    let page_size = FuzzySelect::with_theme(&theme)
        .with_prompt("Page size")
        .items(&page_size_options)
        .default(0)
        .interact()?;
    let page_size = PageSize::all()[page_size];

    let font: String = Input::with_theme(&theme)
        .with_prompt("Font (Helvetica, or a path like ./fonts/MyFont for MyFont-Regular.ttf)")
        .default("Helvetica".to_string())
        .interact()
        .with_context(|| "Failed to obtain font")?;

    let outfile: String = Input::with_theme(&theme)
        .with_prompt("Output pdf file")
        .default("cv.pdf".to_string())
        .interact()?;
    let mut outfile = PathBuf::from(outfile);
    let ext = outfile
        .extension()
        .map(std::ffi::OsStr::to_ascii_lowercase)
        .unwrap_or_default();
    if ext != *"pdf" {
        outfile.set_extension("pdf");
    }

    let publish = if Confirm::with_theme(&theme)
        .with_prompt("Do you want to publish CVs to a directory?")
        .default(false)
        .interact()?
    {
        let directory: String = Input::with_theme(&theme)
            .with_prompt("Directory to store published CVs in")
            .default("published".to_string())
            .interact()?;
        let base_url: String = Input::with_theme(&theme)
            .with_prompt("Public base URL of that directory (leave empty for file:// URLs)")
            .allow_empty(true)
            .interact()?;
        let base_url = base_url.trim();
        Some(DirectoryBlobStore {
            directory: PathBuf::from(directory),
            base_url: (!base_url.is_empty()).then(|| base_url.to_string()),
        })
    } else {
        None
    };

    let config = Configuration {
        pdf: PDF {
            font,
            locale,
            outfile,
            ..PDF::default()
        }
        .with_page_size(page_size),
        publish,
    };

    let config =
        toml::to_string_pretty(&config).with_context(|| "Failed to convert configuration to TOML")?;

    if path.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!(
                "{} already exists, do you want to override it?",
                path.display()
            ))
            .interact()?
    {
        println!("Configuration:");
        println!("{}", config);
    } else {
        std::fs::write(path, config).with_context(|| "Failed to write configuration file")?;
        println!("{} written!", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let config = Configuration::load(&dir.path().join("cv-book.toml")).expect("can load");
        assert_eq!(config.pdf.font, "Helvetica");
        assert!(config.publish.is_none());
    }

    #[test]
    fn configuration_round_trips_through_toml() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("cv-book.toml");
        let config = Configuration {
            pdf: PDF {
                locale: Locale::English,
                ..PDF::default()
            }
            .with_page_size(PageSize::Letter),
            publish: Some(DirectoryBlobStore {
                directory: PathBuf::from("out"),
                base_url: None,
            }),
        };
        std::fs::write(
            &path,
            toml::to_string_pretty(&config).expect("can serialize"),
        )
        .expect("can write");

        let loaded = Configuration::load(&path).expect("can load");
        assert_eq!(loaded.pdf.locale, Locale::English);
        assert_eq!(loaded.pdf.page_width_in, 8.5);
        assert_eq!(
            loaded.publish.map(|p| p.directory),
            Some(PathBuf::from("out"))
        );
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("cv-book.toml");
        std::fs::write(
            &path,
            "[publish]\ndirectory = \"cvs\"\nbase_url = \"https://cdn.example.com\"\n",
        )
        .expect("can write");

        let loaded = Configuration::load(&path).expect("can load");
        assert_eq!(loaded.pdf.locale, Locale::Spanish);
        assert_eq!(
            loaded.publish.and_then(|p| p.base_url).as_deref(),
            Some("https://cdn.example.com")
        );
    }
}
