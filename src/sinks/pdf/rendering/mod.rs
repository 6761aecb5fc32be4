//! CV rendering orchestration.
//!
//! Lays out every section of the CV in a fixed order and hands the result to
//! the PDF writer:
//!
//! 1. identity block (photo, name, contact details)
//! 2. personal information, location and presentation, always present
//! 3. education, experience, courses, languages, skills, competencies,
//!    social links and references, only when the profile has records for them
//!
//! Layout is a single pass over the profile with no backtracking. Page breaks
//! are decided by the page state inside each writer; this module only decides
//! what goes where.
//!
//! ## Document Metadata
//!
//! The PDF title and author are taken from the job seeker's name. No creation
//! date is written so that the same profile always produces the same bytes.
//!
//! The render function accepts a progress bar from the caller and ticks it once
//! per section, with the section title as the message.

mod header;
mod line;
mod personal;
mod records;
mod section;

use crate::profile::ProfileDocument;
use crate::sinks::pdf::config::{RenderStats, PDF};
use crate::sinks::pdf::fonts::LoadedFonts;
use crate::sinks::pdf::images::ProfilePhoto;
use crate::sinks::pdf::layout::{Canvas, LaidOutDocument};
use crate::sinks::pdf::writer::{self, DocumentInfo};
use anyhow::{Context, Result};
use indicatif::ProgressBar;

/// Identity block, three fixed sections and eight collections.
const STEP_COUNT: u64 = 12;

impl PDF {
    /// Place the whole CV onto pages without producing any PDF.
    pub fn layout(
        &self,
        fonts: &LoadedFonts,
        profile: &ProfileDocument,
        photo: Option<&ProfilePhoto>,
        progress: &ProgressBar,
    ) -> LaidOutDocument {
        let labels = self.locale.labels();
        let mut canvas = Canvas::new(self, fonts);
        let tick = |message: &str| {
            progress.set_message(message.to_string());
            progress.inc(1);
        };
        progress.set_length(STEP_COUNT);

        header::render(&mut canvas, profile, photo);
        tick(&profile.full_name());

        personal::personal_info(&mut canvas, profile);
        tick(labels.personal_info);
        personal::location(&mut canvas, profile);
        tick(labels.location);
        personal::presentation(&mut canvas, profile);
        tick(labels.presentation);

        records::render_all(&mut canvas, profile, tick);

        let doc = canvas.finish();
        log::info!(
            "Laid out {} section(s) over {} page(s)",
            doc.sections.len(),
            doc.page_count()
        );
        doc
    }

    /// Render `profile` to PDF bytes.
    ///
    /// Takes an already decoded photo: a CV is never started for a photo that
    /// failed to load.
    pub fn render(
        &self,
        profile: &ProfileDocument,
        photo: Option<&ProfilePhoto>,
        progress: &ProgressBar,
    ) -> Result<(Vec<u8>, RenderStats)> {
        let fonts = LoadedFonts::load(&self.font)
            .with_context(|| format!("Failed to load font '{}'", self.font))?;

        let doc = self.layout(&fonts, profile, photo, progress);

        let name = profile.full_name();
        let info = DocumentInfo {
            title: if name.is_empty() {
                "CV".to_string()
            } else {
                format!("CV - {name}")
            },
            author: name,
        };
        let bytes = writer::write(self, &fonts, &doc, photo, &info);

        let stats = RenderStats {
            page_count: doc.page_count(),
            sections: doc.sections.iter().map(|s| s.title.clone()).collect(),
            bytes: bytes.len(),
        };
        Ok((bytes, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{
        EducationRecordBuilder, LanguageRecordBuilder, PersonalInfoBuilder, ProfileDocumentBuilder,
    };
    use crate::sinks::pdf::labels::Locale;
    use crate::sinks::pdf::layout::DrawOp;
    use pretty_assertions::assert_eq;

    fn presentation_of(len: usize) -> String {
        let words = "Soy una persona responsable con experiencia en atención al cliente ";
        words.chars().cycle().take(len).collect()
    }

    fn scenario() -> ProfileDocument {
        ProfileDocumentBuilder::default()
            .id("user-1")
            .personal(
                PersonalInfoBuilder::default()
                    .first_names("Ana María")
                    .last_names("Vera Paz")
                    .birth_date("1994-02-03T05:00:00.000Z")
                    .phone("0999999999")
                    .build()
                    .expect("can build personal info"),
            )
            .presentation(presentation_of(500))
            .education(vec![EducationRecordBuilder::default()
                .institution("Universidad de Cuenca")
                .title("Economista")
                .level("Tercer nivel")
                .start_date("2012-09-01")
                .end_date("2017-06-30")
                .build()
                .expect("can build education")])
            .experience(Vec::new())
            .languages(vec![
                LanguageRecordBuilder::default()
                    .name("Español")
                    .level("Nativo")
                    .build()
                    .expect("can build language"),
                LanguageRecordBuilder::default()
                    .name("Inglés")
                    .level("B1")
                    .build()
                    .expect("can build language"),
            ])
            .build()
            .expect("can build profile")
    }

    #[test]
    fn end_to_end_section_flow() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let doc = config.layout(&fonts, &scenario(), None, &ProgressBar::hidden());

        assert_eq!(
            doc.section_titles(),
            vec![
                "Información personal",
                "Ubicación",
                "Presentación",
                "Formación académica",
                "Idiomas",
            ]
        );

        // presentation wraps over at least three lines
        let texts: Vec<&str> = doc.texts().map(|(_, t)| t).collect();
        let start = texts
            .iter()
            .position(|t| *t == "Presentación")
            .expect("has presentation header");
        let end = texts
            .iter()
            .position(|t| *t == "Formación académica")
            .expect("has education header");
        assert!(end - start - 1 >= 3);

        // one block for education, two for languages
        let education_titles = texts.iter().filter(|t| **t == "Economista").count();
        assert_eq!(education_titles, 1);
        let level_labels = texts[end..].iter().filter(|t| **t == "Nivel").count();
        // one for the education level, two for the languages
        assert_eq!(level_labels, 3);
        assert!(texts.contains(&": 03-02-1994"));
    }

    #[test]
    fn layout_is_repeatable() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let profile = scenario();
        let a = config.layout(&fonts, &profile, None, &ProgressBar::hidden());
        let b = config.layout(&fonts, &profile, None, &ProgressBar::hidden());
        assert_eq!(a, b);
    }

    #[test]
    fn rendering_is_byte_for_byte_repeatable() {
        let config = PDF::default();
        let profile = scenario();
        let (first, stats) = config
            .render(&profile, None, &ProgressBar::hidden())
            .expect("can render");
        let (second, _) = config
            .render(&profile, None, &ProgressBar::hidden())
            .expect("can render");
        assert_eq!(first, second);
        assert_eq!(stats.bytes, first.len());
        assert_eq!(stats.page_count, 1);
        assert!(first.starts_with(b"%PDF-"));
    }

    #[test]
    fn minimal_profile_still_has_the_fixed_sections() {
        let config = PDF {
            locale: Locale::English,
            ..PDF::default()
        };
        let fonts = LoadedFonts::Helvetica;
        let doc = config.layout(
            &fonts,
            &ProfileDocument::default(),
            None,
            &ProgressBar::hidden(),
        );
        assert_eq!(
            doc.section_titles(),
            vec!["Personal information", "Location", "About me"]
        );
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn content_never_crosses_the_bottom_margin() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let mut profile = scenario();
        profile.presentation = Some(presentation_of(20_000));
        let doc = config.layout(&fonts, &profile, None, &ProgressBar::hidden());

        assert!(doc.page_count() > 2);
        let bound = config.page_height_pt() - config.margin_bottom_pt();
        for ops in &doc.pages {
            for op in ops {
                match op {
                    DrawOp::Text { baseline, .. } => assert!(*baseline <= bound),
                    DrawOp::Rule { y, .. } => assert!(*y <= bound),
                    DrawOp::Photo { top, height, .. } => assert!(top + height <= bound),
                }
            }
        }
    }
}
