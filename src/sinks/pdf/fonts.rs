use crate::sinks::pdf::metrics;
use anyhow::{anyhow, Context, Result};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use std::path::{Path, PathBuf};

/// The two weights a CV uses: labels and titles are bold, everything else regular.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Weight {
    Regular,
    Bold,
}

/// A TrueType face read from disk, embedded whole into the PDF.
pub struct TrueTypeFont {
    /// PostScript-safe name used for `/BaseFont`
    pub name: String,
    pub face: OwnedFace,
}

impl TrueTypeFont {
    fn load(path: &Path) -> Result<TrueTypeFont> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;
        let face = OwnedFace::from_vec(data, 0)
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("Failed to parse font file: {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "CvFont".to_string())
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        Ok(TrueTypeFont { name, face })
    }

    pub fn data(&self) -> &[u8] {
        self.face.as_slice()
    }

    pub fn units_per_em(&self) -> f32 {
        self.face.as_face_ref().units_per_em() as f32
    }

    /// Glyph for `c`, or `.notdef` when the face doesn't cover it.
    pub fn glyph(&self, c: char) -> GlyphId {
        self.face
            .as_face_ref()
            .glyph_index(c)
            .unwrap_or(GlyphId(0))
    }

    /// Advance of `glyph` in 1/1000 em.
    pub fn glyph_width(&self, glyph: GlyphId) -> f32 {
        let advance = self
            .face
            .as_face_ref()
            .glyph_hor_advance(glyph)
            .unwrap_or(0);
        advance as f32 * 1000.0 / self.units_per_em()
    }

    /// Font units to 1/1000 em.
    pub fn scale(&self, units: i16) -> f32 {
        units as f32 * 1000.0 / self.units_per_em()
    }
}

/// Fonts available to the layout engine.
///
/// Supports two loading modes:
/// - "Helvetica": the PDF base-14 family, nothing embedded
/// - "./path/to/Font": a custom family loaded from disk using naming conventions
pub enum LoadedFonts {
    Helvetica,
    TrueType {
        regular: TrueTypeFont,
        bold: TrueTypeFont,
    },
}

impl LoadedFonts {
    pub fn load(font_name: &str) -> Result<LoadedFonts> {
        match font_name {
            "Helvetica" => Ok(LoadedFonts::Helvetica),
            _ => Self::load_from_path(font_name),
        }
    }

    fn load_from_path(font_path: &str) -> Result<LoadedFonts> {
        let base = PathBuf::from(font_path);

        let regular_path = Self::find_font_file(&base, &["Regular", "regular", ""])?;
        let regular = TrueTypeFont::load(&regular_path)?;

        // bold falls back to regular if the family doesn't ship one
        let bold_path = ["Bold", "bold"]
            .iter()
            .map(|suffix| PathBuf::from(format!("{}-{}.ttf", base.display(), suffix)))
            .find(|path| path.exists())
            .unwrap_or_else(|| regular_path.clone());
        let bold = TrueTypeFont::load(&bold_path)?;

        log::debug!(
            "Loaded fonts {} and {}",
            regular_path.display(),
            bold_path.display()
        );
        Ok(LoadedFonts::TrueType { regular, bold })
    }

    fn find_font_file(base: &Path, suffixes: &[&str]) -> Result<PathBuf> {
        if base
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("ttf"))
        {
            if base.exists() {
                return Ok(base.to_path_buf());
            }
            return Err(anyhow!("Font file not found: {}", base.display()));
        }

        let candidates: Vec<PathBuf> = suffixes
            .iter()
            .map(|suffix| {
                if suffix.is_empty() {
                    base.with_extension("ttf")
                } else {
                    PathBuf::from(format!("{}-{}.ttf", base.display(), suffix))
                }
            })
            .collect();

        if let Some(found) = candidates.iter().find(|path| path.exists()) {
            return Ok(found.clone());
        }

        let tried: Vec<String> = candidates
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        Err(anyhow!(
            "Could not find font file. Tried: {}. \
            \nHint: Place font files next to cv-book.toml with names like MyFont-Regular.ttf, MyFont-Bold.ttf.",
            tried.join(", ")
        ))
    }

    pub fn truetype(&self, weight: Weight) -> Option<&TrueTypeFont> {
        match (self, weight) {
            (LoadedFonts::Helvetica, _) => None,
            (LoadedFonts::TrueType { regular, .. }, Weight::Regular) => Some(regular),
            (LoadedFonts::TrueType { bold, .. }, Weight::Bold) => Some(bold),
        }
    }

    /// Width of `text` set at `size` points.
    pub fn width_of(&self, text: &str, weight: Weight, size: f32) -> f32 {
        let thousandths = match self.truetype(weight) {
            None => metrics::text_width(text, weight == Weight::Bold) as f32,
            Some(font) => text.chars().map(|c| font.glyph_width(font.glyph(c))).sum(),
        };
        thousandths * size / 1000.0
    }

    /// Distance from the top of a line box to its baseline at `size` points.
    pub fn ascent(&self, weight: Weight, size: f32) -> f32 {
        let thousandths = match self.truetype(weight) {
            None => metrics::ASCENT,
            Some(font) => font.scale(font.face.as_face_ref().ascender()),
        };
        thousandths * size / 1000.0
    }

    /// Distance below the baseline (negative) at `size` points.
    pub fn descent(&self, weight: Weight, size: f32) -> f32 {
        let thousandths = match self.truetype(weight) {
            None => metrics::DESCENT,
            Some(font) => font.scale(font.face.as_face_ref().descender()),
        };
        thousandths * size / 1000.0
    }
}
