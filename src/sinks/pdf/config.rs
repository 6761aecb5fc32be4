use crate::sinks::pdf::labels::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub enum PageSize {
    A4,
    Letter,
    Legal,
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::A4 => write!(f, "A4 (8.27\" x 11.69\")"),
            PageSize::Letter => write!(f, "US Letter (8.5\" x 11\")"),
            PageSize::Legal => write!(f, "US Legal (8.5\" x 14\")"),
        }
    }
}

impl PageSize {
    /// Width and height in inches
    pub fn dimensions_in(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (8.27, 11.69),
            PageSize::Letter => (8.5, 11.0),
            PageSize::Legal => (8.5, 14.0),
        }
    }

    pub fn all() -> &'static [PageSize] {
        &[PageSize::A4, PageSize::Letter, PageSize::Legal]
    }
}

/// PDF output configuration.
///
/// The CV flows down a single column, so margins are symmetric left/right.
/// Every field has a default so a hand-written `cv-book.toml` only needs the
/// values it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PDF {
    /// "Helvetica" (not embedded) or a path to a TrueType family
    pub font: String,
    pub locale: Locale,
    /// Output PDF file path used by `render` when none is given on the command line
    pub outfile: PathBuf,
    pub page_width_in: f32,
    pub page_height_in: f32,
    pub margin_top_in: f32,
    /// Left and right margin
    pub margin_side_in: f32,
    pub margin_bottom_in: f32,
    pub font_size_name_pt: f32,
    pub font_size_heading_pt: f32,
    pub font_size_body_pt: f32,
    /// Vertical advance per rendered line
    pub line_height_pt: f32,
    /// Vertical advance after a section title and its divider
    pub section_header_height_pt: f32,
    /// Space a section needs before its header may start on the current page
    pub section_estimate_pt: f32,
    /// Gap after the divider that opens a record block
    pub record_gap_pt: f32,
    /// Gap after the divider that closes a record block
    pub record_trailing_gap_pt: f32,
    /// Fixed part of the space estimate for an experience's responsibilities
    pub responsibilities_base_pt: f32,
    /// Section title colour as RGB bytes
    pub accent_colour: [u8; 3],
    /// Edge length of the square profile photo
    pub photo_size_pt: f32,
}

impl Default for PDF {
    fn default() -> Self {
        let (page_width_in, page_height_in) = PageSize::A4.dimensions_in();
        PDF {
            font: "Helvetica".to_string(),
            locale: Locale::default(),
            outfile: PathBuf::from("cv.pdf"),
            page_width_in,
            page_height_in,
            margin_top_in: 0.6,
            margin_side_in: 0.6,
            margin_bottom_in: 0.6,
            font_size_name_pt: 20.0,
            font_size_heading_pt: 13.0,
            font_size_body_pt: 10.0,
            line_height_pt: 14.0,
            section_header_height_pt: 20.0,
            section_estimate_pt: 56.0,
            record_gap_pt: 6.0,
            record_trailing_gap_pt: 8.0,
            responsibilities_base_pt: 14.0,
            accent_colour: [31, 78, 121],
            photo_size_pt: 84.0,
        }
    }
}

impl PDF {
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        let (w, h) = page_size.dimensions_in();
        self.page_width_in = w;
        self.page_height_in = h;
        self
    }

    pub fn page_width_pt(&self) -> f32 {
        self.page_width_in * 72.0
    }

    pub fn page_height_pt(&self) -> f32 {
        self.page_height_in * 72.0
    }

    pub fn margin_top_pt(&self) -> f32 {
        self.margin_top_in * 72.0
    }

    pub fn margin_side_pt(&self) -> f32 {
        self.margin_side_in * 72.0
    }

    pub fn margin_bottom_pt(&self) -> f32 {
        self.margin_bottom_in * 72.0
    }

    /// Width available to text between the side margins
    pub fn content_width_pt(&self) -> f32 {
        self.page_width_pt() - 2.0 * self.margin_side_pt()
    }
}

/// Statistics from rendering a PDF, used for user feedback.
pub struct RenderStats {
    pub page_count: usize,
    /// Titles of the sections that made it into the document, in order
    pub sections: Vec<String>,
    pub bytes: usize,
}
