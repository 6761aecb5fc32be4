//! Page flow for the CV.
//!
//! Content is laid out top-down into [`DrawOp`]s; nothing touches the PDF
//! until the whole document has been placed. Vertical positions are measured
//! from the top edge of the page, the way the writers think about them, and
//! only flipped into PDF space when the document is serialized.
//!
//! [`PageState`] owns the single page-break decision. Every writer asks it for
//! room with [`PageState::ensure_space`] before emitting something that must not
//! be split, and every advance that reaches the bottom bound opens a fresh page.

mod wrap;
pub use wrap::*;

use crate::sinks::pdf::config::PDF;
use crate::sinks::pdf::fonts::{LoadedFonts, Weight};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Colour {
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }
}

pub mod colours {
    use super::Colour;

    pub const BLACK: Colour = Colour {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const DARK_GREY: Colour = Colour {
        r: 0.25,
        g: 0.25,
        b: 0.25,
    };
    pub const LIGHT_GREY: Colour = Colour {
        r: 0.8,
        g: 0.8,
        b: 0.8,
    };
}

/// One thing to paint on a page. `y` values are measured from the top edge.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        baseline: f32,
        text: String,
        weight: Weight,
        size: f32,
        colour: Colour,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
        colour: Colour,
    },
    Photo {
        x: f32,
        top: f32,
        width: f32,
        height: f32,
    },
}

/// Where a section header landed, used for bookmarks and statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionMark {
    pub title: String,
    pub page_index: usize,
    pub offset: f32,
}

/// Vertical cursor over a stack of identical pages.
#[derive(Clone, Debug, PartialEq)]
pub struct PageState {
    page_height: f32,
    top_margin: f32,
    bottom_margin: f32,
    offset: f32,
    page_index: usize,
}

impl PageState {
    pub fn new(page_height: f32, top_margin: f32, bottom_margin: f32) -> PageState {
        PageState {
            page_height,
            top_margin,
            bottom_margin,
            offset: top_margin,
            page_index: 0,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_count(&self) -> usize {
        self.page_index + 1
    }

    /// Lowest offset content may reach.
    pub fn bound(&self) -> f32 {
        self.page_height - self.bottom_margin
    }

    /// Height of an empty page between the margins.
    pub fn content_height(&self) -> f32 {
        self.bound() - self.top_margin
    }

    fn at_page_top(&self) -> bool {
        self.offset <= self.top_margin
    }

    /// Start a new page if `required` doesn't fit below the cursor.
    ///
    /// Returns whether a break happened. Calling it again with the same
    /// height is a no-op, and a fresh page is never broken: a block taller
    /// than a whole page starts at the top and gets split line by line.
    pub fn ensure_space(&mut self, required: f32) -> bool {
        if self.offset + required > self.bound() && !self.at_page_top() {
            self.new_page();
            true
        } else {
            false
        }
    }

    pub fn new_page(&mut self) {
        self.page_index += 1;
        self.offset = self.top_margin;
        log::debug!("Page break, now on page {}", self.page_count());
    }

    /// Move the cursor down, opening a new page once it reaches the bound.
    pub fn advance(&mut self, dy: f32) {
        self.offset += dy;
        if self.offset >= self.bound() {
            self.new_page();
        }
    }
}

/// The page buffer being written into, plus everything the writers need to
/// measure text.
pub struct Canvas<'a> {
    pub config: &'a PDF,
    pub fonts: &'a LoadedFonts,
    pub state: PageState,
    pages: Vec<Vec<DrawOp>>,
    sections: Vec<SectionMark>,
}

/// A finished layout, ready to be serialized.
#[derive(Clone, Debug, PartialEq)]
pub struct LaidOutDocument {
    pub pages: Vec<Vec<DrawOp>>,
    pub sections: Vec<SectionMark>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn section_titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }

    /// Every text run with the page it sits on, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.pages.iter().enumerate().flat_map(|(pi, ops)| {
            ops.iter().filter_map(move |op| match op {
                DrawOp::Text { text, .. } => Some((pi, text.as_str())),
                _ => None,
            })
        })
    }
}

impl<'a> Canvas<'a> {
    pub fn new(config: &'a PDF, fonts: &'a LoadedFonts) -> Canvas<'a> {
        Canvas {
            config,
            fonts,
            state: PageState::new(
                config.page_height_pt(),
                config.margin_top_pt(),
                config.margin_bottom_pt(),
            ),
            pages: vec![Vec::new()],
            sections: Vec::new(),
        }
    }

    pub fn left(&self) -> f32 {
        self.config.margin_side_pt()
    }

    pub fn right(&self) -> f32 {
        self.config.page_width_pt() - self.config.margin_side_pt()
    }

    pub fn content_width(&self) -> f32 {
        self.config.content_width_pt()
    }

    fn sync_pages(&mut self) {
        while self.pages.len() < self.state.page_count() {
            self.pages.push(Vec::new());
        }
    }

    pub fn ensure_space(&mut self, required: f32) -> bool {
        let broke = self.state.ensure_space(required);
        self.sync_pages();
        broke
    }

    pub fn advance(&mut self, dy: f32) {
        self.state.advance(dy);
        self.sync_pages();
    }

    fn push(&mut self, op: DrawOp) {
        self.sync_pages();
        let page = self.state.page_index();
        self.pages[page].push(op);
    }

    /// Remember that a section starts at the cursor.
    pub fn mark_section<S: ToString>(&mut self, title: S) {
        self.sections.push(SectionMark {
            title: title.to_string(),
            page_index: self.state.page_index(),
            offset: self.state.offset(),
        });
    }

    /// Draw text on the line box starting at the cursor.
    pub fn draw_text<S: ToString>(
        &mut self,
        x: f32,
        weight: Weight,
        size: f32,
        colour: Colour,
        text: S,
    ) {
        let baseline = self.state.offset() + self.fonts.ascent(weight, size);
        self.push(DrawOp::Text {
            x,
            baseline,
            text: text.to_string(),
            weight,
            size,
            colour,
        });
    }

    /// Horizontal rule across the content width, `dy` below the cursor.
    pub fn draw_rule(&mut self, dy: f32, thickness: f32, colour: Colour) {
        let y = self.state.offset() + dy;
        let (x1, x2) = (self.left(), self.right());
        self.push(DrawOp::Rule {
            x1,
            x2,
            y,
            thickness,
            colour,
        });
    }

    pub fn draw_photo(&mut self, x: f32, width: f32, height: f32) {
        let top = self.state.offset();
        self.push(DrawOp::Photo {
            x,
            top,
            width,
            height,
        });
    }

    /// Close the layout, dropping a trailing page that only exists because
    /// the last advance reached the bound.
    pub fn finish(mut self) -> LaidOutDocument {
        while self.pages.len() > 1 && self.pages.last().is_some_and(Vec::is_empty) {
            self.pages.pop();
        }
        LaidOutDocument {
            pages: self.pages,
            sections: self.sections,
        }
    }
}
