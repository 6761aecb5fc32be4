//! The identity block at the top of the first page.
//!
//! The photo (if any) sits at the left margin, scaled into a square of
//! `photo_size_pt`; the job seeker's name and contact details are stacked to
//! its right. The block is as tall as the taller of the two columns.

use crate::profile::ProfileDocument;
use crate::sinks::pdf::fonts::Weight;
use crate::sinks::pdf::images::ProfilePhoto;
use crate::sinks::pdf::layout::{colours, Canvas, Colour};

const PHOTO_GUTTER: f32 = 12.0;

pub fn render(canvas: &mut Canvas, profile: &ProfileDocument, photo: Option<&ProfilePhoto>) {
    let start = canvas.state.offset();
    let mut text_x = canvas.left();
    let mut photo_height = 0.0;

    if let Some(photo) = photo {
        let (width, height) = photo.fit_within(canvas.config.photo_size_pt);
        let x = canvas.left();
        canvas.draw_photo(x, width, height);
        text_x += canvas.config.photo_size_pt + PHOTO_GUTTER;
        photo_height = height;
    }

    let name = profile.full_name();
    if !name.is_empty() {
        let [r, g, b] = canvas.config.accent_colour;
        let size = canvas.config.font_size_name_pt;
        canvas.draw_text(text_x, Weight::Bold, size, Colour::new_rgb_bytes(r, g, b), &name);
        canvas.advance(size * 1.25);
    }

    let contact = [&profile.personal.email, &profile.personal.phone];
    for detail in contact.into_iter().flatten() {
        let detail = detail.trim();
        if detail.is_empty() {
            continue;
        }
        let size = canvas.config.font_size_body_pt;
        canvas.draw_text(text_x, Weight::Regular, size, colours::DARK_GREY, detail);
        canvas.advance(canvas.config.line_height_pt);
    }

    let used = canvas.state.offset() - start;
    if photo_height > used {
        canvas.advance(photo_height - used);
    }
    canvas.advance(canvas.config.record_trailing_gap_pt);
}
