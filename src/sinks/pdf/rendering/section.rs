//! Section headers: an accent-coloured bold title with a rule beneath it.

use crate::sinks::pdf::fonts::Weight;
use crate::sinks::pdf::layout::{Canvas, Colour};

const DIVIDER_THICKNESS: f32 = 0.75;

/// Start a section, breaking first if `estimated_height` doesn't fit.
///
/// The estimate should cover the header plus the first bit of content so a
/// title never sits alone at the bottom of a page.
pub fn write_section(canvas: &mut Canvas, title: &str, estimated_height: f32) {
    let header_height = canvas.config.section_header_height_pt;
    canvas.ensure_space(estimated_height.max(header_height));
    canvas.mark_section(title);

    let [r, g, b] = canvas.config.accent_colour;
    let accent = Colour::new_rgb_bytes(r, g, b);
    let size = canvas.config.font_size_heading_pt;
    let x = canvas.left();
    canvas.draw_text(x, Weight::Bold, size, accent, title);
    canvas.draw_rule(header_height - 4.0, DIVIDER_THICKNESS, accent);
    canvas.advance(header_height);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sinks::pdf::config::PDF;
    use crate::sinks::pdf::fonts::LoadedFonts;
    use crate::sinks::pdf::layout::DrawOp;

    #[test]
    fn header_and_divider_share_a_page() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let mut canvas = Canvas::new(&config, &fonts);
        // leave less room than the estimate
        let room = canvas.state.bound() - canvas.state.offset();
        canvas.advance(room - 30.0);

        write_section(&mut canvas, "Idiomas", 56.0);
        assert_eq!(canvas.state.page_count(), 2);
        assert_eq!(
            canvas.state.offset(),
            config.margin_top_pt() + config.section_header_height_pt
        );

        let doc = canvas.finish();
        assert!(doc.pages[0].is_empty());
        assert!(matches!(doc.pages[1][0], DrawOp::Text { .. }));
        assert!(matches!(doc.pages[1][1], DrawOp::Rule { .. }));
        assert_eq!(doc.sections[0].page_index, 1);
    }

    #[test]
    fn fits_without_breaking() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let mut canvas = Canvas::new(&config, &fonts);
        write_section(&mut canvas, "Idiomas", 56.0);
        write_section(&mut canvas, "Habilidades", 56.0);
        assert_eq!(canvas.state.page_count(), 1);
        let doc = canvas.finish();
        assert_eq!(doc.section_titles(), vec!["Idiomas", "Habilidades"]);
    }
}
