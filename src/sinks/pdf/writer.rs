//! PDF serialization.
//!
//! Turns a [`LaidOutDocument`] into PDF bytes. Layout works top-down, PDF
//! bottom-up, so every `y` is flipped against the page height here and
//! nowhere else.
//!
//! ## Fonts
//!
//! Two font resources are registered on every page, `/F1` (regular) and `/F2`
//! (bold). With the built-in family these are the base-14 Helvetica faces in
//! WinAnsi encoding, so nothing is embedded. A TrueType family is embedded as a
//! Type0/CIDFontType2 pair with `Identity-H` encoding: text is written as
//! big-endian glyph ids, and a ToUnicode map covering the glyphs actually used
//! keeps the text searchable and copyable.
//!
//! ## Outline
//!
//! Every section header becomes a top-level bookmark pointing at the page and
//! height where it was drawn.
//!
//! Nothing time-dependent is written, so identical layouts serialize to
//! identical bytes.

use crate::sinks::pdf::config::PDF;
use crate::sinks::pdf::fonts::{LoadedFonts, TrueTypeFont, Weight};
use crate::sinks::pdf::images::ProfilePhoto;
use crate::sinks::pdf::layout::{DrawOp, LaidOutDocument};
use crate::sinks::pdf::metrics;
use miniz_oxide::deflate::compress_to_vec_zlib;
use owned_ttf_parser::{AsFaceRef, GlyphId};
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use std::collections::BTreeMap;

const COMPRESSION_LEVEL: u8 = 6;
const PHOTO_RESOURCE: &[u8] = b"Im1";

/// Title and author shown in the viewer's document properties.
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

/// Hands out object ids in order.
struct RefAlloc(i32);

impl RefAlloc {
    fn next(&mut self) -> Ref {
        let id = Ref::new(self.0);
        self.0 += 1;
        id
    }
}

/// Glyphs used per weight, glyph id to the character it was drawn for.
#[derive(Default)]
struct GlyphUsage {
    regular: BTreeMap<u16, char>,
    bold: BTreeMap<u16, char>,
}

impl GlyphUsage {
    fn for_weight(&mut self, weight: Weight) -> &mut BTreeMap<u16, char> {
        match weight {
            Weight::Regular => &mut self.regular,
            Weight::Bold => &mut self.bold,
        }
    }
}

fn font_resource(weight: Weight) -> &'static [u8] {
    match weight {
        Weight::Regular => b"F1",
        Weight::Bold => b"F2",
    }
}

fn system_info() -> SystemInfo<'static> {
    SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    }
}

fn encode_text(fonts: &LoadedFonts, weight: Weight, text: &str, usage: &mut GlyphUsage) -> Vec<u8> {
    match fonts.truetype(weight) {
        None => metrics::encode_win_ansi(text),
        Some(font) => {
            let used = usage.for_weight(weight);
            let mut encoded = Vec::with_capacity(text.len() * 2);
            for c in text.chars() {
                let glyph = font.glyph(c).0;
                used.entry(glyph).or_insert(c);
                encoded.extend_from_slice(&glyph.to_be_bytes());
            }
            encoded
        }
    }
}

fn page_content(
    ops: &[DrawOp],
    fonts: &LoadedFonts,
    page_height: f32,
    usage: &mut GlyphUsage,
) -> Vec<u8> {
    let mut content = Content::new();
    for op in ops {
        match op {
            DrawOp::Text {
                x,
                baseline,
                text,
                weight,
                size,
                colour,
            } => {
                let encoded = encode_text(fonts, *weight, text, usage);
                content.set_fill_rgb(colour.r, colour.g, colour.b);
                content.begin_text();
                content.set_font(Name(font_resource(*weight)), *size);
                content.next_line(*x, page_height - baseline);
                content.show(Str(&encoded));
                content.end_text();
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                thickness,
                colour,
            } => {
                content.save_state();
                content.set_stroke_rgb(colour.r, colour.g, colour.b);
                content.set_line_width(*thickness);
                content.move_to(*x1, page_height - y);
                content.line_to(*x2, page_height - y);
                content.stroke();
                content.restore_state();
            }
            DrawOp::Photo {
                x,
                top,
                width,
                height,
            } => {
                content.save_state();
                content.transform([*width, 0.0, 0.0, *height, *x, page_height - top - height]);
                content.x_object(Name(PHOTO_RESOURCE));
                content.restore_state();
            }
        }
    }
    content.finish()
}

fn write_photo(pdf: &mut Pdf, alloc: &mut RefAlloc, photo: &ProfilePhoto) -> Ref {
    let image_id = alloc.next();
    let (width, height) = (photo.width as i32, photo.height as i32);

    let mask_id = photo.alpha.as_ref().map(|alpha| {
        let mask_id = alloc.next();
        let data = compress_to_vec_zlib(alpha, COMPRESSION_LEVEL);
        let mut mask = pdf.image_xobject(mask_id, &data);
        mask.filter(Filter::FlateDecode);
        mask.width(width);
        mask.height(height);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask_id
    });

    let data = compress_to_vec_zlib(&photo.rgb, COMPRESSION_LEVEL);
    let mut image = pdf.image_xobject(image_id, &data);
    image.filter(Filter::FlateDecode);
    image.width(width);
    image.height(height);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    if let Some(mask_id) = mask_id {
        image.s_mask(mask_id);
    }
    image_id
}

fn write_truetype(
    pdf: &mut Pdf,
    alloc: &mut RefAlloc,
    type0_id: Ref,
    font: &TrueTypeFont,
    used: &BTreeMap<u16, char>,
) {
    let cid_id = alloc.next();
    let descriptor_id = alloc.next();
    let file_id = alloc.next();
    let cmap_id = alloc.next();
    let base_font = Name(font.name.as_bytes());

    pdf.type0_font(type0_id)
        .base_font(base_font)
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_id)
        .to_unicode(cmap_id);

    let mut cid = pdf.cid_font(cid_id);
    cid.subtype(CidFontType::Type2)
        .base_font(base_font)
        .system_info(system_info())
        .font_descriptor(descriptor_id)
        .default_width(0.0)
        .cid_to_gid_map_predefined(Name(b"Identity"));
    {
        let mut widths = cid.widths();
        for &glyph in used.keys() {
            widths.consecutive(glyph, [font.glyph_width(GlyphId(glyph))]);
        }
    }
    cid.finish();

    let face = font.face.as_face_ref();
    let bbox = face.global_bounding_box();
    let cap_height = face.capital_height().unwrap_or(face.ascender());
    pdf.font_descriptor(descriptor_id)
        .name(base_font)
        .flags(FontFlags::NON_SYMBOLIC)
        .bbox(Rect::new(
            font.scale(bbox.x_min),
            font.scale(bbox.y_min),
            font.scale(bbox.x_max),
            font.scale(bbox.y_max),
        ))
        .italic_angle(0.0)
        .ascent(font.scale(face.ascender()))
        .descent(font.scale(face.descender()))
        .cap_height(font.scale(cap_height))
        .stem_v(80.0)
        .font_file2(file_id);

    let data = compress_to_vec_zlib(font.data(), COMPRESSION_LEVEL);
    pdf.stream(file_id, &data).filter(Filter::FlateDecode);

    let mut cmap = UnicodeCmap::new(Name(b"Custom"), system_info());
    for (&glyph, &c) in used {
        cmap.pair(glyph, c);
    }
    let cmap_data = cmap.finish();
    pdf.cmap(cmap_id, &cmap_data);
}

/// Serialize a laid-out CV.
///
/// `photo` must be the image the layout placed, if it placed one.
pub fn write(
    config: &PDF,
    fonts: &LoadedFonts,
    doc: &LaidOutDocument,
    photo: Option<&ProfilePhoto>,
    info: &DocumentInfo,
) -> Vec<u8> {
    let mut alloc = RefAlloc(1);
    let catalog_id = alloc.next();
    let page_tree_id = alloc.next();
    let info_id = alloc.next();
    let regular_id = alloc.next();
    let bold_id = alloc.next();

    let mut pdf = Pdf::new();
    let page_width = config.page_width_pt();
    let page_height = config.page_height_pt();

    let photo_id = photo.map(|photo| write_photo(&mut pdf, &mut alloc, photo));

    let empty: Vec<DrawOp> = Vec::new();
    let pages: Vec<&Vec<DrawOp>> = if doc.pages.is_empty() {
        vec![&empty]
    } else {
        doc.pages.iter().collect()
    };

    let mut usage = GlyphUsage::default();
    let mut page_ids = Vec::with_capacity(pages.len());
    for ops in pages {
        let page_id = alloc.next();
        let content_id = alloc.next();
        page_ids.push(page_id);

        let content = page_content(ops, fonts, page_height, &mut usage);
        let compressed = compress_to_vec_zlib(&content, COMPRESSION_LEVEL);
        pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, page_width, page_height))
            .parent(page_tree_id)
            .contents(content_id);
        let mut resources = page.resources();
        resources
            .fonts()
            .pair(Name(font_resource(Weight::Regular)), regular_id)
            .pair(Name(font_resource(Weight::Bold)), bold_id);
        if let Some(photo_id) = photo_id {
            resources.x_objects().pair(Name(PHOTO_RESOURCE), photo_id);
        }
    }

    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    for (font_id, weight, base14) in [
        (regular_id, Weight::Regular, "Helvetica"),
        (bold_id, Weight::Bold, "Helvetica-Bold"),
    ] {
        match fonts.truetype(weight) {
            None => {
                pdf.type1_font(font_id)
                    .base_font(Name(base14.as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Some(font) => {
                let used = usage.for_weight(weight);
                write_truetype(&mut pdf, &mut alloc, font_id, font, used);
            }
        }
    }

    let outline_id = if doc.sections.is_empty() {
        None
    } else {
        let outline_id = alloc.next();
        let item_ids: Vec<Ref> = doc.sections.iter().map(|_| alloc.next()).collect();
        let count = item_ids.len();

        let mut outline = pdf.outline(outline_id);
        outline.first(item_ids[0]).last(item_ids[count - 1]);
        outline.count(count as i32);
        outline.finish();

        for (i, section) in doc.sections.iter().enumerate() {
            let mut item = pdf.outline_item(item_ids[i]);
            item.title(TextStr(&section.title)).parent(outline_id);
            if i > 0 {
                item.prev(item_ids[i - 1]);
            }
            if i + 1 < count {
                item.next(item_ids[i + 1]);
            }
            let page_id = page_ids
                .get(section.page_index)
                .or(page_ids.last())
                .copied()
                .unwrap_or(page_tree_id);
            item.dest()
                .page(page_id)
                .xyz(0.0, page_height - section.offset, None);
        }
        Some(outline_id)
    };

    let mut catalog = pdf.catalog(catalog_id);
    catalog.pages(page_tree_id);
    if let Some(outline_id) = outline_id {
        catalog.outlines(outline_id);
    }
    catalog.finish();

    let mut document_info = pdf.document_info(info_id);
    document_info.title(TextStr(&info.title));
    if !info.author.is_empty() {
        document_info.author(TextStr(&info.author));
    }
    document_info.creator(TextStr(concat!("cv-book v", env!("CARGO_PKG_VERSION"))));
    document_info.finish();

    let bytes = pdf.finish();
    log::debug!("Serialized {} page(s) into {} bytes", page_ids.len(), bytes.len());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::pdf::layout::{colours, Canvas};
    use image::{DynamicImage, Rgb, RgbImage};

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    fn two_page_layout(config: &PDF, fonts: &LoadedFonts) -> LaidOutDocument {
        let mut canvas = Canvas::new(config, fonts);
        canvas.mark_section("Idiomas");
        canvas.draw_text(canvas.left(), Weight::Bold, 13.0, colours::BLACK, "Idiomas");
        canvas.state.new_page();
        canvas.advance(0.0);
        canvas.mark_section("Habilidades");
        canvas.draw_text(canvas.left(), Weight::Regular, 10.0, colours::BLACK, "Año");
        canvas.finish()
    }

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "CV - Ana Vera".to_string(),
            author: "Ana Vera".to_string(),
        }
    }

    #[test]
    fn writes_pages_fonts_and_outline() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let doc = two_page_layout(&config, &fonts);
        assert_eq!(doc.page_count(), 2);

        let bytes = write(&config, &fonts, &doc, None, &info());
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, "/Count 2"));
        assert!(contains(&bytes, "/Helvetica-Bold"));
        assert!(contains(&bytes, "/WinAnsiEncoding"));
        assert!(contains(&bytes, "/Outlines"));
        assert!(contains(&bytes, "(Habilidades)"));
        assert!(contains(&bytes, "(Ana Vera)"));
        assert!(!contains(&bytes, "/XObject"));
        assert!(!contains(&bytes, "/CreationDate"));
    }

    #[test]
    fn photo_is_embedded_and_referenced() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let photo = ProfilePhoto::from_image(&DynamicImage::ImageRgb8(RgbImage::from_pixel(
            3,
            3,
            Rgb([200, 10, 10]),
        )));
        let mut canvas = Canvas::new(&config, &fonts);
        canvas.draw_photo(canvas.left(), 84.0, 84.0);
        let doc = canvas.finish();

        let bytes = write(&config, &fonts, &doc, Some(&photo), &info());
        assert!(contains(&bytes, "/XObject"));
        assert!(contains(&bytes, "/Im1"));
        assert!(contains(&bytes, "/DeviceRGB"));
        assert!(!contains(&bytes, "/SMask"));
    }

    #[test]
    fn same_layout_same_bytes() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let doc = two_page_layout(&config, &fonts);
        assert_eq!(
            write(&config, &fonts, &doc, None, &info()),
            write(&config, &fonts, &doc, None, &info())
        );
    }

    #[test]
    fn empty_layout_still_has_a_page() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let doc = LaidOutDocument {
            pages: Vec::new(),
            sections: Vec::new(),
        };
        let bytes = write(&config, &fonts, &doc, None, &info());
        assert!(contains(&bytes, "/Count 1"));
        assert!(!contains(&bytes, "/Outlines"));
    }
}
