//! Body text writers.
//!
//! Everything below a section header goes through one of these. A line is
//! wrapped to the content width, asks the page state for room for all of its
//! lines up front (capped at one page), then re-checks before each line so a
//! block taller than a page splits cleanly.
//!
//! ## Labelled values
//!
//! [`write_line`] treats `"Label: value"` specially: when the text splits on
//! `:` into exactly two parts, the label is set in bold and the value in
//! regular weight. Text with no colon or more than one colon (times, URLs) is
//! written as-is. Date labels are the exception: they split at the first colon
//! so timestamps keep working, and their values are normalised to
//! `dd-MM-yyyy`.

use crate::profile::dates;
use crate::sinks::pdf::fonts::Weight;
use crate::sinks::pdf::layout::{colours, wrap_runs, Canvas, Run};

/// Split `"Label: value"` into its two halves, if it has exactly one colon.
pub fn split_label(raw: &str) -> Option<(&str, &str)> {
    let mut parts = raw.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(label), Some(value), None) => Some((label, value)),
        _ => None,
    }
}

fn label_runs(canvas: &Canvas, raw: &str) -> Vec<Run> {
    let labels = canvas.config.locale.labels();
    let date_field = raw
        .split_once(':')
        .filter(|(label, _)| labels.date_fields().contains(&label.trim()));

    let (label, value) = match (date_field, split_label(raw)) {
        (Some((label, value)), _) => {
            let (label, value) = (label.trim(), value.trim());
            let value = match dates::parse(value) {
                Some(date) => dates::format_day_month_year(date),
                None => {
                    log::warn!("Could not parse `{value}` for `{label}`, rendering verbatim");
                    value.to_string()
                }
            };
            (label, value)
        }
        (None, Some((label, value))) => (label.trim(), value.trim().to_string()),
        (None, None) => return vec![Run::new(raw, Weight::Regular)],
    };

    vec![
        Run::new(label, Weight::Bold),
        Run::new(format!(": {value}"), Weight::Regular),
    ]
}

/// Lay out wrapped runs at the body size, one line box per wrapped line.
fn emit(canvas: &mut Canvas, runs: &[Run]) {
    let size = canvas.config.font_size_body_pt;
    let line_height = canvas.config.line_height_pt;
    let lines = wrap_runs(runs, canvas.content_width(), canvas.fonts, size);
    if lines.is_empty() {
        return;
    }

    let required = (lines.len() as f32 * line_height).min(canvas.state.content_height());
    canvas.ensure_space(required);

    for line in lines {
        canvas.ensure_space(line_height);
        let mut x = canvas.left();
        for run in line {
            let width = canvas.fonts.width_of(&run.text, run.weight, size);
            canvas.draw_text(x, run.weight, size, colours::BLACK, &run.text);
            x += width;
        }
        canvas.advance(line_height);
    }
}

/// Write a line of body text, bolding the label of `"Label: value"` text.
pub fn write_line(canvas: &mut Canvas, raw: &str) {
    let runs = label_runs(canvas, raw);
    emit(canvas, &runs);
}

/// Write text in a single weight with no label handling.
pub fn write_styled(canvas: &mut Canvas, text: &str, weight: Weight) {
    emit(canvas, &[Run::new(text, weight)]);
}

/// Write free text such as the presentation, honouring its line breaks.
pub fn write_paragraph(canvas: &mut Canvas, text: &str) {
    write_styled(canvas, text, Weight::Regular);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sinks::pdf::config::PDF;
    use crate::sinks::pdf::fonts::LoadedFonts;
    use crate::sinks::pdf::labels::Locale;
    use crate::sinks::pdf::layout::DrawOp;
    use pretty_assertions::assert_eq;

    fn runs_of(ops: &[DrawOp]) -> Vec<(String, Weight)> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, weight, .. } => Some((text.clone(), *weight)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn splits_only_on_a_single_colon() {
        assert_eq!(split_label("Phone: 555"), Some(("Phone", " 555")));
        assert_eq!(split_label("no colon"), None);
        assert_eq!(split_label("Time: 10:30"), None);
    }

    #[test]
    fn labels_are_bold_and_values_regular() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let mut canvas = Canvas::new(&config, &fonts);
        write_line(&mut canvas, "Teléfono:   0999999999 ");
        let doc = canvas.finish();
        assert_eq!(
            runs_of(&doc.pages[0]),
            vec![
                ("Teléfono".to_string(), Weight::Bold),
                (": 0999999999".to_string(), Weight::Regular),
            ]
        );
    }

    #[test]
    fn date_labels_are_normalised() {
        let config = PDF {
            locale: Locale::English,
            ..PDF::default()
        };
        let fonts = LoadedFonts::Helvetica;
        let mut canvas = Canvas::new(&config, &fonts);
        write_line(&mut canvas, "Birth date: 1990-05-12T00:00:00.000Z");
        write_line(&mut canvas, "Date: 2021-11-03 08:15:00");
        write_line(&mut canvas, "Phone: 2021-11-03");
        let doc = canvas.finish();
        let values: Vec<String> = runs_of(&doc.pages[0])
            .into_iter()
            .filter(|(_, w)| *w == Weight::Regular)
            .map(|(t, _)| t)
            .collect();
        assert_eq!(values, vec![": 12-05-1990", ": 03-11-2021", ": 2021-11-03"]);
    }

    #[test]
    fn timestamp_dates_keep_their_label() {
        let config = PDF {
            locale: Locale::English,
            ..PDF::default()
        };
        let fonts = LoadedFonts::Helvetica;
        let mut canvas = Canvas::new(&config, &fonts);
        write_line(&mut canvas, "Birth date: 1994-02-03T05:00:00.000Z");
        write_line(&mut canvas, "Birth date: 10:30 maybe");
        let doc = canvas.finish();
        assert_eq!(
            runs_of(&doc.pages[0]),
            vec![
                ("Birth date".to_string(), Weight::Bold),
                (": 03-02-1994".to_string(), Weight::Regular),
                ("Birth date".to_string(), Weight::Bold),
                (": 10:30 maybe".to_string(), Weight::Regular),
            ]
        );
    }

    #[test]
    fn unlabelled_text_is_regular() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let mut canvas = Canvas::new(&config, &fonts);
        write_line(&mut canvas, "Reunión a las 10:30: sala 2");
        let doc = canvas.finish();
        assert_eq!(
            runs_of(&doc.pages[0]),
            vec![("Reunión a las 10:30: sala 2".to_string(), Weight::Regular)]
        );
    }

    #[test]
    fn advances_one_line_height_per_wrapped_line() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let mut canvas = Canvas::new(&config, &fonts);
        let start = canvas.state.offset();
        write_paragraph(&mut canvas, &"palabra ".repeat(200));
        let doc_lines = {
            let lines = (canvas.state.offset() - start) / config.line_height_pt;
            lines.round() as usize
        };
        let doc = canvas.finish();
        assert_eq!(doc.pages[0].len(), doc_lines);
        assert!(doc_lines >= 3);
    }

    #[test]
    fn long_blocks_flow_onto_new_pages_within_bounds() {
        let config = PDF::default();
        let fonts = LoadedFonts::Helvetica;
        let mut canvas = Canvas::new(&config, &fonts);
        for i in 0..200 {
            write_line(&mut canvas, &format!("Item {i}: valor"));
            assert!(canvas.state.offset() < canvas.state.bound());
        }
        let doc = canvas.finish();
        assert!(doc.page_count() > 1);
        for ops in &doc.pages {
            for op in ops {
                if let DrawOp::Text { baseline, .. } = op {
                    assert!(*baseline <= config.page_height_pt() - config.margin_bottom_pt());
                }
            }
        }
    }
}
