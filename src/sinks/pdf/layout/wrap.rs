use crate::sinks::pdf::fonts::{LoadedFonts, Weight};

/// A stretch of text in a single weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    pub text: String,
    pub weight: Weight,
}

impl Run {
    pub fn new<S: ToString>(text: S, weight: Weight) -> Run {
        Run {
            text: text.to_string(),
            weight,
        }
    }
}

pub type Line = Vec<Run>;

enum Token<'t> {
    Word {
        text: &'t str,
        weight: Weight,
        spaced: bool,
    },
    Break,
}

fn tokenize(runs: &[Run]) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pending_space = false;
    for run in runs {
        for (i, hard_line) in run.text.split('\n').enumerate() {
            if i > 0 {
                tokens.push(Token::Break);
                pending_space = false;
            }
            let mut rest = hard_line;
            loop {
                let trimmed = rest.trim_start();
                if trimmed.len() != rest.len() {
                    pending_space = true;
                }
                if trimmed.is_empty() {
                    break;
                }
                let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
                tokens.push(Token::Word {
                    text: &trimmed[..end],
                    weight: run.weight,
                    spaced: pending_space,
                });
                pending_space = false;
                rest = &trimmed[end..];
            }
        }
    }
    tokens
}

fn push_text(line: &mut Line, text: &str, weight: Weight) {
    match line.last_mut() {
        Some(last) if last.weight == weight => last.text.push_str(text),
        _ => line.push(Run::new(text, weight)),
    }
}

/// Split a word wider than the line into pieces that each fit.
fn split_word(
    word: &str,
    weight: Weight,
    max_width: f32,
    fonts: &LoadedFonts,
    size: f32,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;
    for c in word.chars() {
        let mut buf = [0u8; 4];
        let cw = fonts.width_of(c.encode_utf8(&mut buf), weight, size);
        if !piece.is_empty() && width + cw > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += cw;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Greedy word wrap over mixed-weight runs.
///
/// Whitespace between words collapses to a single space, `\n` forces a break
/// and a word that can't fit on an empty line is broken between characters.
/// Blank input gives no lines at all.
pub fn wrap_runs(runs: &[Run], max_width: f32, fonts: &LoadedFonts, size: f32) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut line: Line = Vec::new();
    let mut width = 0.0;

    for token in tokenize(runs) {
        let (text, weight, spaced) = match token {
            Token::Break => {
                lines.push(std::mem::take(&mut line));
                width = 0.0;
                continue;
            }
            Token::Word {
                text,
                weight,
                spaced,
            } => (text, weight, spaced),
        };

        let word_width = fonts.width_of(text, weight, size);
        let mut space_width = if spaced && !line.is_empty() {
            fonts.width_of(" ", weight, size)
        } else {
            0.0
        };

        if !line.is_empty() && width + space_width + word_width > max_width {
            lines.push(std::mem::take(&mut line));
            width = 0.0;
            space_width = 0.0;
        }

        if line.is_empty() && word_width > max_width {
            let mut pieces = split_word(text, weight, max_width, fonts, size);
            let last = pieces.pop().unwrap_or_default();
            for piece in pieces {
                lines.push(vec![Run::new(piece, weight)]);
            }
            width = fonts.width_of(&last, weight, size);
            push_text(&mut line, &last, weight);
            continue;
        }

        if space_width > 0.0 {
            push_text(&mut line, " ", weight);
        }
        push_text(&mut line, text, weight);
        width += space_width + word_width;
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Width of an already wrapped line.
pub fn line_width(line: &[Run], fonts: &LoadedFonts, size: f32) -> f32 {
    line.iter()
        .map(|run| fonts.width_of(&run.text, run.weight, size))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.iter().map(|r| r.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let fonts = LoadedFonts::Helvetica;
        let lines = wrap_runs(&[Run::new("Hola  mundo", Weight::Regular)], 500.0, &fonts, 10.0);
        assert_eq!(plain(&lines), vec!["Hola mundo"]);
    }

    #[test]
    fn blank_text_has_no_lines() {
        let fonts = LoadedFonts::Helvetica;
        assert!(wrap_runs(&[Run::new("   ", Weight::Regular)], 500.0, &fonts, 10.0).is_empty());
        assert!(wrap_runs(&[], 500.0, &fonts, 10.0).is_empty());
    }

    #[test]
    fn wraps_at_word_boundaries_within_width() {
        let fonts = LoadedFonts::Helvetica;
        let text = "lorem ipsum dolor sit amet ".repeat(20);
        let lines = wrap_runs(&[Run::new(&text, Weight::Regular)], 200.0, &fonts, 10.0);
        assert!(lines.len() > 3);
        for line in &lines {
            assert!(line_width(line, &fonts, 10.0) <= 200.0);
        }
        let rejoined = plain(&lines).join(" ");
        assert_eq!(rejoined, text.trim_end());
    }

    #[test]
    fn mixed_weights_keep_their_runs() {
        let fonts = LoadedFonts::Helvetica;
        let lines = wrap_runs(
            &[
                Run::new("Fecha de nacimiento", Weight::Bold),
                Run::new(": 12-05-1990", Weight::Regular),
            ],
            500.0,
            &fonts,
            10.0,
        );
        assert_eq!(
            lines,
            vec![vec![
                Run::new("Fecha de nacimiento", Weight::Bold),
                Run::new(": 12-05-1990", Weight::Regular),
            ]]
        );
    }

    #[test]
    fn overlong_words_are_split() {
        let fonts = LoadedFonts::Helvetica;
        let word = "x".repeat(100);
        let lines = wrap_runs(&[Run::new(&word, Weight::Regular)], 50.0, &fonts, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(plain(&lines).concat(), word);
        for line in &lines {
            assert!(line_width(line, &fonts, 10.0) <= 50.0);
        }
    }

    #[test]
    fn newlines_force_breaks() {
        let fonts = LoadedFonts::Helvetica;
        let lines = wrap_runs(&[Run::new("uno\ndos\n\ntres", Weight::Regular)], 500.0, &fonts, 10.0);
        assert_eq!(plain(&lines), vec!["uno", "dos", "", "tres"]);
    }
}
