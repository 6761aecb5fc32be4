//! Glyph widths for the PDF base-14 Helvetica faces.
//!
//! Base-14 fonts aren't embedded, so the only metrics available are the ones
//! published in Adobe's AFM files. Widths are in 1/1000 em and cover printable
//! ASCII; index = (char as usize) - 32. Accented Latin-1 letters share the
//! width of their base letter in both faces.

pub const ASCENT: f32 = 718.0;
pub const DESCENT: f32 = -207.0;
const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width of `c` in 1/1000 em.
pub fn char_width(c: char, bold: bool) -> u16 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    let c = base_letter(c);
    match c as u32 {
        0x20..=0x7e => table[c as usize - 32],
        _ => match c {
            '¡' => 333,
            '¿' => 611,
            '°' => 400,
            'ª' | 'º' => {
                if bold {
                    370
                } else {
                    365
                }
            }
            '–' => 556,
            '—' | '…' => 1000,
            '‘' | '’' => 222,
            '“' | '”' => 333,
            '•' => 350,
            _ => FALLBACK_WIDTH,
        },
    }
}

/// Width of `text` in 1/1000 em.
pub fn text_width(text: &str, bold: bool) -> u32 {
    text.chars().map(|c| char_width(c, bold) as u32).sum()
}

fn base_letter(c: char) -> char {
    match c {
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ñ' => 'N',
        'Ç' => 'C',
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        _ => c,
    }
}

/// Encode `text` as WinAnsi bytes for a base-14 font.
///
/// Latin-1 maps straight through; the typographic punctuation WinAnsi keeps in
/// 0x80..0x9F is remapped, anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7e | 0xa0..=0xff => c as u8,
            _ => match c {
                '€' => 0x80,
                '…' => 0x85,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                _ => b'?',
            },
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ascii_widths_come_from_the_afm_tables() {
        assert_eq!(char_width(' ', false), 278);
        assert_eq!(char_width('W', false), 944);
        assert_eq!(char_width('i', false), 222);
        assert_eq!(char_width('i', true), 278);
        assert_eq!(char_width('~', true), 584);
    }

    #[test]
    fn accented_letters_share_base_widths() {
        assert_eq!(char_width('ñ', true), char_width('n', true));
        assert_eq!(char_width('Á', false), char_width('A', false));
        assert_eq!(text_width("Cantón", false), text_width("Canton", false));
    }

    #[test]
    fn bold_is_never_narrower_for_text() {
        let sample = "Experiencia laboral: Jefe de bodega";
        assert!(text_width(sample, true) >= text_width(sample, false));
    }

    #[test]
    fn encodes_latin1_and_replaces_the_rest() {
        assert_eq!(encode_win_ansi("Año"), vec![b'A', 0xf1, b'o']);
        assert_eq!(encode_win_ansi("a–b"), vec![b'a', 0x96, b'b']);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }
}
