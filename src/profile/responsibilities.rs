/// How an experience record's responsibilities are laid out.
///
/// Decided once from the raw text: anything with two or more non-empty
/// comma-separated segments is a numbered list, everything else a paragraph.
/// Prose that happens to contain commas is split too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Responsibilities {
    Paragraph(String),
    NumberedList(Vec<String>),
}

impl Responsibilities {
    pub fn parse(raw: &str) -> Responsibilities {
        let items: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect();

        if items.len() > 1 {
            Responsibilities::NumberedList(items)
        } else {
            Responsibilities::Paragraph(raw.trim().to_string())
        }
    }

    /// Number of lines the block contributes before wrapping.
    pub fn len(&self) -> usize {
        match self {
            Responsibilities::Paragraph(text) if text.is_empty() => 0,
            Responsibilities::Paragraph(_) => 1,
            Responsibilities::NumberedList(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The lines handed to the line writer, list items prefixed `"{n}. "`.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Responsibilities::Paragraph(text) if text.is_empty() => Vec::new(),
            Responsibilities::Paragraph(text) => vec![text.clone()],
            Responsibilities::NumberedList(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {}", i + 1, item))
                .collect(),
        }
    }
}
