use std::fmt;

/// Work area of an experience record.
///
/// The backend stores areas as a composite `"id,label"` string. Only the label
/// is meant for humans; the numeric identifier must never reach the page. A
/// value without a comma is taken to be a bare label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub id: Option<u32>,
    pub label: String,
}

impl Area {
    pub fn parse(raw: &str) -> Area {
        match raw.split_once(',') {
            Some((id, rest)) => Area {
                id: id.trim().parse().ok(),
                label: rest.split(',').next().unwrap_or_default().trim().to_string(),
            },
            None => Area {
                id: None,
                label: raw.trim().to_string(),
            },
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
