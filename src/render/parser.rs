//! Strict `${name}` template compiler.

use crate::error::TemplateError;

const OPEN: &str = "${";

/// A compiled segment of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text to emit verbatim. May be empty.
    Lit(String),
    /// Placeholder name, taken verbatim from between `${` and `}`.
    Var(String),
}

impl Segment {
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Lit(s) | Segment::Var(s) => s,
        }
    }
}

/// Compile `input` into alternating literal and placeholder segments.
///
/// The result always starts and ends with a [`Segment::Lit`] (possibly
/// empty), so literals sit at even and placeholders at odd positions.
pub fn parse(input: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut lit_start = 0;
    let mut pos = 0;

    while let Some(found) = input[pos..].find(OPEN) {
        let open = pos + found;
        let name_start = open + OPEN.len();

        let close = match input[name_start..].find(['{', '}']) {
            None => return Err(TemplateError::Unterminated { offset: open }),
            Some(i) if input.as_bytes()[name_start + i] == b'{' => {
                return Err(TemplateError::NestedBrace {
                    offset: name_start + i,
                });
            }
            Some(0) => return Err(TemplateError::EmptyName { offset: open }),
            Some(i) => name_start + i,
        };

        segments.push(Segment::Lit(input[lit_start..open].to_owned()));
        segments.push(Segment::Var(input[name_start..close].to_owned()));

        pos = close + 1;
        lit_start = pos;
    }

    segments.push(Segment::Lit(input[lit_start..].to_owned()));
    Ok(segments)
}
