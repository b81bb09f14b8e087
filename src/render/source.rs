//! Locating the raw template text: inline, a plain file, or a `<script>`
//! element embedded in an HTML page.

use crate::error::SourceError;
use std::{fs, path::Path};

/// Read the template from `path`.
///
/// With `name` set, `path` is treated as an HTML page and the text of its
/// `<script data-template="NAME">` element is returned; otherwise the whole
/// file is the template.
pub fn from_file(path: &Path, name: Option<&str>) -> Result<String, SourceError> {
    let src = fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match name {
        Some(name) => script_text(&src, name).map(str::to_owned),
        None => Ok(src),
    }
}

/// Text content of the first `<script>` carrying `data-template="NAME"`.
///
/// Tag and attribute names match in any ASCII case; the template name
/// matches exactly. When several scripts carry the same name the first wins.
pub fn script_text<'a>(html: &'a str, name: &str) -> Result<&'a str, SourceError> {
    let not_found = || SourceError::ScriptNotFound(name.to_owned());
    let unclosed = || SourceError::ScriptUnclosed(name.to_owned());
    // ASCII lowering keeps every byte offset valid in `html`.
    let lower = html.to_ascii_lowercase();

    let mut from = 0;
    loop {
        let open = lower[from..].find("<script").ok_or_else(not_found)? + from;
        let tag_end = lower[open..]
            .find('>')
            .map(|i| open + i)
            .ok_or_else(unclosed)?;

        if has_template_attr(&html[open..tag_end], &lower[open..tag_end], name) {
            let body = tag_end + 1;
            let close = lower[body..].find("</script").ok_or_else(unclosed)?;
            return Ok(&html[body..body + close]);
        }
        from = tag_end + 1;
    }
}

/// `tag` carries a standalone `data-template` attribute whose quoted value
/// is `name`. `lower` is `tag` lowered to ASCII.
fn has_template_attr(tag: &str, lower: &str, name: &str) -> bool {
    const ATTR: &str = "data-template=";

    lower.match_indices(ATTR).any(|(at, _)| {
        let standalone = lower[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_whitespace());
        let value = &tag[at + ATTR.len()..];
        standalone
            && ['"', '\''].into_iter().any(|q| {
                value
                    .strip_prefix(q)
                    .and_then(|v| v.strip_prefix(name))
                    .is_some_and(|v| v.starts_with(q))
            })
    })
}
