//! Tag-list encoding for comma-separated autocomplete inputs.
//!
//! Entries containing a comma or a double quote are wrapped in double
//! quotes, with inner quotes doubled: `Cats, "Inc"` becomes
//! `"Cats, ""Inc"""`. [`explode`] reverses this while splitting on commas.

/// Splits a typed tag list into entries.
///
/// Unquoted commas separate entries. Quoted sections may contain commas
/// and doubled quotes. Entries are trimmed and empty entries dropped.
pub fn explode(input: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
            continue;
        }
        match ch {
            ',' => push_tag(&mut tags, &mut current),
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            _ => current.push(ch),
        }
    }
    push_tag(&mut tags, &mut current);
    tags
}

fn push_tag(tags: &mut Vec<String>, current: &mut String) {
    let tag = current.trim();
    if !tag.is_empty() {
        tags.push(tag.to_string());
    }
    current.clear();
}

/// Returns the last entry of a typed tag list, if any.
pub fn last_tag(input: &str) -> Option<String> {
    explode(input).pop()
}

/// Quotes an entry if it contains a comma or a double quote.
pub fn encode(tag: &str) -> String {
    if tag.contains(',') || tag.contains('"') {
        format!("\"{}\"", tag.replace('"', "\"\""))
    } else {
        tag.to_string()
    }
}

/// Encodes and joins entries into a tag list.
pub fn implode<I, S>(tags: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| encode(t.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
