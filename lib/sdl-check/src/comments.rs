use std::borrow::Cow;

/// Removes every `#` line comment, up to but not including the line terminator.
///
/// Line terminators are kept, so the line structure of the input survives.
/// Text without a `#` is returned borrowed.
pub fn strip_line_comments(text: &str) -> Cow<'_, str> {
    if !text.contains('#') {
        return Cow::Borrowed(text);
    }

    let mut stripped = String::with_capacity(text.len());
    let mut in_comment = false;

    for ch in text.chars() {
        match ch {
            '\n' | '\r' => {
                in_comment = false;
                stripped.push(ch);
            }
            '#' => in_comment = true,
            _ if in_comment => {}
            _ => stripped.push(ch),
        }
    }

    Cow::Owned(stripped)
}
