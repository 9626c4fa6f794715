//! Comma-separated text to rows of fields.

/// Parse delimited text into rows of string fields.
///
/// Rules:
/// - fields are comma-separated;
/// - a double-quoted field keeps commas, newlines, and carriage returns as
///   literal content; `""` inside quotes is one literal quote;
/// - carriage returns outside quotes are stripped;
/// - a newline outside quotes ends the row;
/// - rows whose every field is empty or whitespace are dropped;
/// - an unterminated quote at end of text is lenient: whatever accumulated
///   becomes the final field.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut value = String::new();
    let mut inside_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if inside_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    value.push('"');
                    chars.next();
                } else {
                    inside_quotes = false;
                }
            } else {
                value.push(ch);
            }
        } else {
            match ch {
                '"' => inside_quotes = true,
                ',' => current.push(std::mem::take(&mut value)),
                '\r' => {}
                '\n' => {
                    current.push(std::mem::take(&mut value));
                    rows.push(std::mem::take(&mut current));
                }
                _ => value.push(ch),
            }
        }
    }

    if !value.is_empty() || !current.is_empty() {
        current.push(value);
        rows.push(current);
    }

    rows.retain(|row| row.iter().any(|cell| !cell.trim().is_empty()));
    rows
}
