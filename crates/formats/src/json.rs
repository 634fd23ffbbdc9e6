//! Lenient JSON reading for hand-edited config files.

use serde::de::DeserializeOwned;

/// Parses `payload` as JSON; if that fails, retries with `//` and `/* */`
/// comments removed. The error of the strict attempt is returned when both
/// fail, since it points at the original text.
pub fn from_str_lenient<T: DeserializeOwned>(payload: &str) -> Result<T, serde_json::Error> {
    match serde_json::from_str(payload) {
        Ok(v) => Ok(v),
        Err(strict) => serde_json::from_str(&strip_comments(payload)).map_err(|_| strict),
    }
}

/// Removes line and block comments outside of string literals.
pub fn strip_comments(payload: &str) -> String {
    let mut out = String::with_capacity(payload.len());
    let mut chars = payload.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }
    out
}
