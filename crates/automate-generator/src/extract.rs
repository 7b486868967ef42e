//! Structured output extraction
//!
//! Locates the JSON object inside free-form model output. A fenced
//! ```json block wins when present; otherwise the first *balanced*
//! top-level `{...}` span is taken, tracking string literals and escapes so
//! prose containing stray braces cannot corrupt the extraction.

/// Extract the JSON object span from model output, if any.
pub fn extract_structured_json(text: &str) -> Option<String> {
    if let Some(fenced) = fenced_block(text) {
        if let Some(span) = balanced_object(fenced) {
            return Some(span);
        }
    }
    balanced_object(text)
}

/// The body of the first fenced code block, info string skipped.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(&body[..close])
}

/// The first balanced top-level `{...}` span.
fn balanced_object(text: &str) -> Option<String> {
    let mut start = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        match start {
            None => {
                if ch == '{' {
                    start = Some(index);
                    depth = 1;
                }
            }
            Some(open) => {
                if in_string {
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == '"' {
                        in_string = false;
                    }
                } else {
                    match ch {
                        '"' => in_string = true,
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                return Some(text[open..=index].to_string());
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }
    None
}
