use crate::error::CurlError;

/// Splits a command line into words the way a POSIX shell would for the
/// subset curl snippets use: single quotes, double quotes with backslash
/// escapes, and backslash line continuations.
///
/// A backslash followed by any whitespace outside quotes acts as a plain
/// separator, so commands whose newlines were flattened into spaces (`\ -H`)
/// still split correctly.
///
/// # Errors
///
/// Returns an error when a quote is left open.
pub fn tokenize(command: &str) -> Result<Vec<String>, CurlError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = command.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(inner) => current.push(inner),
                        None => return Err(CurlError::UnterminatedQuote { quote: '\'' }),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some('\n') => {}
                            Some(escaped @ ('"' | '\\' | '$' | '`')) => current.push(escaped),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => return Err(CurlError::UnterminatedQuote { quote: '"' }),
                        },
                        Some(inner) => current.push(inner),
                        None => return Err(CurlError::UnterminatedQuote { quote: '"' }),
                    }
                }
            }
            '\\' => match chars.peek().copied() {
                Some(next) if next.is_whitespace() => {
                    chars.next();
                    flush_word(&mut words, &mut current, &mut in_word);
                }
                Some(next) => {
                    chars.next();
                    in_word = true;
                    current.push(next);
                }
                None => {}
            },
            ws if ws.is_whitespace() => flush_word(&mut words, &mut current, &mut in_word),
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }
    flush_word(&mut words, &mut current, &mut in_word);
    Ok(words)
}

fn flush_word(words: &mut Vec<String>, current: &mut String, in_word: &mut bool) {
    if *in_word {
        words.push(std::mem::take(current));
        *in_word = false;
    }
}
