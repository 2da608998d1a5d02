//! Backslash escapes in separator directive values.
//!
//! Zeek writes `#separator \x09` rather than a literal tab. Only three forms
//! are recognized: `\t`, `\n` and `\xHH`. Anything else, including a `\x`
//! without two hex digits, is kept as literal text.
//!
//! `\xHH` only decodes ASCII values. Lines are read as UTF-8, so a single
//! byte above 0x7f could never match a separator; such escapes stay literal.

/// Decode the escape sequences of a directive value.
///
/// ```
/// use zeeksql_core::header::decode_escapes;
///
/// assert_eq!(decode_escapes(r"\x09"), "\t");
/// assert_eq!(decode_escapes(r"\q"), r"\q");
/// ```
pub fn decode_escapes(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '\\' && i + 1 < chars.len() {
            match chars[i + 1] {
                't' => {
                    out.push('\t');
                    i += 2;
                    continue;
                }
                'n' => {
                    out.push('\n');
                    i += 2;
                    continue;
                }
                'x' => {
                    if let Some(c) = hex_char(&chars[i + 2..]) {
                        out.push(c);
                        i += 4;
                        continue;
                    }
                }
                _ => {}
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/// The ASCII character encoded by the first two hex digits of `digits`.
fn hex_char(digits: &[char]) -> Option<char> {
    match digits {
        [hi, lo, ..] => {
            let value = u8::try_from(hi.to_digit(16)? * 16 + lo.to_digit(16)?).ok()?;
            value.is_ascii().then_some(char::from(value))
        }
        _ => None,
    }
}
