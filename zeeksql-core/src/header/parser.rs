//! Directive parsing for the Zeek preamble.

use std::io::BufRead;

use tracing::trace;

use super::{decode_escapes, split_tokens, ZeekHeader};
use crate::error::{HeaderError, Result};
use crate::io::LineReader;

/// Parse the `#`-directive preamble of a Zeek log.
///
/// Reads lines until the first one that is empty or does not start with
/// `#`. That line is consumed from `reader` but is not counted in
/// [`ZeekHeader::preamble_lines`], so re-skipping `preamble_lines` lines
/// from the start of a file lands exactly on it.
///
/// # Errors
///
/// - [`HeaderError::MissingFieldsDirective`] if no field names were found
/// - [`HeaderError::MissingTypesDirective`] if no type names were found
/// - [`HeaderError::FieldTypeCountMismatch`] if the two lists differ in length
/// - `Error::Io` if the stream cannot be read
pub fn parse_header<R: BufRead>(reader: &mut LineReader<R>) -> Result<ZeekHeader> {
    let mut header = ZeekHeader::default();
    let mut line = String::new();

    while reader.read_line(&mut line)? {
        let Some(directive_line) = line.strip_prefix('#') else {
            break;
        };
        header.preamble_lines += 1;

        let (directive, value) = split_directive(directive_line);
        apply_directive(&mut header, directive, value);
    }

    validate(&header)?;
    Ok(header)
}

/// Split `name<TAB>value` (or `name value`) after the leading `#`.
fn split_directive(line: &str) -> (&str, &str) {
    let split_at = line.find('\t').or_else(|| line.find(' '));
    match split_at {
        Some(pos) => (&line[..pos], &line[pos + 1..]),
        None => (line, ""),
    }
}

fn apply_directive(header: &mut ZeekHeader, directive: &str, value: &str) {
    match directive {
        "separator" => {
            if let Some(c) = decode_escapes(value).chars().next() {
                header.field_separator = c;
            }
        }
        "set_separator" => {
            if let Some(c) = decode_escapes(value).chars().next() {
                header.set_separator = c;
            }
        }
        "empty_field" => header.empty_field = value.to_string(),
        "unset_field" => header.unset_field = value.to_string(),
        "path" => header.stream_path = value.to_string(),
        "open" => header.opened_at = value.to_string(),
        "fields" => header.fields = split_list(value, header.field_separator),
        "types" => header.types = split_list(value, header.field_separator),
        other => trace!(directive = other, "ignoring unrecognized Zeek directive"),
    }
}

/// Split a directive value into names; an empty value yields no names.
fn split_list(value: &str, separator: char) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    split_tokens(value, separator).map(str::to_string).collect()
}

fn validate(header: &ZeekHeader) -> std::result::Result<(), HeaderError> {
    if header.fields.is_empty() {
        return Err(HeaderError::MissingFieldsDirective);
    }
    if header.types.is_empty() {
        return Err(HeaderError::MissingTypesDirective);
    }
    if header.fields.len() != header.types.len() {
        return Err(HeaderError::FieldTypeCountMismatch {
            fields: header.fields.len(),
            types: header.types.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CONN_HEADER: &str = "#separator \\x09\n\
#set_separator\t,\n\
#empty_field\t(empty)\n\
#unset_field\t-\n\
#path\tconn\n\
#open\t2024-01-15-10-00-00\n\
#fields\tts\tuid\tid.orig_h\tduration\n\
#types\ttime\tstring\taddr\tinterval\n";

    fn reader(text: &str) -> LineReader<Cursor<Vec<u8>>> {
        LineReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    fn parse(text: &str) -> Result<ZeekHeader> {
        parse_header(&mut reader(text))
    }

    #[test]
    fn test_parse_full_header() {
        let text = format!("{CONN_HEADER}1.0\tCabc\t10.0.0.1\t0.5\n");
        let header = parse(&text).unwrap();

        assert_eq!(header.field_separator, '\t');
        assert_eq!(header.set_separator, ',');
        assert_eq!(header.empty_field, "(empty)");
        assert_eq!(header.unset_field, "-");
        assert_eq!(header.stream_path, "conn");
        assert_eq!(header.opened_at, "2024-01-15-10-00-00");
        assert_eq!(header.fields, vec!["ts", "uid", "id.orig_h", "duration"]);
        assert_eq!(header.types, vec!["time", "string", "addr", "interval"]);
        assert_eq!(header.preamble_lines, 8);
    }

    #[test]
    fn test_stream_left_after_terminating_line() {
        let text = format!("{CONN_HEADER}first\nsecond\n");
        let mut reader = reader(&text);
        parse_header(&mut reader).unwrap();

        let mut line = String::new();
        assert!(reader.read_line(&mut line).unwrap());
        assert_eq!(line, "second");
    }

    #[test]
    fn test_header_only_file() {
        let header = parse(CONN_HEADER).unwrap();
        assert_eq!(header.preamble_lines, 8);
    }

    #[test]
    fn test_custom_separators() {
        let text = "#separator \\x7c\n\
#set_separator ;\n\
#fields a|b\n\
#types count|set[count]\n";
        let header = parse(text).unwrap();
        assert_eq!(header.field_separator, '|');
        assert_eq!(header.set_separator, ';');
        assert_eq!(header.fields, vec!["a", "b"]);
        assert_eq!(header.types, vec!["count", "set[count]"]);
    }

    #[test]
    fn test_empty_separator_keeps_default() {
        let text = "#separator\n#fields\ta\n#types\tcount\n";
        let header = parse(text).unwrap();
        assert_eq!(header.field_separator, '\t');
    }

    #[test]
    fn test_unknown_directive_ignored() {
        let text = "#frobnicate\tyes\n#fields\ta\n#types\tcount\n";
        let header = parse(text).unwrap();
        assert_eq!(header.fields, vec!["a"]);
        assert_eq!(header.preamble_lines, 3);
    }

    #[test]
    fn test_stops_at_empty_line() {
        let text = "#fields\ta\n#types\tcount\n\n#path\tlate\n";
        let header = parse(text).unwrap();
        assert_eq!(header.stream_path, "");
        assert_eq!(header.preamble_lines, 2);
    }

    #[test]
    fn test_missing_fields() {
        let err = parse("#types\tcount\n1\n").unwrap_err();
        assert_eq!(
            err.header_error(),
            Some(&HeaderError::MissingFieldsDirective)
        );
    }

    #[test]
    fn test_missing_types() {
        let err = parse("#fields\ta\n1\n").unwrap_err();
        assert_eq!(err.header_error(), Some(&HeaderError::MissingTypesDirective));
    }

    #[test]
    fn test_field_type_mismatch() {
        let err = parse("#fields\ta\tb\n#types\tcount\n1\n").unwrap_err();
        assert_eq!(
            err.header_error(),
            Some(&HeaderError::FieldTypeCountMismatch {
                fields: 2,
                types: 1
            })
        );
    }

    #[test]
    fn test_trailing_separator_on_fields() {
        let header = parse("#fields\ta\tb\t\n#types\tcount\tstring\n").unwrap();
        assert_eq!(header.fields, vec!["a", "b"]);
        assert_eq!(header.types, vec!["count", "string"]);
    }

    #[test]
    fn test_interior_empty_name_kept() {
        let err = parse("#fields\ta\t\tb\n#types\tcount\tstring\n").unwrap_err();
        assert_eq!(
            err.header_error(),
            Some(&HeaderError::FieldTypeCountMismatch {
                fields: 3,
                types: 2
            })
        );
    }

    #[test]
    fn test_empty_input() {
        let err = parse("").unwrap_err();
        assert_eq!(
            err.header_error(),
            Some(&HeaderError::MissingFieldsDirective)
        );
    }
}
