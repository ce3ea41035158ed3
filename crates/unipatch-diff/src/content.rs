//! One side of a comparison and the line view the engine works on.

/// The bytes on one side of a comparison, or their absence.
///
/// `Absent` means the file does not exist on that side: an absent old side
/// describes a creation, an absent new side a deletion. `Present` with an
/// empty slice is an existing, empty file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ByteContent<'a> {
    /// No file on this side.
    #[default]
    Absent,
    /// The file's bytes, possibly empty.
    Present(&'a [u8]),
}

impl<'a> ByteContent<'a> {
    /// `true` for [`ByteContent::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The bytes of a present side, `None` when absent.
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Self::Absent => None,
            Self::Present(bytes) => Some(bytes),
        }
    }
}

impl<'a> From<&'a [u8]> for ByteContent<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Present(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteContent<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Present(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for ByteContent<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Present(bytes)
    }
}

impl<'a> From<&'a str> for ByteContent<'a> {
    fn from(text: &'a str) -> Self {
        Self::Present(text.as_bytes())
    }
}

impl<'a, T> From<Option<T>> for ByteContent<'a>
where
    T: Into<ByteContent<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// How many leading bytes are inspected when sniffing for binary content.
const BINARY_SNIFF_LEN: usize = 8000;

/// Heuristic binary check: a NUL byte, or too many control characters.
///
/// Bytes at or above 0x80 count as printable so that Latin-1 and other
/// non-UTF-8 text still diffs line by line.
pub(crate) fn looks_binary(data: &[u8]) -> bool {
    let head = &data[..data.len().min(BINARY_SNIFF_LEN)];
    let mut printable = 0usize;
    let mut nonprintable = 0usize;

    for &byte in head {
        match byte {
            0 => return true,
            // backspace and escape show up in colourised logs
            0x08 | 0x1b => printable += 1,
            b'\t' | b'\n' | 0x0b | 0x0c | b'\r' => {}
            0x7f => nonprintable += 1,
            b if b < 0x20 => nonprintable += 1,
            _ => printable += 1,
        }
    }

    (printable >> 7) < nonprintable
}

/// A line of a buffer, split after its `\n`.
///
/// Lines compare with their terminator so that a final line lacking a
/// newline never equals the same text with one.
pub(crate) fn split_lines(data: &[u8]) -> Vec<&[u8]> {
    data.split_inclusive(|&b| b == b'\n').collect()
}

/// Strip the terminator from a line produced by [`split_lines`].
///
/// Returns the bare content and whether a `\n` was present.
pub(crate) fn strip_terminator(line: &[u8]) -> (&[u8], bool) {
    match line.strip_suffix(b"\n") {
        Some(content) => (content, true),
        None => (line, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        let owned = b"abc".to_vec();
        assert_eq!(ByteContent::from(&owned), ByteContent::Present(b"abc"));
        assert_eq!(ByteContent::from("abc"), ByteContent::Present(b"abc"));
        assert_eq!(ByteContent::from(b"abc"), ByteContent::Present(b"abc"));
        assert_eq!(ByteContent::from(None::<&[u8]>), ByteContent::Absent);
        assert_eq!(ByteContent::from(Some("x")), ByteContent::Present(b"x"));
        assert!(ByteContent::default().is_absent());
    }

    #[test]
    fn empty_present_is_not_absent() {
        let empty = ByteContent::from(b"");
        assert!(!empty.is_absent());
        assert_eq!(empty.as_bytes(), Some(&b""[..]));
    }

    #[test]
    fn split_keeps_terminators() {
        assert_eq!(split_lines(b"a\nb\n"), vec![&b"a\n"[..], &b"b\n"[..]]);
        assert_eq!(split_lines(b"a\nb"), vec![&b"a\n"[..], &b"b"[..]]);
        assert!(split_lines(b"").is_empty());
        assert_eq!(split_lines(b"\n"), vec![&b"\n"[..]]);
    }

    #[test]
    fn carriage_returns_stay_in_content() {
        let lines = split_lines(b"a\r\nb\r\n");
        assert_eq!(strip_terminator(lines[0]), (&b"a\r"[..], true));
    }

    #[test]
    fn strip_reports_missing_newline() {
        assert_eq!(strip_terminator(b"tail"), (&b"tail"[..], false));
        assert_eq!(strip_terminator(b"line\n"), (&b"line"[..], true));
    }

    #[test]
    fn nul_byte_is_binary() {
        assert!(looks_binary(&[0u8, 1, 2, 3, 0xFF, 0xFE]));
    }

    #[test]
    fn latin1_text_is_not_binary() {
        assert!(!looks_binary(b"Kristian H\xf8gsberg\n"));
        assert!(!looks_binary(b""));
    }

    #[test]
    fn control_heavy_data_is_binary() {
        let data = [0x01u8; 64];
        assert!(looks_binary(&data));
    }

    #[test]
    fn nul_past_sniff_window_is_ignored() {
        let mut data = vec![b'a'; BINARY_SNIFF_LEN];
        data.push(0);
        assert!(!looks_binary(&data));
    }
}
