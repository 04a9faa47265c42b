//! Bracket-pair location in raw template text.
//!
//! Scans for `${ ... }` pairs (or any configured delimiter pair), honoring
//! backslash escapes and nesting. Offsets are byte offsets into the source
//! string and always land on character boundaries.

use super::error::ParseError;

/// A matched delimiter pair.
///
/// `open` is the byte offset of the opening delimiter's first byte; `close`
/// is the byte offset of the matching closing delimiter's first byte.
/// Markers may nest but never cross each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub open: usize,
    pub close: usize,
}

/// The delimiter pair to scan for.
///
/// The default pair is `${` / `}`. The AST builder reuses the same scan with
/// `(` / `)` to carve the argument list out of a control header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters<'a> {
    pub opening: &'a str,
    pub closing: &'a str,
}

impl Default for Delimiters<'static> {
    fn default() -> Self {
        Self {
            opening: "${",
            closing: "}",
        }
    }
}

/// Locate all `${ ... }` pairs in `content`, nested pairs included, sorted
/// by opening offset.
///
/// A delimiter preceded by an odd number of backslashes is escaped and
/// contributes nothing; an even run (including zero) leaves it live. Every
/// live opening must find a closing delimiter strictly to its right;
/// leftover closings are ignored and stay literal text.
///
/// # Errors
///
/// Returns [`ParseError::UnmatchedOpening`] for the first opening (scanning
/// right to left) without a matching closer.
///
/// # Example
///
/// ```
/// use preconfig::parser::locate_markers;
///
/// let markers = locate_markers("a${${b}}c").unwrap();
/// assert_eq!((markers[0].open, markers[0].close), (1, 7));
/// assert_eq!((markers[1].open, markers[1].close), (3, 6));
/// ```
pub fn locate_markers(content: &str) -> Result<Vec<Marker>, ParseError> {
    locate_markers_with(content, Delimiters::default())
}

/// [`locate_markers`] with a custom delimiter pair.
pub fn locate_markers_with(
    content: &str,
    delimiters: Delimiters<'_>,
) -> Result<Vec<Marker>, ParseError> {
    let (openings, closings) = scan_candidates(content, delimiters);
    pair_candidates(&openings, closings)
}

/// Collect the offsets of all live (unescaped) openings and closings.
fn scan_candidates(content: &str, delimiters: Delimiters<'_>) -> (Vec<usize>, Vec<usize>) {
    let bytes = content.as_bytes();
    let mut openings = Vec::new();
    let mut closings = Vec::new();

    let mut offset = 0;
    while offset < content.len() {
        let rest = &content[offset..];
        if rest.starts_with(delimiters.opening) {
            if backslash_run(bytes, offset) % 2 == 0 {
                openings.push(offset);
            }
            offset += delimiters.opening.len();
        } else if rest.starts_with(delimiters.closing) {
            if backslash_run(bytes, offset) % 2 == 0 {
                closings.push(offset);
            }
            offset += delimiters.closing.len();
        } else {
            offset += rest.chars().next().map_or(1, char::len_utf8);
        }
    }

    (openings, closings)
}

/// Match each opening with the smallest closing strictly to its right.
///
/// Openings are processed right to left so that deeper openings claim their
/// nearest closer first, which yields correct nesting without a stack.
fn pair_candidates(openings: &[usize], mut closings: Vec<usize>) -> Result<Vec<Marker>, ParseError> {
    let mut markers = Vec::with_capacity(openings.len());

    for &open in openings.iter().rev() {
        let candidate = closings.partition_point(|&close| close <= open);
        if candidate == closings.len() {
            return Err(ParseError::UnmatchedOpening { offset: open });
        }
        markers.push(Marker {
            open,
            close: closings.remove(candidate),
        });
    }

    markers.sort_unstable_by_key(|marker| marker.open);
    Ok(markers)
}

/// Length of the backslash run immediately before `offset`.
fn backslash_run(bytes: &[u8], offset: usize) -> usize {
    bytes[..offset]
        .iter()
        .rev()
        .take_while(|&&byte| byte == b'\\')
        .count()
}
