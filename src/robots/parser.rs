//! Candidate line extraction from robots.txt content
//!
//! Bodies are handled as bytes: archived robots files are often Latin-1 or
//! another legacy encoding, and paths must come out exactly as stored.

/// Directive prefix matched case-insensitively at the start of a line
const DISALLOW_PREFIX: &[u8] = b"disallow:";

/// Extracts the strings a snapshot contributes to the output
///
/// In raw mode every line is returned verbatim (line terminators stripped).
/// Otherwise only lines starting with `Disallow:` in any case count, and the
/// path after the prefix is trimmed; empty paths are dropped. Lines with
/// leading whitespace before the directive do not match.
///
/// # Example
///
/// ```
/// use wayback_robots::extract_candidates;
///
/// let body = b"User-agent: *\nDISALLOW: /tmp \nDisallow:\n";
/// assert_eq!(extract_candidates(body, false), vec![b"/tmp".as_slice()]);
/// ```
pub fn extract_candidates(body: &[u8], raw_mode: bool) -> Vec<&[u8]> {
    if raw_mode {
        return lines(body).collect();
    }

    lines(body).filter_map(disallow_path).collect()
}

/// Splits on `\n`, dropping a trailing `\r` from each line
///
/// A final newline does not start an extra empty line.
fn lines(body: &[u8]) -> impl Iterator<Item = &[u8]> {
    let empty = body.is_empty();
    let body = body.strip_suffix(b"\n").unwrap_or(body);

    body.split(|&b| b == b'\n')
        .filter(move |_| !empty)
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Returns the trimmed path of a `Disallow:` line, if it has one
fn disallow_path(line: &[u8]) -> Option<&[u8]> {
    let prefix = line.get(..DISALLOW_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(DISALLOW_PREFIX) {
        return None;
    }

    let path = trim_ascii(&line[DISALLOW_PREFIX.len()..]);
    (!path.is_empty()).then_some(path)
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
