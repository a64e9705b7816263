/// 1-based line number of the byte at `offset` in `text`.
///
/// Offsets past the end report the last line.
pub fn line_at_offset(text: &[u8], offset: usize) -> usize {
    let end = offset.min(text.len());
    1 + text[..end].iter().filter(|&&b| b == b'\n').count()
}
