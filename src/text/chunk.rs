// Splitting token sequences into contiguous parts.

use anyhow::Result;

/// Split tokens into `count` contiguous chunks of `len / count` tokens each.
///
/// The last chunk takes the remainder, so every token lands in exactly one
/// chunk and concatenating the chunks reproduces the input.
pub fn split_into_chunks(tokens: &[String], count: usize) -> Result<Vec<Vec<String>>> {
    if count == 0 {
        anyhow::bail!("chunk count must be at least 1");
    }

    let chunk_size = tokens.len() / count;
    let chunks = (0..count)
        .map(|i| {
            let start = i * chunk_size;
            let end = if i == count - 1 {
                tokens.len()
            } else {
                start + chunk_size
            };
            tokens[start..end].to_vec()
        })
        .collect();

    Ok(chunks)
}

/// Split tokens at the midpoint. The second half gets the extra token when
/// the length is odd.
pub fn split_halves(tokens: &[String]) -> (Vec<String>, Vec<String>) {
    let mid = tokens.len() / 2;
    (tokens[..mid].to_vec(), tokens[mid..].to_vec())
}
