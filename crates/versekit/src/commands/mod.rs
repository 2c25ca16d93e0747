//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;

use versekit_core::markdown;

pub mod info;
pub mod lines;
pub mod rhymes;
pub mod scheme;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod syllables;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read a lyric or poem file, stripping markdown from `.md` files.
pub fn read_lyrics(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let content = read_input_file(path, max_bytes)?;
    if path.extension() == Some("md") {
        Ok(markdown::strip_to_lyrics(&content))
    } else {
        Ok(content)
    }
}
