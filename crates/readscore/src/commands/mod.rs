//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;
use readscore_core::{Config, Scorer};

pub mod info;
pub mod score;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod words;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

/// Read standard input, stopping one byte past the limit to detect overflow.
pub fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut buf = String::new();
    let stdin = std::io::stdin().lock();
    match max_bytes {
        Some(max) => {
            let cap = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            stdin
                .take(cap)
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            if buf.len() > max {
                anyhow::bail!("input too large: stdin exceeds {max} bytes");
            }
        }
        None => {
            let mut stdin = stdin;
            stdin
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
        }
    }
    Ok(buf)
}

/// Build a scorer over the configured word lists.
pub fn scorer_for(config: &Config) -> anyhow::Result<Scorer> {
    let lists = config
        .word_lists()
        .context("failed to load configured word lists")?;
    Ok(lists.map_or_else(Scorer::new, Scorer::with_lists))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn oversized_files_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.txt");
        fs::write(&path, "word ".repeat(100)).unwrap();
        let path = camino::Utf8PathBuf::try_from(path).unwrap();

        let err = read_input_file(&path, Some(10)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
        assert!(read_input_file(&path, None).is_ok());
    }

    #[test]
    fn bad_word_list_path_is_an_error() {
        let config = Config {
            spache_list: Some("/nonexistent/spache.txt".into()),
            ..Config::default()
        };
        assert!(scorer_for(&config).is_err());
    }
}
