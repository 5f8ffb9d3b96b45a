pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve a command's structured input: an explicit `--input` file first,
/// then JSON piped on stdin. `None` means the caller falls back to flags.
pub fn load_json<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        tracing::debug!(path, "reading input file");
        return file::read_json(path).map(Some);
    }
    stdin::read_stdin()
}
