use std::path::{Path, PathBuf};

use tracing::debug;

/// Name of the config file searched for in each directory.
pub const CONFIG_FILE_NAME: &str = "nexoform.yml";

/// Fallback returned when no config file exists anywhere up the tree.
///
/// This is the "no config yet" signal: callers that go on to write a
/// default config land it in the current directory.
pub const DEFAULT_FILENAME: &str = "./nexoform.yml";

/// Whether `dir` directly contains a config file.
pub fn has_config_file(dir: &Path) -> bool {
    dir.join(CONFIG_FILE_NAME).exists()
}

/// Find the nearest config file at or above `starting_dir`.
///
/// Walks parent directories iteratively (bounded by the distance to the
/// filesystem root, so termination is guaranteed and no call stack is
/// consumed). If the walk reaches the top without a hit, returns
/// [`DEFAULT_FILENAME`] rather than an error.
pub fn find_config_file(starting_dir: &Path) -> PathBuf {
    let mut dir = starting_dir;
    loop {
        if has_config_file(dir) {
            let found = dir.join(CONFIG_FILE_NAME);
            debug!(path = %found.display(), "found config file");
            return found;
        }
        match dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => dir = parent,
            _ => {
                debug!(
                    start = %starting_dir.display(),
                    "no config file in ancestry, falling back to default filename"
                );
                return PathBuf::from(DEFAULT_FILENAME);
            }
        }
    }
}
