use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::defaults::default_yaml;
use crate::config::discovery;
use crate::config::settings::Settings;
use crate::core::errors::{NexoformError, Result};

/// Locates, loads and persists the project's `nexoform.yml`.
///
/// Constructed with an explicit starting directory so callers (and
/// tests) never depend on process-wide working-directory state. Each
/// [`load`](Self::load) reads the discovered file fresh; there is no
/// cache across calls.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    start_dir: PathBuf,
}

impl ConfigResolver {
    /// Resolver rooted at an explicit directory.
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
        }
    }

    /// Resolver rooted at the process working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// The directory the upward walk starts from.
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// Path of the nearest config file at or above the start directory.
    ///
    /// Falls back to the default relative filename when none exists
    /// anywhere in the ancestry; see [`discovery::find_config_file`].
    pub fn config_file(&self) -> PathBuf {
        discovery::find_config_file(&self.start_dir)
    }

    /// Load the discovered config file.
    ///
    /// An absent file is not an error: it yields `Ok(None)`, the
    /// "no config yet" state callers must handle explicitly. A file
    /// that exists but fails to parse is a [`NexoformError::ParseError`].
    pub fn load(&self) -> Result<Option<Settings>> {
        let path = self.config_file();
        if !path.exists() {
            debug!(path = %path.display(), "config file absent");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let settings =
            Settings::from_yaml_str(&content).map_err(|e| NexoformError::ParseError {
                path: path.clone(),
                detail: e.to_string(),
            })?;
        debug!(path = %path.display(), "loaded settings");
        Ok(Some(settings))
    }

    /// Serialize settings and write them to the discovered path.
    pub fn write_settings(&self, settings: &Settings) -> Result<()> {
        let yaml = settings.to_yaml_string()?;
        self.write_text(&yaml)
    }

    /// Write the commented default template to the discovered path.
    ///
    /// Unlike [`write_settings`](Self::write_settings) this keeps the
    /// template's inline comments, so a fresh project gets a documented
    /// file to edit.
    pub fn write_default_settings_file(&self, project_name: Option<&str>) -> Result<()> {
        self.write_text(&default_yaml(project_name))
    }

    // Scoped write: the file handle flushes before the function returns
    // and closes on every exit path, so a failure never leaves an
    // open half-written handle behind.
    fn write_text(&self, content: &str) -> Result<()> {
        let path = self.config_file();
        let mut file = File::create(&path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        debug!(path = %path.display(), bytes = content.len(), "wrote settings");
        Ok(())
    }
}
