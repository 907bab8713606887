// src/storage/mod.rs
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::utils::error::StorageError;

/// Answers that count as consent to overwrite. A bare Enter counts too.
const AFFIRMATIVE_ANSWERS: &[&str] = &["y", "Y", "yes", "YES", ""];

/// The file the rendered document is written to.
pub struct OutputTarget {
    path: PathBuf,
}

impl OutputTarget {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Asks on `output` whether to overwrite the existing file, reading the answer from `input`.
    pub fn confirm_overwrite<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut output: W,
    ) -> Result<bool, StorageError> {
        write!(output, "Would you like to overwrite '{}': ", self.path.display())?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            tracing::warn!("No answer to the overwrite prompt (end of input)");
            return Ok(false);
        }
        let answer = answer.trim_end_matches(['\r', '\n']);

        let confirmed = is_affirmative(answer);
        tracing::debug!("Overwrite answer {:?} -> {}", answer, confirmed);
        Ok(confirmed)
    }

    /// Creates missing parent directories of the output path.
    pub fn prepare(&self) -> Result<(), StorageError> {
        let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        if !parent.is_dir() {
            fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
            tracing::info!("Created output directory {}", parent.display());
        }
        Ok(())
    }

    /// Writes the rendered document, replacing any existing file.
    pub fn write(&self, contents: &str) -> Result<(), StorageError> {
        let mut file = fs::File::create(&self.path)?;
        file.write_all(contents.as_bytes())?;

        tracing::info!("Saved document to {}", self.path.display());
        Ok(())
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    AFFIRMATIVE_ANSWERS.contains(&answer)
}
