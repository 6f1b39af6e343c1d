use std::path::Path;

use rand::seq::SliceRandom;

use crate::error::Result;

/// File names of the decorative images available under `/static/img`.
#[derive(Debug, Clone, Default)]
pub struct ImageBank {
    files: Vec<String>,
}

impl ImageBank {
    #[must_use]
    pub fn new(files: Vec<String>) -> Self {
        Self { files }
    }

    /// Lists the regular files in `dir`. A missing directory gives an empty bank.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            tracing::warn!("Image directory {} not found, pages will have no image", dir.display());
            return Ok(Self::default());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    files.push(name.to_string());
                }
            }
        }
        files.sort();

        tracing::info!("Loaded {} images from {}", files.len(), dir.display());
        Ok(Self { files })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// URL of a randomly chosen image.
    #[must_use]
    pub fn random_url(&self) -> Option<String> {
        self.files
            .choose(&mut rand::thread_rng())
            .map(|name| format!("/static/img/{}", urlencoding::encode(name)))
    }
}
