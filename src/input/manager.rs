//! Input manager for reading job descriptions and resumes

use crate::error::{Result, ReviewerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Path that reads from standard input instead of a file.
pub const STDIN_PATH: &str = "-";

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if path.as_os_str() == STDIN_PATH {
            return Self::read_stdin().await;
        }

        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ReviewerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match self.detect_file_type(path)? {
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ReviewerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {} (expected .txt or .md)",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    async fn read_stdin() -> Result<String> {
        info!("Reading input from stdin");
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        Ok(content)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ReviewerError::UnsupportedFormat(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
