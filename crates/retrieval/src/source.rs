use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A source document as handed over by text extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub raw_text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// Documents a source produced, plus the ids it could not extract
#[derive(Debug, Clone, Default)]
pub struct LoadedDocuments {
    pub documents: Vec<Document>,
    pub failed: Vec<String>,
}

/// Opaque page-text extraction for a single file
pub trait TextExtractor: Send + Sync {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// Supplies the document set an index is built from
pub trait DocumentSource {
    fn load(&self) -> Result<LoadedDocuments>;
}

/// Reads UTF-8 text files, replacing invalid sequences.
///
/// Form feeds (`\x0c`, as written by `pdftotext`) separate pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(text
            .split('\u{000C}')
            .filter(|page| !page.trim().is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Every file directly inside `root` whose extension is allowed.
///
/// Files are visited in file-name order. The document id is the file name.
pub struct DirectorySource {
    root: PathBuf,
    extensions: Vec<String>,
    extractor: Box<dyn TextExtractor>,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["txt".to_string(), "md".to_string()],
            extractor: Box::new(PlainTextExtractor),
        }
    }

    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    #[must_use]
    pub fn with_extractor(mut self, extractor: Box<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    fn is_allowed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .is_some_and(|ext| self.extensions.iter().any(|allowed| *allowed == ext))
    }
}

impl DocumentSource for DirectorySource {
    fn load(&self) -> Result<LoadedDocuments> {
        if !self.root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("document folder not found: {}", self.root.display()),
            )
            .into());
        }

        let mut loaded = LoadedDocuments::default();
        let entries = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!("Skipping unreadable entry: {err}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.is_allowed(entry.path()));

        for entry in entries {
            let id = entry.file_name().to_string_lossy().into_owned();
            match self.extractor.extract_pages(entry.path()) {
                Ok(pages) => loaded.documents.push(Document::new(id, pages.join(" "))),
                Err(err) => {
                    log::warn!("Failed to extract {id}: {err}");
                    loaded.failed.push(id);
                }
            }
        }

        log::info!(
            "Loaded {} documents from {} ({} failed)",
            loaded.documents.len(),
            self.root.display(),
            loaded.failed.len()
        );
        Ok(loaded)
    }
}

impl DocumentSource for [Document] {
    fn load(&self) -> Result<LoadedDocuments> {
        Ok(LoadedDocuments {
            documents: self.to_vec(),
            failed: Vec::new(),
        })
    }
}
