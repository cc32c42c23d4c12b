use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::DocumentId;

/// Flat-directory store of rendered transcript documents
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Open the store at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create transcripts directory: {:?}", root))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a document id maps to, whether or not anything is stored there
    pub fn path_for(&self, id: &DocumentId) -> PathBuf {
        self.root.join(format!("{}.txt", id))
    }

    /// Persist a rendered document under a fresh identifier
    pub fn save(&self, document: &str) -> Result<(DocumentId, PathBuf)> {
        let id = DocumentId::new();
        let path = self.path_for(&id);
        std::fs::write(&path, document)
            .with_context(|| format!("Failed to write document: {:?}", path))?;
        Ok((id, path))
    }

    /// Read a document back, `None` when the id is unknown
    pub fn load(&self, id: &DocumentId) -> Result<Option<String>> {
        let path = self.path_for(id);
        match std::fs::read_to_string(&path) {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read document: {:?}", path)),
        }
    }
}
