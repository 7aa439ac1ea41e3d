// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// One score file in a [Workspace].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileRecord {
    #[allow(missing_docs)]
    pub uid: FileUid,
    #[allow(missing_docs)]
    pub name: String,
    /// Score source code.
    pub source: String,
}

/// Where files live. Implementations decide what saving means.
pub trait Workspace: core::fmt::Debug + Send {
    /// Creates and returns a new file.
    fn create_file(&mut self, name: &str, source: &str) -> anyhow::Result<FileRecord>;

    /// Removes a file and returns what it held.
    fn destroy_file(&mut self, uid: FileUid) -> anyhow::Result<FileRecord>;

    /// Replaces a file's source and returns the updated file.
    fn update_file(&mut self, uid: FileUid, source: &str) -> anyhow::Result<FileRecord>;

    #[allow(missing_docs)]
    fn file(&self, uid: FileUid) -> Option<&FileRecord>;

    /// The first file in creation order.
    fn first_file(&self) -> Option<&FileRecord>;

    #[allow(missing_docs)]
    fn file_count(&self) -> usize;

    /// Persists the workspace.
    fn save(&mut self) -> anyhow::Result<()>;
}

/// A [Workspace] that keeps everything in memory. Saving serializes the files
/// to JSON and keeps the result.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MemoryWorkspace {
    uid_factory: UidFactory<FileUid>,
    files: Vec<FileRecord>,

    #[serde(skip)]
    saved: Option<String>,
}
impl MemoryWorkspace {
    /// The JSON written by the most recent save.
    pub fn saved(&self) -> Option<&str> {
        self.saved.as_deref()
    }

    /// Recreates a workspace from [MemoryWorkspace::saved()] output.
    pub fn load(json: &str) -> anyhow::Result<Self> {
        let mut r: Self = serde_json::from_str(json)?;
        r.after_deser();
        Ok(r)
    }

    fn index_of(&self, uid: FileUid) -> anyhow::Result<usize> {
        self.files
            .iter()
            .position(|f| f.uid == uid)
            .ok_or_else(|| anyhow!("no file with uid {uid}"))
    }
}
impl Serializable for MemoryWorkspace {
    fn after_deser(&mut self) {
        self.files
            .iter()
            .for_each(|f| self.uid_factory.notify_externally_minted_uid(&f.uid));
    }
}
impl Workspace for MemoryWorkspace {
    fn create_file(&mut self, name: &str, source: &str) -> anyhow::Result<FileRecord> {
        let file = FileRecord {
            uid: self.uid_factory.mint_next(),
            name: name.to_string(),
            source: source.to_string(),
        };
        self.files.push(file.clone());
        Ok(file)
    }

    fn destroy_file(&mut self, uid: FileUid) -> anyhow::Result<FileRecord> {
        let index = self.index_of(uid)?;
        Ok(self.files.remove(index))
    }

    fn update_file(&mut self, uid: FileUid, source: &str) -> anyhow::Result<FileRecord> {
        let index = self.index_of(uid)?;
        self.files[index].source = source.to_string();
        Ok(self.files[index].clone())
    }

    fn file(&self, uid: FileUid) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.uid == uid)
    }

    fn first_file(&self) -> Option<&FileRecord> {
        self.files.first()
    }

    fn file_count(&self) -> usize {
        self.files.len()
    }

    fn save(&mut self) -> anyhow::Result<()> {
        self.saved = Some(serde_json::to_string(self)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_come_and_go() {
        let mut w = MemoryWorkspace::default();
        let a = w.create_file("A", "{}").unwrap();
        let b = w.create_file("B", "{}").unwrap();
        assert_ne!(a.uid, b.uid);
        assert_eq!(w.first_file(), Some(&a));

        let updated = w.update_file(b.uid, "{\"session\": \"b\"}").unwrap();
        assert_eq!(w.file(b.uid), Some(&updated));

        assert_eq!(w.destroy_file(a.uid).unwrap().name, "A");
        assert!(w.destroy_file(a.uid).is_err());
        assert!(w.update_file(a.uid, "").is_err());
        assert_eq!(w.first_file().map(|f| f.uid), Some(b.uid));
        assert_eq!(w.file_count(), 1);
    }

    #[test]
    fn saved_workspace_reloads_without_reusing_uids() {
        let mut w = MemoryWorkspace::default();
        let a = w.create_file("A", "{}").unwrap();
        w.save().unwrap();

        let mut w2 = MemoryWorkspace::load(w.saved().unwrap()).unwrap();
        assert_eq!(w2.file(a.uid).map(|f| f.name.as_str()), Some("A"));
        let b = w2.create_file("B", "{}").unwrap();
        assert_ne!(a.uid, b.uid);
    }
}
