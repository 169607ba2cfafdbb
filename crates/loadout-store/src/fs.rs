use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use loadout_types::PresetId;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::object::{StoredObject, STORAGE_PREFIX};
use crate::traits::PresetStore;

/// Filesystem preset store: `<root>/presets/<id>.json`.
///
/// Writes go to a temporary file in the same directory and are renamed into
/// place, so a reader never observes a partially written preset.
#[derive(Clone, Debug)]
pub struct FsPresetStore {
    dir: PathBuf,
}

impl FsPresetStore {
    /// Open a store rooted at `root`. The preset directory is created lazily
    /// on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join(STORAGE_PREFIX),
        }
    }

    /// Directory that holds the preset files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute path of a preset file.
    pub fn object_path(&self, id: &PresetId) -> PathBuf {
        self.dir.join(id.file_name())
    }
}

fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl PresetStore for FsPresetStore {
    async fn exists(&self, id: &PresetId) -> StoreResult<bool> {
        Ok(tokio::fs::try_exists(self.object_path(id)).await?)
    }

    async fn write(&self, object: &StoredObject) -> StoreResult<()> {
        let dir = self.dir.clone();
        let target = self.object_path(&object.id);
        let bytes = object.bytes.clone();
        debug!(path = %target.display(), "writing preset file");
        tokio::task::spawn_blocking(move || write_atomic(&dir, &target, &bytes))
            .await
            .map_err(|e| StoreError::Io(io::Error::new(io::ErrorKind::Other, e)))??;
        Ok(())
    }

    async fn get(&self, id: &PresetId) -> StoreResult<Bytes> {
        match tokio::fs::read(self.object_path(id)).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(id.clone())),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn location(&self, id: &PresetId) -> String {
        self.object_path(id).display().to_string()
    }
}
