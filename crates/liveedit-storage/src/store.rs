//! JSON-file project store

use std::io::Write;
use std::path::{Path, PathBuf};

use liveedit_core::SnippetBundle;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{Result, StorageError};

/// Durable collection of saved bundles, kept newest-first in a single JSON file
///
/// Every operation holds the store's lock for its whole read-modify-write, so
/// concurrent saves and deletes through the same store are serialized and a
/// reader never sees a half-written file.
pub struct ProjectStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ProjectStore {
    /// Open a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All bundles, most recently saved first. Missing file means no bundles.
    pub async fn list_all(&self) -> Result<Vec<SnippetBundle>> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<SnippetBundle> {
        let _guard = self.lock.lock().await;
        self.read()
            .await?
            .into_iter()
            .find(|bundle| bundle.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    /// Insert `bundle` at the front, replacing any bundle with the same name
    pub async fn save(&self, bundle: SnippetBundle) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut bundles = self.read().await?;

        let before = bundles.len();
        bundles.retain(|existing| existing.name != bundle.name);
        if bundles.len() != before {
            debug!(name = %bundle.name, "replacing project with the same name");
        }

        info!(id = %bundle.id, name = %bundle.name, "saving project");
        bundles.insert(0, bundle);
        self.write(&bundles).await
    }

    /// Remove the bundle with `id` and return it
    ///
    /// Unknown ids leave the file untouched and yield [`StorageError::NotFound`].
    pub async fn delete_by_id(&self, id: &str) -> Result<SnippetBundle> {
        let _guard = self.lock.lock().await;
        let mut bundles = self.read().await?;

        let Some(index) = bundles.iter().position(|bundle| bundle.id == id) else {
            warn!(id, "delete requested for unknown project");
            return Err(StorageError::NotFound(id.to_string()));
        };

        let removed = bundles.remove(index);
        self.write(&bundles).await?;
        info!(id, name = %removed.name, "deleted project");
        Ok(removed)
    }

    async fn read(&self) -> Result<Vec<SnippetBundle>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Rewrite the whole file through a uniquely named sibling temp file
    async fn write(&self, bundles: &[SnippetBundle]) -> Result<()> {
        let content = serde_json::to_vec_pretty(bundles)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || replace_file(&path, &content))
            .await
            .map_err(std::io::Error::other)??;
        Ok(())
    }
}

/// Write `content` to a temp file next to `path` and persist it over `path`.
///
/// The temp file is removed if anything fails before the rename lands.
fn replace_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, ProjectStore) {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path().join("projects.json"));
        (dir, store)
    }

    fn bundle(name: &str, markup: &str) -> SnippetBundle {
        SnippetBundle::new(name, "", markup, "", "")
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_save_then_list_round_trip() {
        let (_dir, store) = temp_store();
        let demo = SnippetBundle::new("Demo", "first", "<h1>Hi</h1>", "h1{color:red}", "console.log(1)");
        store.save(demo.clone()).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], demo);

        let fetched = store.get_by_id(&demo.id).await.unwrap();
        assert_eq!(fetched, demo);
    }

    #[tokio::test]
    async fn test_newest_first() {
        let (_dir, store) = temp_store();
        for name in ["a", "b", "c"] {
            store.save(bundle(name, name)).await.unwrap();
        }

        let names: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_same_name_replaces() {
        let (_dir, store) = temp_store();
        let first = bundle("X", "<p>one</p>");
        let second = bundle("X", "<p>two</p>");
        store.save(bundle("other", "")).await.unwrap();
        store.save(first.clone()).await.unwrap();
        store.save(bundle("later", "")).await.unwrap();
        store.save(second.clone()).await.unwrap();

        let all = store.list_all().await.unwrap();
        let named_x: Vec<_> = all.iter().filter(|b| b.name == "X").collect();
        assert_eq!(named_x.len(), 1);
        assert_eq!(named_x[0].markup, "<p>two</p>");
        assert_eq!(all[0].id, second.id);
        assert_eq!(all.len(), 3);

        // The old id is gone along with its content
        assert!(store.get_by_id(&first.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_two_saves_same_name_leave_one() {
        let (_dir, store) = temp_store();
        store.save(bundle("X", "first")).await.unwrap();
        store.save(bundle("X", "second")).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].markup, "second");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (_dir, store) = temp_store();
        store.save(bundle("a", "1")).await.unwrap();
        store.save(bundle("b", "2")).await.unwrap();
        let before = store.list_all().await.unwrap();
        let raw_before = std::fs::read(store.path()).unwrap();

        assert!(store.get_by_id("missing").await.unwrap_err().is_not_found());
        assert!(store.delete_by_id("missing").await.unwrap_err().is_not_found());

        assert_eq!(store.list_all().await.unwrap(), before);
        assert_eq!(std::fs::read(store.path()).unwrap(), raw_before);
    }

    #[tokio::test]
    async fn test_delete_on_empty_store() {
        let (_dir, store) = temp_store();
        let err = store.delete_by_id("anything").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(ref id) if id == "anything"));
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_delete_keeps_others_in_order() {
        let (_dir, store) = temp_store();
        let mut saved = Vec::new();
        for name in ["a", "b", "c", "d"] {
            let b = bundle(name, name);
            saved.push(b.clone());
            store.save(b).await.unwrap();
        }

        let removed = store.delete_by_id(&saved[2].id).await.unwrap();
        assert_eq!(removed.name, "c");

        let remaining: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(remaining, ["d", "b", "a"]);
    }

    #[tokio::test]
    async fn test_concurrent_saves_are_not_lost() {
        let (_dir, store) = temp_store();
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.save(bundle(&format!("p{}", i), "x")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.list_all().await.unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(
            store.list_all().await.unwrap_err(),
            StorageError::Serialization(_)
        ));
        assert!(store.save(bundle("a", "")).await.is_err());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{not json");
    }

    #[tokio::test]
    async fn test_creates_parent_dirs_and_pretty_prints() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path().join("nested/data/projects.json"));
        store.save(bundle("a", "<p>")).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("[\n  {"));
        assert!(raw.contains("\"sizeEstimate\""));
        assert_eq!(dir_entries(store.path().parent().unwrap()), ["projects.json"]);
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory at the target path makes the final rename fail
        let target = dir.path().join("projects.json");
        std::fs::create_dir_all(target.join("occupied")).unwrap();
        let store = ProjectStore::new(&target);

        assert!(matches!(
            store.write(&[bundle("a", "")]).await.unwrap_err(),
            StorageError::Io(_)
        ));
        assert_eq!(dir_entries(dir.path()), ["projects.json"]);
        assert_eq!(dir_entries(&target), ["occupied"]);
    }

    #[tokio::test]
    async fn test_repeated_writes_leave_only_the_data_file() {
        let (dir, store) = temp_store();
        for i in 0..5 {
            store.save(bundle(&format!("p{}", i), "x")).await.unwrap();
        }
        store.delete_by_id(&store.list_all().await.unwrap()[0].id).await.unwrap();

        assert_eq!(dir_entries(dir.path()), ["projects.json"]);
        assert_eq!(store.list_all().await.unwrap().len(), 4);
    }
}
