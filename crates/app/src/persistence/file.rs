//! JSON file state store.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::persistence::{PersistenceError, Snapshot, StateStore, migrate};

/// Stores the snapshot as pretty-printed JSON.
///
/// Writes go to a sibling temporary file which is then renamed over the target, so a crash mid
/// write leaves the previous state intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();

        name.push(".tmp");

        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let value: Value = serde_json::from_slice(&bytes)?;

        debug!(path = %self.path.display(), "loaded state file");

        migrate(value).map(Some)
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let temp = self.temp_path();

        fs::write(&temp, bytes).await?;
        fs::rename(&temp, &self.path).await?;

        debug!(path = %self.path.display(), products = snapshot.products.len(), "saved state file");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use fernwood::products::ProductId;
    use testresult::TestResult;

    use crate::domain::products::models::Product;

    use super::*;

    fn desk() -> Product {
        Product {
            id: ProductId::from("PROD-000004"),
            name: "Office Desk".to_string(),
            sku: "DESK-001".to_string(),
            category: "tables".to_string(),
            price: 34_999,
            stock: 20,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn missing_file_loads_nothing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path().join("state.json"));

        assert_eq!(store.load().await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn save_then_load_returns_the_snapshot() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path().join("nested").join("state.json"));
        let snapshot = Snapshot::new(vec![desk()]);

        store.save(&snapshot).await?;

        assert_eq!(store.load().await?, Some(snapshot));
        assert!(!store.temp_path().exists());

        Ok(())
    }

    #[tokio::test]
    async fn legacy_file_is_migrated_on_load() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("products.json");

        std::fs::write(
            &path,
            r#"[{"id":"PROD-002","name":"Dining Table Set","sku":"FUR-DIN-001","category":"dining","price":899.99,"stock":3,"status":"low_stock"}]"#,
        )?;

        let snapshot = JsonFileStore::new(&path).load().await?.ok_or("nothing loaded")?;

        assert_eq!(snapshot.products.first().map(|product| product.price), Some(89_999));

        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("state.json");

        std::fs::write(&path, "{ not json")?;

        assert!(matches!(
            JsonFileStore::new(&path).load().await,
            Err(PersistenceError::Json(_))
        ));

        Ok(())
    }
}
