//! Holdings persistence — a single named record plus the manager that edits it.
//!
//! Stores only move the serialized record; validation and degradation of bad
//! data live in [`PortfolioManager`].

use super::convert::{decode_record, encode_record};
use super::{validate_quantity, Portfolio};
use crate::error::SdkError;
use crate::shared::AssetId;
use async_lock::RwLock;
use rust_decimal::Decimal;
use std::future::Future;

/// Record key used by browser storage.
pub const PORTFOLIO_STORAGE_KEY: &str = "crypto_portfolio";

/// Read/write access to the holdings record.
pub trait HoldingsStore {
    /// `None` when nothing has been saved yet.
    fn load(&self) -> impl Future<Output = Result<Option<String>, SdkError>>;

    fn save(&self, record: String) -> impl Future<Output = Result<(), SdkError>>;
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// In-process store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: RwLock::new(Some(record.into())),
        }
    }
}

impl HoldingsStore for MemoryStore {
    async fn load(&self) -> Result<Option<String>, SdkError> {
        Ok(self.record.read().await.clone())
    }

    async fn save(&self, record: String) -> Result<(), SdkError> {
        *self.record.write().await = Some(record);
        Ok(())
    }
}

// ─── JsonFileStore ───────────────────────────────────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::HoldingsStore;
    use crate::error::SdkError;
    use std::path::{Path, PathBuf};

    /// Record kept in a JSON file on disk.
    #[derive(Debug, Clone)]
    pub struct JsonFileStore {
        path: PathBuf,
    }

    impl JsonFileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl HoldingsStore for JsonFileStore {
        async fn load(&self) -> Result<Option<String>, SdkError> {
            match std::fs::read_to_string(&self.path) {
                Ok(record) => Ok(Some(record)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(SdkError::Storage(format!(
                    "read {}: {}",
                    self.path.display(),
                    e
                ))),
            }
        }

        async fn save(&self, record: String) -> Result<(), SdkError> {
            let storage_err = |e: std::io::Error| {
                SdkError::Storage(format!("write {}: {}", self.path.display(), e))
            };
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(storage_err)?;
            }
            // Write-then-rename so a crash never leaves a truncated record.
            let tmp = self.path.with_extension("json.tmp");
            std::fs::write(&tmp, record).map_err(storage_err)?;
            std::fs::rename(&tmp, &self.path).map_err(storage_err)
        }
    }
}

// ─── LocalStorageStore ───────────────────────────────────────────────────────

#[cfg(feature = "wasm")]
pub use local::LocalStorageStore;

#[cfg(feature = "wasm")]
mod local {
    use super::{HoldingsStore, PORTFOLIO_STORAGE_KEY};
    use crate::error::SdkError;

    fn js_err(context: &str, e: wasm_bindgen::JsValue) -> SdkError {
        SdkError::Storage(format!("{}: {:?}", context, e))
    }

    /// Record kept in the browser's `localStorage`.
    #[derive(Debug, Clone)]
    pub struct LocalStorageStore {
        key: String,
    }

    impl Default for LocalStorageStore {
        fn default() -> Self {
            Self::new(PORTFOLIO_STORAGE_KEY)
        }
    }

    impl LocalStorageStore {
        pub fn new(key: &str) -> Self {
            Self {
                key: key.to_string(),
            }
        }

        fn storage(&self) -> Result<web_sys::Storage, SdkError> {
            let window =
                web_sys::window().ok_or_else(|| SdkError::Storage("no window".to_string()))?;
            window
                .local_storage()
                .map_err(|e| js_err("localStorage", e))?
                .ok_or_else(|| SdkError::Storage("localStorage unavailable".to_string()))
        }
    }

    impl HoldingsStore for LocalStorageStore {
        async fn load(&self) -> Result<Option<String>, SdkError> {
            self.storage()?
                .get_item(&self.key)
                .map_err(|e| js_err("getItem", e))
        }

        async fn save(&self, record: String) -> Result<(), SdkError> {
            self.storage()?
                .set_item(&self.key, &record)
                .map_err(|e| js_err("setItem", e))
        }
    }
}

// ─── PortfolioManager ────────────────────────────────────────────────────────

/// Loads, edits and saves the holdings record.
///
/// Every edit reads the record fresh, applies the change and writes it back,
/// returning the resulting portfolio.
pub struct PortfolioManager<S> {
    store: S,
}

impl<S: HoldingsStore> PortfolioManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current holdings. Unreadable or missing data is an empty portfolio.
    pub async fn load(&self) -> Portfolio {
        match self.store.load().await {
            Ok(Some(record)) => decode_record(&record),
            Ok(None) => Portfolio::new(),
            Err(e) => {
                tracing::warn!("Holdings store unreadable, starting empty: {}", e);
                Portfolio::new()
            }
        }
    }

    /// Add a holding, or overwrite the quantity if the asset is already held.
    pub async fn add(&self, asset_id: AssetId, quantity: Decimal) -> Result<Portfolio, SdkError> {
        let quantity = validate_quantity(quantity)?;
        if asset_id.as_str().trim().is_empty() {
            return Err(SdkError::Validation("asset id is required".to_string()));
        }
        let mut portfolio = self.load().await;
        portfolio.upsert(asset_id, quantity);
        self.persist(&portfolio).await?;
        Ok(portfolio)
    }

    /// Change an existing holding's quantity; unknown assets are left alone.
    pub async fn update(
        &self,
        asset_id: &AssetId,
        quantity: Decimal,
    ) -> Result<Portfolio, SdkError> {
        let quantity = validate_quantity(quantity)?;
        let mut portfolio = self.load().await;
        if portfolio.update(asset_id, quantity) {
            self.persist(&portfolio).await?;
        }
        Ok(portfolio)
    }

    pub async fn remove(&self, asset_id: &AssetId) -> Result<Portfolio, SdkError> {
        let mut portfolio = self.load().await;
        if portfolio.remove(asset_id) {
            self.persist(&portfolio).await?;
        }
        Ok(portfolio)
    }

    async fn persist(&self, portfolio: &Portfolio) -> Result<(), SdkError> {
        let record = encode_record(portfolio)?;
        self.store.save(record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_manager_add_overwrites_existing() {
        let manager = PortfolioManager::new(MemoryStore::new());
        manager.add(AssetId::from("bitcoin"), dec("1")).await.unwrap();
        let p = manager.add(AssetId::from("bitcoin"), dec("2.5")).await.unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.holdings()[0].quantity, dec("2.5"));

        let saved = manager.store().load().await.unwrap().unwrap();
        assert_eq!(saved, r#"[{"coinId":"bitcoin","quantity":"2.5"}]"#);
    }

    #[tokio::test]
    async fn test_manager_rejects_bad_quantity() {
        let manager = PortfolioManager::new(MemoryStore::new());
        let err = manager.add(AssetId::from("bitcoin"), Decimal::ZERO).await;
        assert!(matches!(err, Err(SdkError::Validation(_))));
        assert!(manager.store().load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_manager_update_only_existing() {
        let manager = PortfolioManager::new(MemoryStore::with_record(
            r#"[{"coinId":"ethereum","quantity":1}]"#,
        ));
        let p = manager.update(&AssetId::from("solana"), dec("4")).await.unwrap();
        assert!(p.get(&AssetId::from("solana")).is_none());

        let p = manager.update(&AssetId::from("ethereum"), dec("4")).await.unwrap();
        assert_eq!(p.holdings()[0].quantity, dec("4"));
        assert_eq!(manager.load().await, p);
    }

    #[test]
    fn test_manager_remove() {
        let manager = PortfolioManager::new(MemoryStore::with_record(
            r#"[{"coinId":"ethereum","quantity":1},{"coinId":"bitcoin","quantity":2}]"#,
        ));
        let p = tokio_test::block_on(manager.remove(&AssetId::from("ethereum"))).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(tokio_test::block_on(manager.load()).len(), 1);
    }

    #[tokio::test]
    async fn test_manager_keeps_valid_entries_beside_bad_ones() {
        let manager = PortfolioManager::new(MemoryStore::with_record(
            r#"[
                {"coinId": "bitcoin", "quantity": 1},
                {"coinId": "ethereum", "quantity": 2},
                {"coinId": "doge", "quantity": true}
            ]"#,
        ));
        assert_eq!(manager.load().await.len(), 2);

        manager.add(AssetId::from("solana"), dec("1")).await.unwrap();
        let saved = manager.store().load().await.unwrap().unwrap();
        let kept = decode_record(&saved);
        let ids: Vec<&str> = kept.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "ethereum", "solana"]);
        assert_eq!(kept.get(&AssetId::from("ethereum")).unwrap().quantity, dec("2"));
    }

    #[tokio::test]
    async fn test_manager_quantity_survives_reload() {
        let manager = PortfolioManager::new(MemoryStore::new());
        let quantity = dec("0.12345678901234567891");
        let added = manager.add(AssetId::from("bitcoin"), quantity).await.unwrap();
        let reloaded = manager.load().await;
        assert_eq!(added.holdings()[0].quantity, quantity);
        assert_eq!(reloaded.holdings()[0].quantity, quantity);
    }

    #[tokio::test]
    async fn test_manager_degrades_corrupt_record() {
        let manager = PortfolioManager::new(MemoryStore::with_record("{oops"));
        assert!(manager.load().await.is_empty());
        let p = manager.add(AssetId::from("bitcoin"), dec("1")).await.unwrap();
        assert_eq!(p.len(), 1);
    }

    #[tokio::test]
    async fn test_json_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("marketboard-store-{}", std::process::id()));
        let store = JsonFileStore::new(dir.join("holdings.json"));
        assert!(store.load().await.unwrap().is_none());

        let manager = PortfolioManager::new(store);
        manager.add(AssetId::from("cardano"), dec("100")).await.unwrap();
        let reloaded = PortfolioManager::new(JsonFileStore::new(dir.join("holdings.json")))
            .load()
            .await;
        assert_eq!(reloaded.holdings()[0].asset_id, AssetId::from("cardano"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
