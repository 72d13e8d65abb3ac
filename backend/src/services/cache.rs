//! Offline asset cache with versioned partitions.
//!
//! Allowlisted static assets are cache-first; everything else is
//! network-first and falls back to the last cached copy when the origin
//! fails. Activation deletes partitions left behind by older build tags.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::constants::{CACHE_PREFIX, STATIC_ASSETS};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// Where assets come from when the cache cannot answer.
pub trait Origin: Send + Sync {
    fn fetch(&self, path: &str) -> AppResult<Asset>;
}

/// Serves files from a directory; `/` maps to `index.html`.
#[derive(Debug, Clone)]
pub struct DirOrigin {
    root: PathBuf,
}

impl DirOrigin {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Origin for DirOrigin {
    fn fetch(&self, path: &str) -> AppResult<Asset> {
        let relative = path.trim_start_matches('/');
        if relative.split('/').any(|part| part == "..") {
            return Err(AppError::AssetNotFound(path.to_string()));
        }
        let relative = if relative.is_empty() { "index.html" } else { relative };
        let body = fs::read(self.root.join(relative)).map_err(|_| AppError::AssetNotFound(path.to_string()))?;
        Ok(Asset {
            content_type: content_type_for(relative),
            body,
        })
    }
}

pub fn content_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("ico") => "image/x-icon",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

type Partition = HashMap<String, Asset>;

/// Named cache partitions, shared across build tags.
#[derive(Debug, Default)]
pub struct CacheStorage {
    partitions: HashMap<String, Partition>,
}

impl CacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.partitions.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn open(&mut self, name: &str) -> &mut HashMap<String, Asset> {
        self.partitions.entry(name.to_string()).or_default()
    }

    pub fn lookup(&self, name: &str, path: &str) -> Option<&Asset> {
        self.partitions.get(name).and_then(|p| p.get(path))
    }

    pub fn delete(&mut self, name: &str) -> bool {
        self.partitions.remove(name).is_some()
    }
}

pub struct AssetCache {
    storage: CacheStorage,
    static_name: String,
    dynamic_name: String,
}

impl AssetCache {
    pub fn new(storage: CacheStorage, version: &str) -> Self {
        Self {
            storage,
            static_name: format!("{}-static-{}", CACHE_PREFIX, version),
            dynamic_name: format!("{}-dynamic-{}", CACHE_PREFIX, version),
        }
    }

    pub fn static_name(&self) -> &str {
        &self.static_name
    }

    pub fn dynamic_name(&self) -> &str {
        &self.dynamic_name
    }

    pub fn storage(&self) -> &CacheStorage {
        &self.storage
    }

    pub fn is_static(path: &str) -> bool {
        STATIC_ASSETS.contains(&path)
    }

    /// Caches the whole allowlist, or nothing if any asset fails to load.
    pub fn install(&mut self, origin: &dyn Origin) -> AppResult<usize> {
        tracing::info!("📦 Installing {} static assets into {}", STATIC_ASSETS.len(), self.static_name);
        let fetched = STATIC_ASSETS
            .iter()
            .map(|path| origin.fetch(path).map(|asset| (path.to_string(), asset)))
            .collect::<AppResult<Vec<_>>>()?;

        let count = fetched.len();
        self.storage.open(&self.static_name).extend(fetched);
        Ok(count)
    }

    /// Deletes every partition that does not belong to the current build tag.
    pub fn activate(&mut self) -> Vec<String> {
        let stale: Vec<String> = self
            .storage
            .keys()
            .into_iter()
            .filter(|name| *name != self.static_name && *name != self.dynamic_name)
            .collect();
        for name in &stale {
            tracing::info!("🗑️ Removing old cache: {}", name);
            self.storage.delete(name);
        }
        stale
    }

    pub fn fetch(&mut self, path: &str, origin: &dyn Origin) -> AppResult<Asset> {
        if Self::is_static(path) {
            self.cache_first(path, origin)
        } else {
            self.network_first(path, origin)
        }
    }

    fn cache_first(&mut self, path: &str, origin: &dyn Origin) -> AppResult<Asset> {
        if let Some(hit) = self.storage.lookup(&self.static_name, path) {
            return Ok(hit.clone());
        }
        let asset = origin.fetch(path)?;
        self.storage
            .open(&self.static_name)
            .insert(path.to_string(), asset.clone());
        Ok(asset)
    }

    fn network_first(&mut self, path: &str, origin: &dyn Origin) -> AppResult<Asset> {
        match origin.fetch(path) {
            Ok(asset) => {
                self.storage
                    .open(&self.dynamic_name)
                    .insert(path.to_string(), asset.clone());
                Ok(asset)
            }
            Err(e) => {
                tracing::debug!("Origin failed for {}, trying cache: {}", path, e);
                self.storage.lookup(&self.dynamic_name, path).cloned().ok_or(e)
            }
        }
    }
}
