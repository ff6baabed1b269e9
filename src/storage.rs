// Manages the local JSON file holding schedules and settings.
//
// Every read and write of a data file goes through `with_lock` (an fs2
// exclusive lock on a sidecar `.lock` file) and every write is atomic
// (tmp file + rename), so two processes never interleave partial documents.
use crate::context::AppContext;
use crate::model::StoreData;
use anyhow::{Context, Result};
use chrono::Local;
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

pub struct LocalStorage;

impl LocalStorage {
    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Reads the store. A missing file is an empty store.
    pub fn load(ctx: &dyn AppContext) -> Result<StoreData> {
        let path = ctx.get_data_file_path()?;
        if !path.exists() {
            return Ok(StoreData::default());
        }
        Self::with_lock(&path, || {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            let data: StoreData = serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse {:?}", path))?;
            Ok(data)
        })
    }

    /// Like `load`, but never fails.
    ///
    /// An unreadable file is logged and copied into the backup directory
    /// before the empty state is returned, so the next save cannot destroy it.
    pub fn load_or_empty(ctx: &dyn AppContext) -> StoreData {
        match Self::load(ctx) {
            Ok(data) => data,
            Err(e) => {
                log::error!("Error loading schedules: {:#}", e);
                if let Err(e) = Self::quarantine(ctx) {
                    log::error!("Could not preserve unreadable store: {:#}", e);
                }
                StoreData::default()
            }
        }
    }

    fn quarantine(ctx: &dyn AppContext) -> Result<PathBuf> {
        let src = ctx.get_data_file_path()?;
        let stamp = Local::now().format("%Y%m%dT%H%M%S%.3f");
        let dest = ctx
            .get_backup_dir()?
            .join(format!("unreadable_{}.json", stamp));
        fs::copy(&src, &dest).with_context(|| format!("Failed to copy {:?}", src))?;
        log::warn!("Unreadable store copied to {:?}", dest);
        Ok(dest)
    }

    pub fn save(ctx: &dyn AppContext, data: &StoreData) -> Result<()> {
        let path = ctx.get_data_file_path()?;
        Self::with_lock(&path, || {
            let json = serde_json::to_string_pretty(data)?;
            Self::atomic_write(&path, json)
                .with_context(|| format!("Failed to write {:?}", path))?;
            Ok(())
        })
    }
}
