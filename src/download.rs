use crate::error::DownloadError;
use crate::results::{DownloadTask, Outcome, SavedImage};
use crate::utils::numbered_filename;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// A fetched response, before any status policy is applied
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: u16,
    /// Reason phrase, e.g. "Not Found"
    pub status_text: String,
    pub body: Vec<u8>,
}

impl Fetched {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves image bytes over the network
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Fetched, DownloadError>;
}

/// Where downloaded bytes end up.
///
/// A download stages its body to get a short-lived handle, saves the handle
/// under a filename, then releases it. `release` consumes the handle, so it
/// runs once per staged body.
#[async_trait]
pub trait SaveTarget: Send + Sync {
    type Handle: Send + Sync;

    async fn stage(&self, body: Vec<u8>) -> Result<Self::Handle, DownloadError>;

    async fn save(&self, handle: &Self::Handle, filename: &str) -> Result<PathBuf, DownloadError>;

    async fn release(&self, handle: Self::Handle);
}

/// Fetches, stages, saves and releases one image. Never panics; every failure
/// is logged here and returned as the task's outcome.
pub async fn download<F, T>(fetcher: &F, target: &T, task: &DownloadTask, check_status: bool) -> Outcome
where
    F: Fetcher + ?Sized,
    T: SaveTarget + ?Sized,
{
    ::log::debug!("Downloading {} as {}", task.url, task.filename);

    let outcome = try_download(fetcher, target, task, check_status).await;
    match &outcome {
        Ok(saved) => ::log::info!("Saved {} ({} bytes)", saved.path.display(), saved.bytes),
        Err(e) => ::log::error!("Error downloading image {}: {}", task.url, e),
    }
    outcome
}

async fn try_download<F, T>(
    fetcher: &F,
    target: &T,
    task: &DownloadTask,
    check_status: bool,
) -> Outcome
where
    F: Fetcher + ?Sized,
    T: SaveTarget + ?Sized,
{
    let fetched = fetcher.fetch(&task.url).await?;
    if check_status && !fetched.is_success() {
        return Err(DownloadError::Status(fetched.status_text));
    }

    let bytes = fetched.body.len();
    let handle = target.stage(fetched.body).await?;

    let saved = target.save(&handle, &task.filename).await;
    target.release(handle).await;

    Ok(SavedImage {
        url: task.url.clone(),
        path: saved?,
        bytes,
    })
}

/// `Fetcher` backed by a shared reqwest client
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_secs: Option<u64>,
}

impl HttpFetcher {
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, DownloadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            timeout_secs,
        })
    }

    fn map_error(&self, e: reqwest::Error) -> DownloadError {
        match self.timeout_secs {
            Some(secs) if e.is_timeout() => DownloadError::Timeout(secs),
            _ => DownloadError::from(e),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string());
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        Ok(Fetched {
            status: status.as_u16(),
            status_text,
            body: body.to_vec(),
        })
    }
}

/// A body written to a hidden `.part` file next to its final location
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Saves images into a directory, never overwriting an existing file
pub struct DirectoryTarget {
    dir: PathBuf,
    staged: AtomicUsize,
    /// Held from choosing a free name until the rename into it is done
    saving: Mutex<()>,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            staged: AtomicUsize::new(0),
            saving: Mutex::new(()),
        }
    }

    /// First free name among `name`, `name (2)`, `name (3)`, ...
    async fn free_path(&self, filename: &str) -> Result<PathBuf, DownloadError> {
        let mut path = self.dir.join(filename);
        let mut n = 2;
        while tokio::fs::try_exists(&path).await? {
            path = self.dir.join(numbered_filename(filename, n));
            n += 1;
        }
        Ok(path)
    }
}

#[async_trait]
impl SaveTarget for DirectoryTarget {
    type Handle = StagedFile;

    async fn stage(&self, body: Vec<u8>) -> Result<StagedFile, DownloadError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let n = self.staged.fetch_add(1, Ordering::Relaxed);
        let path = self
            .dir
            .join(format!(".img-harvest-{}-{}.part", std::process::id(), n));
        tokio::fs::write(&path, body).await?;

        ::log::trace!("Staged {}", path.display());
        Ok(StagedFile { path })
    }

    async fn save(&self, handle: &StagedFile, filename: &str) -> Result<PathBuf, DownloadError> {
        let _guard = self.saving.lock().await;
        let path = self.free_path(filename).await?;
        tokio::fs::rename(&handle.path, &path).await?;
        Ok(path)
    }

    async fn release(&self, handle: StagedFile) {
        // After a successful save the staged file has already been renamed away
        match tokio::fs::remove_file(&handle.path).await {
            Ok(()) => ::log::debug!("Discarded unsaved {}", handle.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => ::log::warn!("Failed to remove {}: {}", handle.path.display(), e),
        }
    }
}
