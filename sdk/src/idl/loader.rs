use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::{SdkError, SdkResult};
use crate::idl::InterfaceDescriptor;
use crate::logging::Logger;

/// Minimal descriptor covering exactly the instructions this client sends
pub const EMBEDDED_DESCRIPTOR: &str = include_str!("mint_me.json");

/// Parse the embedded descriptor
pub fn embedded_descriptor() -> SdkResult<InterfaceDescriptor> {
    InterfaceDescriptor::from_json(EMBEDDED_DESCRIPTOR)
}

/// Where to get the descriptor from
#[derive(Clone, Debug)]
pub enum DescriptorSource {
    /// Already parsed; used as-is
    Object(InterfaceDescriptor),
    /// Local file path, or an `http(s)` URL when no such file exists
    Location(String),
    /// Configured cache file if present, otherwise the embedded descriptor
    Default,
}

impl From<InterfaceDescriptor> for DescriptorSource {
    fn from(descriptor: InterfaceDescriptor) -> Self {
        DescriptorSource::Object(descriptor)
    }
}

/// Resolves a `DescriptorSource`. Nothing is retried.
#[derive(Clone, Debug)]
pub struct DescriptorLoader {
    cache_path: Option<PathBuf>,
    timeout: Duration,
    logger: Logger,
}

impl DescriptorLoader {
    pub fn new(logger: Logger) -> Self {
        Self {
            cache_path: None,
            timeout: Duration::from_secs(30),
            logger,
        }
    }

    /// Local file consulted for `Default` and written after remote fetches
    pub fn with_cache_path(mut self, path: Option<PathBuf>) -> Self {
        self.cache_path = path;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn load(&self, source: DescriptorSource) -> SdkResult<InterfaceDescriptor> {
        match source {
            DescriptorSource::Object(descriptor) => Ok(descriptor),
            DescriptorSource::Location(location) => self.load_location(&location).await,
            DescriptorSource::Default => self.load_default().await,
        }
    }

    async fn load_location(&self, location: &str) -> SdkResult<InterfaceDescriptor> {
        let path = Path::new(location);
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            self.logger
                .debug(&format!("loading interface descriptor from {}", path.display()));
            return read_descriptor_file(path).await;
        }

        if location.starts_with("https://") || location.starts_with("http://") {
            let json = self.fetch(location).await?;
            let descriptor = InterfaceDescriptor::from_json(&json)?;
            self.write_cache(&json).await;
            return Ok(descriptor);
        }

        Err(SdkError::DescriptorLoad(format!(
            "'{}' is neither a readable file nor an http(s) URL",
            location
        )))
    }

    async fn load_default(&self) -> SdkResult<InterfaceDescriptor> {
        if let Some(path) = &self.cache_path {
            if tokio::fs::try_exists(path).await.unwrap_or(false) {
                self.logger
                    .debug(&format!("loading cached interface descriptor {}", path.display()));
                return read_descriptor_file(path).await;
            }
        }
        self.logger.debug("using embedded interface descriptor");
        embedded_descriptor()
    }

    async fn fetch(&self, url: &str) -> SdkResult<String> {
        self.logger
            .info(&format!("fetching interface descriptor from {}", url));

        // ureq is blocking, keep it off the async worker threads
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || {
            let response = agent
                .get(&url)
                .call()
                .map_err(|e| SdkError::DescriptorLoad(format!("fetching {}: {}", url, e)))?;
            response
                .into_string()
                .map_err(|e| SdkError::DescriptorLoad(format!("reading {}: {}", url, e)))
        })
        .await
        .map_err(|e| SdkError::DescriptorLoad(format!("fetch task failed: {}", e)))?
    }

    async fn write_cache(&self, json: &str) {
        let Some(path) = &self.cache_path else {
            return;
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    self.logger.warn(&format!(
                        "cannot create cache directory {}: {}",
                        parent.display(),
                        e
                    ));
                    return;
                }
            }
        }
        if let Err(e) = tokio::fs::write(path, json).await {
            self.logger
                .warn(&format!("cannot write descriptor cache {}: {}", path.display(), e));
        }
    }
}

async fn read_descriptor_file(path: &Path) -> SdkResult<InterfaceDescriptor> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SdkError::DescriptorLoad(format!("reading {}: {}", path.display(), e)))?;
    InterfaceDescriptor::from_json(&json)
}
