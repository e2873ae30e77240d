//! Lazily launched headless Chromium session.
//!
//! One browser with one page serves every rendered-page probe. The page sits behind a
//! mutex so probes use it one at a time.

use chromiumoxide::{Browser, BrowserConfig as CdpBrowserConfig, Page};
use futures::StreamExt;
use tokio::{
    sync::{MappedMutexGuard, Mutex, MutexGuard},
    task::JoinHandle,
};

use crate::{config::BrowserConfig, error::probe::ProbeError, service::prober::BROWSER_USER_AGENT};

struct BrowserInstance {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

pub struct BrowserSession {
    config: BrowserConfig,
    instance: Mutex<Option<BrowserInstance>>,
}

impl BrowserSession {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            instance: Mutex::new(None),
        }
    }

    /// Locks the shared page, launching the browser first if it is not running.
    ///
    /// # Returns
    /// - `Ok(MappedMutexGuard<Page>)` - Exclusive access to the page until dropped
    /// - `Err(ProbeError::Browser)` - Chromium could not be launched
    pub async fn page(&self) -> Result<MappedMutexGuard<'_, Page>, ProbeError> {
        let mut slot = self.instance.lock().await;

        if slot.is_none() {
            *slot = Some(self.launch().await?);
        }

        MutexGuard::try_map(slot, |slot| slot.as_mut().map(|instance| &mut instance.page))
            .map_err(|_| ProbeError::Browser("Browser session is not running".to_string()))
    }

    /// Closes the browser so the next probe starts from a fresh process.
    pub async fn reset(&self) {
        let instance = self.instance.lock().await.take();

        if let Some(mut instance) = instance {
            if let Err(e) = instance.browser.close().await {
                tracing::debug!("Failed to close browser cleanly: {}", e);
            }
            instance.handler.abort();
            tracing::info!("Closed headless browser session");
        }
    }

    async fn launch(&self) -> Result<BrowserInstance, ProbeError> {
        let mut builder = CdpBrowserConfig::builder()
            .arg(format!("--user-agent={}", BROWSER_USER_AGENT))
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox");

        if let Some(path) = &self.config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        let config = builder
            .build()
            .map_err(|e| ProbeError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(config).await?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler event error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(e.into());
            }
        };

        tracing::info!("Launched headless browser session");

        Ok(BrowserInstance {
            browser,
            page,
            handler,
        })
    }
}
