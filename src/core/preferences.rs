//! Target-language preference
//!
//! One persisted language code shared by the popup and the settings surface.
//! Read failures fall back to the default, write failures keep the previous
//! value; both are only logged.

use crate::core::languages::DEFAULT_TARGET_LANGUAGE;
use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::AppSettings;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Storage trait for the persisted preference
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> AppResult<Option<String>>;
    async fn store(&self, code: &str) -> AppResult<()>;
}

/// Stores the preference inside the `AppSettings` JSON document.
pub struct SettingsFileStore {
    path: PathBuf,
}

impl SettingsFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by the platform config directory.
    pub fn default_location() -> AppResult<Self> {
        Ok(Self::new(AppSettings::get_settings_path()?))
    }
}

#[async_trait]
impl PreferenceStore for SettingsFileStore {
    async fn load(&self) -> AppResult<Option<String>> {
        let settings = AppSettings::load_from(&self.path).await?;
        let code = settings.preferences.target_language;
        Ok(if code.is_empty() { None } else { Some(code) })
    }

    async fn store(&self, code: &str) -> AppResult<()> {
        // Read-modify-write so the popup and translator sections survive
        let mut settings = AppSettings::load_from(&self.path).await?;
        settings.preferences.target_language = code.to_string();
        settings.save_to(&self.path).await
    }
}

/// In-process store, for embedding hosts that persist elsewhere.
#[derive(Default)]
pub struct MemoryStore {
    value: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(code: &str) -> Self {
        Self {
            value: Mutex::new(Some(code.to_string())),
        }
    }

    pub fn current(&self) -> Option<String> {
        match self.value.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn load(&self) -> AppResult<Option<String>> {
        Ok(self.current())
    }

    async fn store(&self, code: &str) -> AppResult<()> {
        let mut guard = match self.value.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(code.to_string());
        Ok(())
    }
}

/// Preference semantics on top of a raw store: a read always yields a code.
#[derive(Clone)]
pub struct TargetLanguagePreference {
    store: Arc<dyn PreferenceStore>,
}

impl TargetLanguagePreference {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self) -> String {
        match self.store.load().await {
            Ok(Some(code)) => code,
            Ok(None) => DEFAULT_TARGET_LANGUAGE.to_string(),
            Err(e) => {
                warn!("Error getting target language, using {}: {}", DEFAULT_TARGET_LANGUAGE, e);
                DEFAULT_TARGET_LANGUAGE.to_string()
            }
        }
    }

    /// Persist `code`, logging instead of failing.
    pub async fn set(&self, code: &str) {
        if let Err(e) = self.try_set(code).await {
            warn!("Error saving target language {}: {}", code, e);
        }
    }

    pub async fn try_set(&self, code: &str) -> AppResult<()> {
        if code.trim().is_empty() {
            return Err(AppError::Validation("Empty language code".to_string()));
        }
        self.store.store(code).await?;
        debug!("Target language saved: {}", code);
        Ok(())
    }

    /// Raw read, for callers that need to report load failures.
    pub async fn load(&self) -> AppResult<Option<String>> {
        self.store.load().await
    }
}

enum PreferenceCommand {
    Set(String),
    Get(oneshot::Sender<String>),
}

/// Serializes access to a [`TargetLanguagePreference`].
///
/// One task applies commands in submission order, so a later write always
/// lands after an earlier one and a read sees every write queued before it.
#[derive(Clone)]
pub struct PreferenceQueue {
    tx: mpsc::UnboundedSender<PreferenceCommand>,
}

impl PreferenceQueue {
    /// Start the serving task. Must be called inside a tokio runtime.
    pub fn spawn(preference: TargetLanguagePreference) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    PreferenceCommand::Set(code) => preference.set(&code).await,
                    PreferenceCommand::Get(reply) => {
                        let _ = reply.send(preference.get().await);
                    }
                }
            }
            debug!("Preference queue closed");
        });
        Self { tx }
    }

    /// Queue a write. Failures are logged by the serving task.
    pub fn set(&self, code: &str) {
        if self.tx.send(PreferenceCommand::Set(code.to_string())).is_err() {
            warn!("Preference queue closed, dropping write of {}", code);
        }
    }

    /// Queue a read now; the returned value resolves once it is served.
    pub fn get(&self) -> PendingPreference {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(PreferenceCommand::Get(reply)).is_err() {
            warn!("Preference queue closed, reading default");
        }
        PendingPreference { rx }
    }

    /// Wait until every command queued so far has been applied.
    pub async fn flush(&self) {
        self.get().wait().await;
    }
}

pub struct PendingPreference {
    rx: oneshot::Receiver<String>,
}

impl PendingPreference {
    pub async fn wait(self) -> String {
        self.rx.await.unwrap_or_else(|_| DEFAULT_TARGET_LANGUAGE.to_string())
    }
}
