//! Clipboard module
//!
//! Write-only clipboard access for the popup's Copy control.

use crate::shared::error::{AppError, AppResult};
use async_trait::async_trait;

#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    async fn write_text(&self, text: &str) -> AppResult<()>;
}

/// System clipboard via `cli-clipboard`, run off the async executor because
/// the platform backends block.
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
#[async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> AppResult<()> {
        use cli_clipboard::{ClipboardContext, ClipboardProvider};

        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            ClipboardContext::new()
                .and_then(|mut ctx| ctx.set_contents(text))
                .map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| AppError::Clipboard(format!("Clipboard task failed: {}", e)))?
        .map_err(AppError::Clipboard)
    }
}

/// Clipboard used when no system clipboard is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableClipboard;

#[async_trait]
impl ClipboardWriter for UnavailableClipboard {
    async fn write_text(&self, _text: &str) -> AppResult<()> {
        Err(AppError::Clipboard("No clipboard available".to_string()))
    }
}
