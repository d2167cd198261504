// SPDX-License-Identifier: MPL-2.0
//! Load-then-edit session opening.
//!
//! Decoding is the only suspending step of an editing session. It runs on a
//! blocking worker and races a [`CancelToken`]; no editor exists (and so no
//! intent can be accepted) until the image is fully decoded.

use std::future::pending;
use std::sync::Arc;

use tokio::sync::watch;

use crate::application::port::ImageSource;
use crate::config::EditorConfig;
use crate::editor::EditorController;
use crate::error::{Error, Result};

/// Cancellation flag shared between the host and an in-flight load.
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            // The sender lives as long as `self`, so this never resolves
            pending::<()>().await;
        }
    }
}

/// Loads `identifier` from `source` and opens an editor on it.
///
/// The decode keeps running on its worker if the load is cancelled, but its
/// result is dropped.
///
/// # Errors
///
/// - [`Error::Cancelled`] if `cancel` fires first.
/// - Whatever [`ImageSource::load`] reports (usually [`Error::Decode`] or
///   [`Error::Io`]).
pub async fn open_session(
    source: Arc<dyn ImageSource>,
    identifier: impl Into<String>,
    config: EditorConfig,
    cancel: CancelToken,
) -> Result<EditorController> {
    let identifier = identifier.into();
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    tracing::debug!(identifier = %identifier, "loading source image");
    let task = tokio::task::spawn_blocking(move || {
        let image = source.load(&identifier)?;
        Ok::<_, Error>(EditorController::new(image, identifier, &config))
    });

    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::info!("source image load cancelled");
            Err(Error::Cancelled)
        }
        joined = task => match joined {
            Ok(result) => result.inspect_err(|err| {
                tracing::warn!(%err, "failed to open edit session");
            }),
            Err(err) if err.is_cancelled() => Err(Error::Cancelled),
            Err(err) => Err(Error::Io(format!("Image loading task failed: {err}"))),
        },
    }
}
