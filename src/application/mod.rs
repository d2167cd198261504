// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports and session orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`session`]: Asynchronous, cancellable "load, then edit" entry point
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain, media, and editor types
//! - Infrastructure layer implements application layer ports
//! - Hosts call [`session::open_session`] and then drive the returned editor
//!
//! # Example
//!
//! ```no_run
//! use dental_lens::application::session::{open_session, CancelToken};
//! use dental_lens::config::EditorConfig;
//! use dental_lens::infrastructure::FsImageSource;
//! use std::sync::Arc;
//!
//! # async fn run() -> dental_lens::error::Result<()> {
//! let source = Arc::new(FsImageSource::new("/srv/records"));
//! let editor = open_session(source, "7/bitewing.png", EditorConfig::default(), CancelToken::new()).await?;
//! println!("{:?}", editor.output_dimensions());
//! # Ok(())
//! # }
//! ```

pub mod port;
pub mod session;
