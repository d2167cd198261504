// SPDX-License-Identifier: MPL-2.0
//! Image source port definition.
//!
//! The host resolves an opaque identifier (path, URL, blob key) to encoded
//! bytes; the editor never learns where they came from.

use crate::error::Result;
use crate::media::SourceImage;

/// Loads and decodes source images.
///
/// Implementations must be `Send + Sync` so that loading can run on a
/// blocking worker thread.
pub trait ImageSource: Send + Sync {
    /// Resolves `identifier` and decodes it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`](crate::error::Error::Decode) when the bytes
    /// are not a supported image and [`Error::Io`](crate::error::Error::Io)
    /// when they cannot be read.
    fn load(&self, identifier: &str) -> Result<SourceImage>;

    /// Whether `identifier` can be resolved without decoding it.
    fn contains(&self, identifier: &str) -> bool;
}
