//! The fatal-error taxonomy, distinct from the graceful
//! [`crate::finding::Finding`] path that every per-file failure degrades
//! into. Covers the single fatal condition this analyzer recognizes.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not enumerate '{path}': {source}")]
    RootUnreadable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
