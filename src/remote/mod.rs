//! # Remote Dataset Access
//!
//! Everything the pipeline needs from the outside world goes through the
//! [`RemoteStore`] trait:
//!
//! - [`RemoteStore::list_remote_files`]: enumerate spectral files under a
//!   dataset's base location
//! - [`RemoteStore::count_markers_in_stream`]: stream one file and count MS2
//!   markers without storing it
//! - [`RemoteStore::convert_to_interchange_format`]: download a vendor file
//!   and convert it to mzML in a local working directory
//! - [`RemoteStore::probe_converter`]: report whether conversion can run at all
//!
//! [`FtpToolchain`] implements the trait by driving `lftp`, `curl` and a
//! dockerised `msconvert`, each bounded by a timeout. Tests substitute
//! in-memory fakes.

mod error;
mod format;
mod ftp;
mod markers;
mod process;


use std::fmt;
use std::path::{Path, PathBuf};

pub use error::RemoteError;
pub use format::FileFormat;
pub use ftp::{parse_listing, FtpSettings, FtpToolchain, DEFAULT_CONVERTER_IMAGE};
pub use markers::{MarkerSet, Segmentation};
pub use process::{run_with_timeout, CommandOutput};

use crate::dataset::RemoteFile;

/// A parsed `ftp://host/path` dataset location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocation {
    /// Server host (and optional port)
    pub server: String,
    /// Absolute base path on the server, always ending in `/`
    pub base_path: String,
}

impl RemoteLocation {
    /// Parse a dataset link. Only `ftp://` links with a host are accepted,
    /// and the path must be safe to quote in an `lftp` command.
    pub fn parse(link: &str) -> Result<Self, RemoteError> {
        let invalid = || RemoteError::InvalidLocation(link.to_string());
        let rest = link.trim().strip_prefix("ftp://").ok_or_else(invalid)?;

        let (server, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };
        if server.is_empty()
            || server.starts_with('-')
            || server.contains(char::is_whitespace)
            || !is_script_safe(server)
            || !is_script_safe(path)
        {
            return Err(invalid());
        }

        let mut base_path = path.to_string();
        if !base_path.ends_with('/') {
            base_path.push('/');
        }
        Ok(Self {
            server: server.to_string(),
            base_path,
        })
    }

    /// Full URL for a path on this server.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("ftp://{}{}", self.server, path)
        } else {
            format!("ftp://{}/{}", self.server, path)
        }
    }
}

/// Whether `text` can be placed inside a double-quoted `lftp` argument
/// without ending the quote or starting another command.
pub(crate) fn is_script_safe(text: &str) -> bool {
    !text
        .chars()
        .any(|c| c.is_control() || matches!(c, '"' | '\\' | ';' | '!'))
}

impl fmt::Display for RemoteLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ftp://{}{}", self.server, self.base_path)
    }
}

/// Capability interface over remote dataset storage.
///
/// Implementations must be shareable across worker threads.
pub trait RemoteStore: Send + Sync {
    /// List spectral files (any [`FileFormat`]) under `location`.
    fn list_remote_files(&self, location: &RemoteLocation) -> Result<Vec<RemoteFile>, RemoteError>;

    /// Stream `file` and count segments matching `markers`.
    fn count_markers_in_stream(
        &self,
        location: &RemoteLocation,
        file: &RemoteFile,
        markers: &MarkerSet,
    ) -> Result<u64, RemoteError>;

    /// Fetch `file` into `workdir` and convert it to mzML, returning the
    /// path of the converted file.
    fn convert_to_interchange_format(
        &self,
        location: &RemoteLocation,
        file: &RemoteFile,
        workdir: &Path,
    ) -> Result<PathBuf, RemoteError>;

    /// Whether [`convert_to_interchange_format`](Self::convert_to_interchange_format)
    /// can run in this environment. Called once per processor.
    fn probe_converter(&self) -> bool {
        false
    }
}

impl<S: RemoteStore + ?Sized> RemoteStore for &S {
    fn list_remote_files(&self, location: &RemoteLocation) -> Result<Vec<RemoteFile>, RemoteError> {
        (**self).list_remote_files(location)
    }

    fn count_markers_in_stream(
        &self,
        location: &RemoteLocation,
        file: &RemoteFile,
        markers: &MarkerSet,
    ) -> Result<u64, RemoteError> {
        (**self).count_markers_in_stream(location, file, markers)
    }

    fn convert_to_interchange_format(
        &self,
        location: &RemoteLocation,
        file: &RemoteFile,
        workdir: &Path,
    ) -> Result<PathBuf, RemoteError> {
        (**self).convert_to_interchange_format(location, file, workdir)
    }

    fn probe_converter(&self) -> bool {
        (**self).probe_converter()
    }
}
