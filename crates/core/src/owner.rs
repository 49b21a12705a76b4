//! Owner lookups for the tracked path
//!
//! A lookup can race with the event it describes: the file may be gone by the
//! time we stat it. Callers treat every failure as recoverable and fall back
//! to [`UNKNOWN_USER`].

use nix::unistd::{Uid, User};
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Placeholder written when the owner cannot be resolved
pub const UNKNOWN_USER: &str = "unknown";

/// Errors from owner lookups
#[derive(Error, Debug)]
pub enum OwnerError {
    #[error("Cannot read attributes of {path}: {source}")]
    AttributeLookup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot resolve user name for uid {uid}: {reason}")]
    IdentityResolution { uid: u32, reason: String },
}

/// Resolves the user owning a path at the moment of the call
pub trait OwnerResolver: Send + Sync {
    fn resolve_owner(&self, path: &Path) -> Result<String, OwnerError>;

    /// Resolve the owner, logging failures and substituting [`UNKNOWN_USER`]
    fn owner_or_placeholder(&self, path: &Path) -> String {
        match self.resolve_owner(path) {
            Ok(name) => name,
            Err(e) => {
                warn!("Owner lookup failed, recording '{}': {}", UNKNOWN_USER, e);
                UNKNOWN_USER.to_string()
            }
        }
    }
}

/// Resolver backed by `stat(2)` and the passwd database
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOwnerResolver;

impl OwnerResolver for SystemOwnerResolver {
    fn resolve_owner(&self, path: &Path) -> Result<String, OwnerError> {
        let metadata = std::fs::metadata(path).map_err(|source| OwnerError::AttributeLookup {
            path: path.to_path_buf(),
            source,
        })?;

        user_name(metadata.uid())
    }
}

/// Look up the login name for a numeric uid
pub fn user_name(uid: u32) -> Result<String, OwnerError> {
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(Some(user)) => Ok(user.name),
        Ok(None) => Err(OwnerError::IdentityResolution {
            uid,
            reason: "no passwd entry".to_string(),
        }),
        Err(errno) => Err(OwnerError::IdentityResolution {
            uid,
            reason: errno.to_string(),
        }),
    }
}
