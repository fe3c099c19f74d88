//! Store credentials
//!
//! Credentials live in a plain two-line file: user name on the first line,
//! password on the second. Anything beyond "two values, line-delimited" is
//! up to the deployment.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PetlogError, Result};

/// A user/password pair for store authentication.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    /// Load credentials from a two-line file.
    ///
    /// A missing file yields [`PetlogError::CredentialsNotFound`]; a file
    /// without two non-empty lines yields
    /// [`PetlogError::CredentialsMalformed`]. Both are distinct from any
    /// store-level connection failure.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PetlogError::CredentialsNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut lines = contents.lines().map(str::trim).filter(|l| !l.is_empty());
        match (lines.next(), lines.next()) {
            (Some(user), Some(password)) => {
                debug!(path = %path.display(), user, "loaded store credentials");
                Ok(Self {
                    user: user.to_string(),
                    password: password.to_string(),
                })
            }
            _ => Err(PetlogError::CredentialsMalformed(path.to_path_buf())),
        }
    }
}
