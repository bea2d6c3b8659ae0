//! Capability enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five operations a principal can be granted.
///
/// Roles may carry any combination; folder assignments only carry
/// `Read`, `Write` and `Delete` — `Copy` and `Share` are grantable
/// through roles alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// List folders and download files.
    Read,
    /// Upload files and create folders.
    Write,
    /// Duplicate an existing file into another folder.
    Copy,
    /// Remove files.
    Delete,
    /// Issue share links.
    Share,
}

impl Capability {
    /// Whether this capability has a folder-scoped equivalent.
    ///
    /// Folder assignments carry read/write/delete bits only; copy and
    /// share can never be satisfied by an assignment.
    pub fn folder_scoped(&self) -> bool {
        matches!(self, Self::Read | Self::Write | Self::Delete)
    }

    /// Return the capability as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Copy => "copy",
            Self::Delete => "delete",
            Self::Share => "share",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Capability {
    type Err = crate::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "copy" => Ok(Self::Copy),
            "delete" => Ok(Self::Delete),
            "share" => Ok(Self::Share),
            _ => Err(crate::AppError::validation(format!(
                "Invalid capability: '{s}'. Expected one of: read, write, copy, delete, share"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_scope() {
        assert!(Capability::Read.folder_scoped());
        assert!(Capability::Write.folder_scoped());
        assert!(Capability::Delete.folder_scoped());
        assert!(!Capability::Copy.folder_scoped());
        assert!(!Capability::Share.folder_scoped());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("read".parse::<Capability>().unwrap(), Capability::Read);
        assert_eq!("SHARE".parse::<Capability>().unwrap(), Capability::Share);
        assert!("move".parse::<Capability>().is_err());
    }
}
