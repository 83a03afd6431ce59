//! Filesystem implementation of the directory provisioner.

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

use super::error::ProvisionError;
use super::traits::DirectoryProvisioner;

/// Provisions destination directories on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProvisioner;

impl FsProvisioner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DirectoryProvisioner for FsProvisioner {
    async fn ensure(&self, path: &Path) -> Result<(), ProvisionError> {
        if path.as_os_str().is_empty() {
            return Err(ProvisionError::InvalidPath(path.to_path_buf()));
        }

        match fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => return Ok(()),
            Ok(_) => return Err(ProvisionError::AlreadyAFile(path.to_path_buf())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ProvisionError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }

        fs::create_dir_all(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => {
                ProvisionError::PermissionDenied(path.to_path_buf())
            }
            _ => ProvisionError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })
    }
}
