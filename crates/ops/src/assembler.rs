//! Multi-part file download, decryption and reassembly

use safely_decrypt::{Decryptor, Passphrase};
use safely_errors::{Error, PackageError};
use safely_net::NetClient;
use safely_signing::create_checksum;
use safely_types::{ExistingOutput, FileDescriptor, Package, PackageMetadata};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::DownloadedFile;

/// Reported after each part has been written and flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartProgress {
    /// 1-based part that just completed
    pub part: u32,
    pub parts: u32,
    /// Cumulative plaintext bytes written for this file so far
    pub bytes_written: u64,
}

/// Downloads one file of a package part by part.
///
/// Parts are requested, decrypted and appended strictly in order; the first
/// failure abandons the rest of the file and leaves already written bytes
/// where they are.
pub struct FileAssembler<'a> {
    net: &'a NetClient,
    existing: ExistingOutput,
}

impl<'a> FileAssembler<'a> {
    #[must_use]
    pub fn new(net: &'a NetClient) -> Self {
        Self {
            net,
            existing: ExistingOutput::default(),
        }
    }

    /// What to do if the target already exists
    #[must_use]
    pub fn with_existing(mut self, existing: ExistingOutput) -> Self {
        self.existing = existing;
        self
    }

    /// Fetch every part of `file`, decrypt it and write the plaintext to
    /// `target`.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::OutputExists` if the target exists under
    /// `ExistingOutput::Fail`, an I/O error if the target cannot be opened or
    /// written, or the network or decryption error of the first failing part.
    pub async fn download_file(
        &self,
        metadata: &PackageMetadata,
        package: &Package,
        file: &FileDescriptor,
        target: &Path,
        progress: Option<&(dyn Fn(PartProgress) + Send + Sync)>,
    ) -> Result<DownloadedFile, Error> {
        let checksum = create_checksum(&metadata.key_code, &package.package_code);
        let passphrase = Passphrase::from_parts(&package.server_secret, &metadata.key_code);

        let mut sink = open_sink(target, self.existing).await?;
        let mut bytes_written = 0u64;

        info!(
            file_id = %file.file_id,
            parts = file.parts,
            target = %target.display(),
            "Downloading file"
        );

        for part in 1..=file.parts {
            let body = self
                .net
                .fetch_part(&package.package_id, &file.file_id, part, &checksum)
                .await?;
            let ciphertext = body.into_bytes().await?;

            let mut decryptor = Decryptor::new(passphrase.clone());
            let plaintext = decryptor.decrypt(ciphertext.as_ref())?;

            sink.write_all(&plaintext)
                .await
                .map_err(|e| Error::io_with_path(&e, target))?;
            sink.flush()
                .await
                .map_err(|e| Error::io_with_path(&e, target))?;

            bytes_written += plaintext.len() as u64;
            debug!(file_id = %file.file_id, part, bytes_written, "Part written");

            if let Some(observer) = progress {
                observer(PartProgress {
                    part,
                    parts: file.parts,
                    bytes_written,
                });
            }
        }

        Ok(DownloadedFile {
            path: target.to_path_buf(),
            bytes_written,
            parts: file.parts,
        })
    }
}

/// Open the output once; every write of the download goes through this
/// handle in order.
async fn open_sink(target: &Path, existing: ExistingOutput) -> Result<File, Error> {
    let mut options = OpenOptions::new();
    match existing {
        ExistingOutput::Fail => options.write(true).create_new(true),
        ExistingOutput::Truncate => options.write(true).create(true).truncate(true),
        ExistingOutput::Append => options.append(true).create(true),
    };

    options.open(target).await.map_err(|e| {
        if e.kind() == ErrorKind::AlreadyExists {
            PackageError::OutputExists {
                path: target.display().to_string(),
            }
            .into()
        } else {
            Error::io_with_path(&e, target)
        }
    })
}
