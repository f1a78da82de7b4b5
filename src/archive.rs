//! Streaming ZIP generation.
//!
//! The archive is encoded while the response is in flight: a spawned task
//! drives the ZIP writer into one half of an in-memory duplex pipe and the
//! response body reads from the other half. Neither the source files nor
//! the finished archive are ever held in memory or written to disk.

use std::io;
use std::path::{Path, PathBuf};

use async_zip::tokio::write::ZipFileWriter;
use async_zip::{Compression, ZipEntryBuilder};
use bytes::Bytes;
use futures::Stream;
use tokio::io::AsyncWrite;
use tokio_util::compat::FuturesAsyncWriteCompatExt;
use tokio_util::io::ReaderStream;

use crate::errors::{RuntimeError, log_error_chain};

/// Buffer size of the duplex pipe between the archive writer and the
/// response body (64KB)
const DUPLEX_BUFFER_SIZE: usize = 65536;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A stat'ed filesystem path ready to be archived, together with the name
/// it will carry inside the archive.
#[derive(Debug)]
pub struct ArchiveTarget {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

impl ArchiveTarget {
    /// Joins `name` under the served root and stats it.
    ///
    /// A path that cannot be stat'ed is reported as `NotFound`; anything
    /// that is neither a regular file nor a directory is refused.
    pub async fn resolve(root: &Path, name: &str) -> Result<Self, RuntimeError> {
        let path = root.join(name);
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|_| RuntimeError::NotFound)?;

        let kind = if metadata.is_file() {
            EntryKind::File
        } else if metadata.is_dir() {
            EntryKind::Directory
        } else {
            return Err(RuntimeError::UnsupportedEntryType);
        };

        Ok(Self {
            path,
            name: name.to_owned(),
            kind,
        })
    }
}

/// Produces the response body stream for an archive download.
///
/// Archive construction runs in a separate task so that bytes reach the
/// client as soon as they are encoded. If the client disconnects, the pipe
/// write fails, the task bails out and its open file handles are released;
/// the HTTP status is committed by then, so the failure is only logged.
pub fn stream_archive(target: ArchiveTarget) -> impl Stream<Item = io::Result<Bytes>> {
    let (writer, reader) = tokio::io::duplex(DUPLEX_BUFFER_SIZE);

    tokio::spawn(async move {
        if let Err(err) = write_archive(writer, &target).await {
            log_error_chain(err.to_string());
        }
    });

    ReaderStream::new(reader)
}

async fn write_archive<W>(out: W, target: &ArchiveTarget) -> Result<(), RuntimeError>
where
    W: AsyncWrite + Unpin,
{
    let mut writer = ZipFileWriter::with_tokio(out);

    match target.kind {
        EntryKind::File => append_file(&mut writer, &target.path, &target.name).await?,
        EntryKind::Directory => {
            append_directory_tree(&mut writer, &target.path, &target.name).await?
        }
    }

    // Writes the central directory; only now does the client hold a
    // complete, valid archive.
    writer
        .close()
        .await
        .map_err(|e| RuntimeError::StreamWriteError(e.to_string()))?;

    Ok(())
}

/// Adds a single entry to the archive, streaming the file's bytes through
/// a fixed-size copy buffer.
async fn append_file<W>(
    writer: &mut ZipFileWriter<W>,
    path: &Path,
    entry_name: &str,
) -> Result<(), RuntimeError>
where
    W: AsyncWrite + Unpin,
{
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| RuntimeError::StreamWriteError(e.to_string()))?;

    let builder = ZipEntryBuilder::new(entry_name.to_owned().into(), Compression::Deflate);
    let entry_writer = writer
        .write_entry_stream(builder)
        .await
        .map_err(|e| RuntimeError::StreamWriteError(e.to_string()))?;

    let mut entry_writer = entry_writer.compat_write();
    tokio::io::copy(&mut file, &mut entry_writer)
        .await
        .map_err(|e| RuntimeError::StreamWriteError(e.to_string()))?;

    entry_writer
        .into_inner()
        .close()
        .await
        .map_err(|e| RuntimeError::StreamWriteError(e.to_string()))?;

    Ok(())
}

/// Recursively adds every descendant file of `root`, preserving the
/// relative structure under `root_name` as the archive's top-level folder.
///
/// The traversal is a queue of pending directories rather than recursion,
/// so arbitrarily deep trees cannot overflow the stack. Sockets, devices
/// and other special files are skipped.
async fn append_directory_tree<W>(
    writer: &mut ZipFileWriter<W>,
    root: &Path,
    root_name: &str,
) -> Result<(), RuntimeError>
where
    W: AsyncWrite + Unpin,
{
    let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| RuntimeError::StreamWriteError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RuntimeError::StreamWriteError(e.to_string()))?
        {
            let entry_path = entry.path();
            let metadata = entry
                .metadata()
                .await
                .map_err(|e| RuntimeError::StreamWriteError(e.to_string()))?;

            if metadata.is_dir() {
                pending.push(entry_path);
            } else if metadata.is_file() {
                let relative = entry_path
                    .strip_prefix(root)
                    .map_err(|e| RuntimeError::StreamWriteError(e.to_string()))?;
                let entry_name = Path::new(root_name)
                    .join(relative)
                    .to_string_lossy()
                    .into_owned();
                append_file(writer, &entry_path, &entry_name).await?;
            }
        }
    }

    Ok(())
}
