use crate::domain::ports::KeyValueBackend;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// One file per key under `base_path`.
///
/// File names are the key with every byte outside `[A-Za-z0-9_-]` written as
/// `%XX`, so any group name maps to a single safe file name. Escaped names
/// longer than 200 bytes are stored under `~<sha256 of key>`
/// instead, with the key itself kept in a `<length>\n<key>` header at the
/// start of the file. Writes land in a temporary file first and are renamed
/// over the target.
#[derive(Debug)]
pub struct LocalBackend {
    base_path: PathBuf,
    tmp_counter: AtomicU64,
}

impl LocalBackend {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            tmp_counter: AtomicU64::new(0),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(file_name_for(key))
    }
}

/// Most filesystems cap a file name at 255 bytes; the temp suffix needs room too.
const MAX_ESCAPED_LEN: usize = 200;
const DIGEST_MARKER: char = '~';

enum FileName {
    Escaped(String),
    Digest(String),
}

impl FileName {
    fn for_key(key: &str) -> Self {
        let escaped = escape_key(key);
        if escaped.len() <= MAX_ESCAPED_LEN {
            FileName::Escaped(escaped)
        } else {
            let digest = hex::encode(Sha256::digest(key.as_bytes()));
            FileName::Digest(format!("{}{}", DIGEST_MARKER, digest))
        }
    }

    fn as_str(&self) -> &str {
        match self {
            FileName::Escaped(name) | FileName::Digest(name) => name,
        }
    }
}

fn file_name_for(key: &str) -> String {
    match FileName::for_key(key) {
        FileName::Escaped(name) | FileName::Digest(name) => name,
    }
}

fn with_key_header(key: &str, value: &[u8]) -> Vec<u8> {
    let header = format!("{}\n", key.len());
    let mut data = Vec::with_capacity(header.len() + key.len() + value.len());
    data.extend_from_slice(header.as_bytes());
    data.extend_from_slice(key.as_bytes());
    data.extend_from_slice(value);
    data
}

/// Splits a digest-named file into its stored key and value.
fn split_key_header(mut data: Vec<u8>) -> io::Result<(String, Vec<u8>)> {
    let invalid = || io::Error::new(io::ErrorKind::InvalidData, "corrupt key header");

    let newline = data.iter().position(|&b| b == b'\n').ok_or_else(invalid)?;
    let key_len: usize = std::str::from_utf8(&data[..newline])
        .ok()
        .and_then(|len| len.parse().ok())
        .ok_or_else(invalid)?;
    let key_end = (newline + 1)
        .checked_add(key_len)
        .filter(|&end| end <= data.len())
        .ok_or_else(invalid)?;

    let value = data.split_off(key_end);
    let key = String::from_utf8(data.split_off(newline + 1)).map_err(|_| invalid())?;
    Ok((key, value))
}

impl KeyValueBackend for LocalBackend {
    async fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let file_name = FileName::for_key(key);
        let data = match tokio::fs::read(self.base_path.join(file_name.as_str())).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        match file_name {
            FileName::Escaped(_) => Ok(Some(data)),
            FileName::Digest(name) => {
                let (stored_key, value) = split_key_header(data)?;
                if stored_key != key {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("file '{}' holds a different key", name),
                    ));
                }
                Ok(Some(value))
            }
        }
    }

    async fn write(&self, key: &str, value: &[u8]) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;

        let file_name = FileName::for_key(key);
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let tmp_path = self
            .base_path
            .join(format!("{}.{}.tmp", file_name.as_str(), n));

        match &file_name {
            FileName::Escaped(_) => tokio::fs::write(&tmp_path, value).await?,
            FileName::Digest(_) => tokio::fs::write(&tmp_path, with_key_header(key, value)).await?,
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, self.base_path.join(file_name.as_str())).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e);
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> io::Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn list_keys(&self, prefix: &str) -> io::Result<BTreeSet<String>> {
        let mut keys = BTreeSet::new();

        let mut entries = match tokio::fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(keys),
            Err(e) => return Err(e),
        };

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            // temporary files contain '.', stored names never do
            if name.contains('.') {
                continue;
            }

            let key = if name.starts_with(DIGEST_MARKER) {
                let data = match tokio::fs::read(entry.path()).await {
                    Ok(data) => data,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                    Err(e) => return Err(e),
                };
                split_key_header(data)?.0
            } else {
                match unescape_key(name) {
                    Some(key) => key,
                    None => continue,
                }
            };
            if key.starts_with(prefix) {
                keys.insert(key);
            }
        }

        Ok(keys)
    }
}

fn escape_key(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            escaped.push(byte as char);
        } else {
            escaped.push_str(&format!("%{:02X}", byte));
        }
    }
    escaped
}

fn unescape_key(file_name: &str) -> Option<String> {
    let bytes = file_name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = file_name.get(i + 1..i + 3)?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            }
            b if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' => {
                out.push(b);
                i += 1;
            }
            _ => return None,
        }
    }
    String::from_utf8(out).ok()
}
