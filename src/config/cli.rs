use crate::core::{LineSource, OutputSink, Storage};
use crate::utils::error::{CensusError, Result};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Reads and writes files relative to a base directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    // 絕對路徑會取代 base_path
    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

pub struct FileLines {
    reader: BufReader<File>,
    buf: Vec<u8>,
}

impl LineSource for FileLines {
    /// 無效的 UTF-8 位元組以替換字元解碼，不中斷整個執行
    async fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
            return Ok(None);
        }

        if self.buf.ends_with(b"\n") {
            self.buf.pop();
            if self.buf.ends_with(b"\r") {
                self.buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl Storage for LocalStorage {
    type Lines = FileLines;

    async fn open_lines(&self, path: &str) -> Result<FileLines> {
        let full_path = self.resolve(path);
        let file = File::open(&full_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => CensusError::InputNotFound {
                path: full_path.display().to_string(),
            },
            _ => CensusError::IoError(e),
        })?;

        Ok(FileLines {
            reader: BufReader::new(file),
            buf: Vec::new(),
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        fs::write(full_path, data).await?;
        Ok(())
    }
}

/// Writes the ranking to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    async fn emit(&self, text: &str) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}
