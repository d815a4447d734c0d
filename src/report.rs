//! 利用者向けの進捗表示を出力するモジュール。
//!
//! 1イベントにつき1行、`[INFO]` / `[SUCCESS]` / `[ERROR]` のタグ付きで書き出します。
//! 出力先は `io::Write` を実装していれば何でもよく、本体では標準出力、テストでは `Vec<u8>` を使います。

use crate::domain::target_size::TargetSize;
use crate::error::FileError;
use std::fmt;
use std::io::Write;
use std::path::Path;

/// 行頭に付けるタグ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Success,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Status::Info => "[INFO]",
            Status::Success => "[SUCCESS]",
            Status::Error => "[ERROR]",
        };
        f.write_str(tag)
    }
}

pub struct StatusReporter<W: Write> {
    out: W,
}

impl<W: Write> StatusReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn converting(&mut self, file_name: &str) {
        self.emit(Status::Info, format_args!("Converting {} to RGB mode...", file_name));
    }

    pub fn resizing(&mut self, file_name: &str, size: TargetSize) {
        self.emit(Status::Info, format_args!("Resizing {} to {}...", file_name, size));
    }

    pub fn success(&mut self, file_name: &str, destination: &Path) {
        self.emit(
            Status::Success,
            format_args!("Processed {} -> {}", file_name, destination.display()),
        );
    }

    pub fn failure(&mut self, error: &FileError) {
        self.emit(
            Status::Error,
            format_args!("Failed to process {}: {}", error.file_name(), error.cause()),
        );
    }

    pub fn finished(&mut self) {
        self.emit(Status::Info, format_args!("Image processing complete."));
    }

    /// 出力先を取り出します。
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, status: Status, message: fmt::Arguments<'_>) {
        tracing::debug!(%status, "{}", message);
        // 書き込みに失敗してもバッチは止めない
        if let Err(e) = writeln!(self.out, "{} {}", status, message) {
            tracing::warn!(error = %e, "failed to write status line");
        }
    }
}
