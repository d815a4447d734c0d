use crate::domain::paths::path_error::PathError;
use std::io;
use thiserror::Error;

/// バッチ全体を開始できない場合のエラー。これが返ると1ファイルも処理されない。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("input directory error: {0}")]
    Input(#[source] PathError),

    #[error("output directory error: {0}")]
    Output(#[source] PathError),
}

/// 1ファイルの処理のどの段階で失敗したか。
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("cannot open file: {0}")]
    Open(#[source] io::Error),

    #[error("cannot decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("cannot encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("cannot write output: {0}")]
    Write(#[source] io::Error),
}

/// 1ファイル単位の失敗。対象ファイル名と原因を保持する。
///
/// バッチはこのエラーで中断されず、次のファイルへ進む。
#[derive(Debug, Error)]
#[error("{file_name}: {cause}")]
pub struct FileError {
    file_name: String,
    #[source]
    cause: ProcessError,
}

impl FileError {
    pub fn new(file_name: impl Into<String>, cause: ProcessError) -> Self {
        Self {
            file_name: file_name.into(),
            cause,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn cause(&self) -> &ProcessError {
        &self.cause
    }
}
