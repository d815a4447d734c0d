use std::fmt;

// 入出力フォルダの検証・走査で発生するエラー
#[derive(Debug)]
pub enum PathError {
    InvalidPath(String),
    IoError(std::io::Error),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidPath(s) => write!(f, "invalid path: {}", s),
            PathError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::InvalidPath(_) => None,
            PathError::IoError(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for PathError {
    fn from(e: std::io::Error) -> Self {
        PathError::IoError(e)
    }
}
