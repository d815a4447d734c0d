use super::path_error::PathError;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// ファイル名がこれで終われば処理対象（大文字・小文字は区別しない）。
pub const PNG_SUFFIX: &str = ".png";

// 構造体としてDirectoryPathを定義
#[derive(Debug)]
pub struct DirectoryPath {
    pub path: PathBuf,
}

/// 入力フォルダ直下で見つかった、処理対象のPNGファイル。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngCandidate {
    path: PathBuf,
    file_name: OsString,
}

impl PngCandidate {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 出力先でもそのまま使うファイル名。
    pub fn file_name(&self) -> &OsStr {
        &self.file_name
    }

    /// ログ表示用のファイル名。UTF-8でない部分は置換される。
    pub fn display_name(&self) -> String {
        self.file_name.to_string_lossy().into_owned()
    }
}

impl DirectoryPath {
    // コンストラクタ: パスを受け取り、バリデーションを行う
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        // パスが存在し、かつディレクトリであることを検証
        if !path.exists() {
            return Err(PathError::InvalidPath(format!(
                "'{}' does not exist",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(PathError::InvalidPath(format!(
                "'{}' is not a directory",
                path.display()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    // 内部のPathBufへの参照を返す
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// フォルダ直下（再帰なし）にあるPNGファイルを、ファイル名順で列挙します。
    ///
    /// ファイル名が `.png` で終わる通常ファイルだけが対象です（`.png` という名前そのものも含む）。
    /// ディレクトリやそれ以外の名前のエントリは読み込みも書き込みもされません。
    pub fn png_files(&self) -> Result<Vec<PngCandidate>, PathError> {
        let mut candidates = Vec::new();
        // min_depth(1) でルート自身を除外し、max_depth(1) で直下のみに限定する。
        // ファイル名の順序を安定させるため、ファイル名でソートしながら走査する。
        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry_result in walker {
            let entry = entry_result.map_err(|e| PathError::IoError(e.into()))?;
            let path = entry.path();
            if is_png_file(path) {
                candidates.push(PngCandidate {
                    path: path.to_path_buf(),
                    file_name: entry.file_name().to_os_string(),
                });
            } else {
                tracing::trace!(path = %path.display(), "skipping non-png entry");
            }
        }
        Ok(candidates)
    }
}

/// パスが処理対象のPNGファイルであるか、ファイル名の末尾で判定します。
pub fn is_png_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    // `extension()` は `.png` という名前を拡張子なしと扱うため、名前全体の末尾で比較する
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .is_some_and(|name| name.ends_with(PNG_SUFFIX))
}

// Displayトレイトの実装（表示用）
impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
