use super::path_error::PathError;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// 書き込み途中のファイルに付ける接尾辞。`.png` で終わらないため入力として拾われない。
const PARTIAL_SUFFIX: &str = ".partial";

/// 変換結果の書き込み先フォルダ。
///
/// `prepare` を通じてのみ作成でき、その時点でフォルダが存在することが保証されます。
#[derive(Debug)]
pub struct OutputDirectory(PathBuf);

impl OutputDirectory {
    /// 出力フォルダを用意します。存在しなければ親フォルダごと作成します。
    ///
    /// すでに存在する場合は何もしないため、繰り返し呼んでも失敗しません。
    pub fn prepare<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();
        if path.exists() && !path.is_dir() {
            return Err(PathError::InvalidPath(format!(
                "output '{}' exists and is not a directory",
                path.display()
            )));
        }
        fs::create_dir_all(path)?;
        Ok(Self(path.to_path_buf()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// 入力と同じファイル名で、出力フォルダ内の書き込み先パスを返します。
    pub fn destination_for(&self, file_name: &OsStr) -> PathBuf {
        self.0.join(file_name)
    }

    /// バイト列を `file_name` として書き込み、書き込んだパスを返します。
    ///
    /// 一時ファイルに書いてからリネームするので、出力先には完全なファイルか、
    /// 以前から存在したファイルのどちらかしか残りません。同名ファイルは上書きされます。
    pub fn write_file(&self, file_name: &OsStr, bytes: &[u8]) -> io::Result<PathBuf> {
        let destination = self.destination_for(file_name);
        let partial = self.0.join(partial_name(file_name));

        fs::write(&partial, bytes)?;
        if let Err(e) = fs::rename(&partial, &destination) {
            // リネームに失敗した一時ファイルは残さない
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
        Ok(destination)
    }
}

fn partial_name(file_name: &OsStr) -> OsString {
    let mut name = OsString::from(".");
    name.push(file_name);
    name.push(PARTIAL_SUFFIX);
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn prepare_creates_missing_parents() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("Processed");

        let output = OutputDirectory::prepare(&nested).expect("prepare should succeed");

        assert!(nested.is_dir());
        assert_eq!(output.as_path(), nested);
    }

    #[test]
    fn prepare_is_idempotent() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");

        OutputDirectory::prepare(&target).unwrap();
        fs::write(target.join("keep.png"), "x").unwrap();
        OutputDirectory::prepare(&target).expect("second prepare should succeed");

        // 既存の中身はそのまま
        assert!(target.join("keep.png").exists());
    }

    #[test]
    fn prepare_rejects_existing_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        fs::write(&file, "x").unwrap();

        match OutputDirectory::prepare(&file) {
            Err(PathError::InvalidPath(msg)) => assert!(msg.contains("is not a directory")),
            other => panic!("予期せぬ結果: {:?}", other),
        }
    }

    #[test]
    fn write_file_overwrites_and_leaves_no_partial() {
        let dir = tempdir().unwrap();
        let output = OutputDirectory::prepare(dir.path()).unwrap();
        let name = OsStr::new("icon.png");

        output.write_file(name, b"first").unwrap();
        let written = output.write_file(name, b"second").unwrap();

        assert_eq!(written, dir.path().join("icon.png"));
        assert_eq!(fs::read(&written).unwrap(), b"second");

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|n| n.to_string_lossy().ends_with(PARTIAL_SUFFIX))
            .collect();
        assert!(leftovers.is_empty(), "一時ファイルが残っています: {:?}", leftovers);
    }

    #[test]
    fn write_file_fails_when_directory_is_gone() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");
        let output = OutputDirectory::prepare(&target).unwrap();
        fs::remove_dir(&target).unwrap();

        let err = output.write_file(OsStr::new("a.png"), b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
