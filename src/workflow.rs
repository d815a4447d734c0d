//! アプリケーションのメインワークフローを定義するモジュール。
//!
//! このモジュールは、UI層（`cli`）とドメイン層（`domain`）を仲介し、
//! PNG一括変換（RGB化 → リサイズ → PNG再エンコード）の処理フローを実装します。

use crate::domain::image_record::ImageRecord;
use crate::domain::paths::directory_path::{DirectoryPath, PngCandidate};
use crate::domain::paths::output_directory::OutputDirectory;
use crate::domain::target_size::TargetSize;
use crate::error::{AppError, FileError, ProcessError};
use crate::report::StatusReporter;
use std::io::Write;
use std::path::{Path, PathBuf};

/// 1回のバッチ実行の設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// `None` ならリサイズせず、RGB化と再エンコードだけを行う。
    pub target_size: Option<TargetSize>,
}

/// 1ファイルの処理結果。成功時は書き込んだパス、失敗時はその原因。
#[derive(Debug)]
pub struct FileOutcome {
    file_name: String,
    result: Result<PathBuf, FileError>,
}

impl FileOutcome {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn result(&self) -> &Result<PathBuf, FileError> {
        &self.result
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// バッチ全体の結果。処理した順にファイルごとの結果を保持する。
#[derive(Debug, Default)]
pub struct BatchOutcome {
    files: Vec<FileOutcome>,
}

impl BatchOutcome {
    pub fn files(&self) -> &[FileOutcome] {
        &self.files
    }

    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.succeeded()
    }

    /// 失敗したファイルのエラーだけを順に返す。
    pub fn failures(&self) -> impl Iterator<Item = &FileError> {
        self.files.iter().filter_map(|f| f.result.as_ref().err())
    }
}

// --- public な main 関数 ---

/// アプリケーションのメインロジックを実行します。
///
/// # 引数
/// * `settings`: 入出力フォルダとリサイズ設定。
/// * `reporter`: 進捗表示の出力先。
///
/// # 戻り値
/// * `Ok(BatchOutcome)`: バッチが最後まで走った場合。個々のファイルの失敗はここに含まれる。
/// * `Err(AppError)`: 入力フォルダが無い、出力フォルダを作れないなど、1ファイルも処理できない場合。
pub fn run<W: Write>(
    settings: &BatchSettings,
    reporter: &mut StatusReporter<W>,
) -> Result<BatchOutcome, AppError> {
    // 1. 入力ディレクトリの検証
    // DirectoryPath::new を使うことで、パスが存在し、かつディレクトリであることが保証される。
    let input_dir = DirectoryPath::new(&settings.input_dir).map_err(AppError::Input)?;

    // 2. 出力ディレクトリの準備（無ければ親ごと作成）
    let output_dir = OutputDirectory::prepare(&settings.output_dir).map_err(AppError::Output)?;

    // 3. 処理対象のPNGを列挙
    let candidates = input_dir.png_files().map_err(AppError::Input)?;
    tracing::info!(
        input = %input_dir,
        output = %output_dir.as_path().display(),
        files = candidates.len(),
        target_size = ?settings.target_size,
        "starting batch"
    );

    // 4. 1ファイルずつ処理する
    let mut outcome = BatchOutcome::default();
    for candidate in &candidates {
        let file_name = candidate.display_name();
        let result = process_file(candidate, &output_dir, settings.target_size, reporter);

        // 特定のファイルの処理に失敗しても、バッチ全体は止めずに次のファイルへ進む。
        match &result {
            Ok(destination) => reporter.success(&file_name, destination),
            Err(e) => reporter.failure(e),
        }
        outcome.files.push(FileOutcome { file_name, result });
    }

    reporter.finished();
    tracing::info!(
        succeeded = outcome.succeeded(),
        failed = outcome.failed(),
        "batch finished"
    );
    Ok(outcome)
}

// --- private なヘルパー関数 ---

/// 1ファイルを読み込み、RGB化・リサイズしてから出力フォルダへ書き込みます。
fn process_file<W: Write>(
    candidate: &PngCandidate,
    output_dir: &OutputDirectory,
    target_size: Option<TargetSize>,
    reporter: &mut StatusReporter<W>,
) -> Result<PathBuf, FileError> {
    let name = candidate.display_name();
    let fail = |cause: ProcessError| FileError::new(name.as_str(), cause);

    let mut record = ImageRecord::open(candidate.path()).map_err(fail)?;
    tracing::debug!(
        file = %name,
        color = ?record.color_type(),
        dimensions = ?record.dimensions(),
        "processing"
    );

    if !record.is_rgb() {
        reporter.converting(&name);
        record = record.into_rgb();
    }

    if let Some(size) = target_size {
        reporter.resizing(&name, size);
        record = record.resize_exact(size);
    }

    let bytes = record.encode_png().map_err(fail)?;
    // デコード済み画像は書き込み前に手放す
    drop(record);

    write_output(output_dir, candidate, &bytes).map_err(fail)
}

fn write_output(
    output_dir: &OutputDirectory,
    candidate: &PngCandidate,
    bytes: &[u8],
) -> Result<PathBuf, ProcessError> {
    let destination = output_dir
        .write_file(candidate.file_name(), bytes)
        .map_err(ProcessError::Write)?;
    tracing::debug!(
        source = %candidate.path().display(),
        destination = %destination.display(),
        bytes = bytes.len(),
        "output written"
    );
    Ok(destination)
}

/// 出力フォルダが指定されなかったときの既定値（入力フォルダ直下の `Processed`）。
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    input_dir.join("Processed")
}
