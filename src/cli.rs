use clap::Parser;
use png_normalizer::domain::target_size::TargetSize;
use png_normalizer::workflow::{default_output_dir, BatchSettings};
use std::path::PathBuf;

/// フォルダ内のPNG画像をRGBに揃え、指定サイズにリサイズして書き出すツール
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 変換対象のPNGファイルが置かれているフォルダのパス (サブフォルダは走査しない)
    #[arg(required = true)]
    pub input_dir: PathBuf,

    /// 変換結果の出力先フォルダのパス (オプション: デフォルトは入力フォルダ内の Processed)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// リサイズ後のサイズ (幅x高さ)
    #[arg(short, long, default_value_t = TargetSize::DEFAULT)]
    pub size: TargetSize,

    /// リサイズを行わず、RGB化と再エンコードだけを行う
    #[arg(long, conflicts_with = "size")]
    pub no_resize: bool,
}

impl Args {
    /// コマンドライン引数をワークフローの設定に変換します。
    pub fn into_settings(self) -> BatchSettings {
        let output_dir = self
            .output_dir
            .unwrap_or_else(|| default_output_dir(&self.input_dir));
        BatchSettings {
            input_dir: self.input_dir,
            output_dir,
            target_size: (!self.no_resize).then_some(self.size),
        }
    }
}
