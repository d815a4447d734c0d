// use宣言：必要なクレートやモジュールをスコープに取り込む

use super::target_size::TargetSize;
use crate::error::ProcessError;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

// --- 構造体定義 ---

/// 1ファイル分のデコード済み画像。
///
/// 1回のループの間だけ保持され、出力の書き込み（またはエラーの記録）が終わった時点で破棄されます。
/// ファイルをまたいで共有・キャッシュされることはありません。
#[derive(Debug)]
pub struct ImageRecord {
    image: DynamicImage,
}

// --- 実装ブロック ---

impl ImageRecord {
    /// ファイルを開いて画像としてデコードします。
    ///
    /// フォーマットは中身のマジックバイトから推定し、判別できなければ拡張子に従います。
    pub fn open(path: &Path) -> Result<Self, ProcessError> {
        let image = ImageReader::open(path)
            .map_err(ProcessError::Open)?
            .with_guessed_format()
            .map_err(ProcessError::Open)?
            .decode()
            .map_err(ProcessError::Decode)?;
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "image decoded"
        );
        Ok(Self { image })
    }

    #[cfg(test)]
    fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // --- 便利メソッド ---

    pub fn color_type(&self) -> ColorType {
        self.image.color()
    }

    /// 8bit の3チャンネルRGBかどうか。
    pub fn is_rgb(&self) -> bool {
        matches!(self.image, DynamicImage::ImageRgb8(_))
    }

    /// (幅, 高さ) をまとめて取得。
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    // --- 変換ステップ ---

    /// 8bit RGB に変換します。すでに RGB ならそのまま返します。
    ///
    /// 不可逆な変換で、アルファチャンネルは合成せずに捨てられます。
    pub fn into_rgb(self) -> Self {
        if self.is_rgb() {
            return self;
        }
        Self {
            image: DynamicImage::ImageRgb8(self.image.to_rgb8()),
        }
    }

    /// アスペクト比を無視して、ちょうど `size` の大きさに Lanczos3 でリサイズします。
    pub fn resize_exact(self, size: TargetSize) -> Self {
        let (width, height) = size.dimensions();
        Self {
            image: self.image.resize_exact(width, height, FilterType::Lanczos3),
        }
    }

    /// PNG としてエンコードしたバイト列を返します。
    pub fn encode_png(&self) -> Result<Vec<u8>, ProcessError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(ProcessError::Encode)?;
        Ok(bytes)
    }
}

// --- テストモジュール ---

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    // --- テスト用ヘルパー関数 ---
    fn gray(width: u32, height: u32, value: u8) -> ImageRecord {
        ImageRecord::from_dynamic(DynamicImage::ImageLuma8(GrayImage::from_pixel(
            width,
            height,
            Luma([value]),
        )))
    }

    #[test]
    fn open_decodes_png_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tile.png");
        RgbaImage::from_pixel(12, 7, Rgba([1, 2, 3, 4]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let record = ImageRecord::open(&path).expect("open should succeed");
        assert_eq!(record.dimensions(), (12, 7));
        assert_eq!(record.color_type(), ColorType::Rgba8);
        assert!(!record.is_rgb());
    }

    #[test]
    fn open_reports_decode_error_for_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"this is not an image").unwrap();

        let err = ImageRecord::open(&path).unwrap_err();
        assert!(matches!(err, ProcessError::Decode(_)), "got {:?}", err);
    }

    #[test]
    fn open_reports_open_error_for_missing_file() {
        let dir = tempdir().unwrap();
        let err = ImageRecord::open(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, ProcessError::Open(_)), "got {:?}", err);
    }

    #[test]
    fn into_rgb_converts_grayscale() {
        let record = gray(4, 4, 200).into_rgb();
        assert!(record.is_rgb());
        assert_eq!(record.color_type(), ColorType::Rgb8);
        assert_eq!(record.dimensions(), (4, 4));
    }

    /// アルファは合成されずに単純に捨てられる
    #[test]
    fn into_rgb_drops_alpha_without_compositing() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0]));
        let record = ImageRecord::from_dynamic(DynamicImage::ImageRgba8(rgba)).into_rgb();

        let DynamicImage::ImageRgb8(rgb) = &record.image else {
            panic!("RGB8 になっていません: {:?}", record.color_type());
        };
        assert_eq!(rgb.get_pixel(1, 1), &Rgb([10, 20, 30]));
    }

    /// 16bit RGB も 8bit RGB に揃える
    #[test]
    fn into_rgb_narrows_sixteen_bit_rgb() {
        let wide: ImageBuffer<Rgb<u16>, Vec<u16>> = ImageBuffer::from_pixel(3, 3, Rgb([65535, 0, 0]));
        let record = ImageRecord::from_dynamic(DynamicImage::ImageRgb16(wide));
        assert!(!record.is_rgb());

        let record = record.into_rgb();
        assert!(record.is_rgb());
    }

    #[test]
    fn resize_exact_ignores_aspect_ratio() {
        let size = TargetSize::new(64, 64).unwrap();
        let record = gray(128, 32, 0).into_rgb().resize_exact(size);

        assert_eq!(record.dimensions(), (64, 64));
        assert!(record.is_rgb());
    }

    #[test]
    fn resize_exact_can_upscale() {
        let size = TargetSize::new(50, 10).unwrap();
        let record = gray(5, 5, 0).resize_exact(size);
        assert_eq!(record.dimensions(), (50, 10));
    }

    #[test]
    fn encode_png_produces_rgb_png() {
        let bytes = gray(8, 8, 90).into_rgb().encode_png().unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb8);
        assert_eq!(decoded.dimensions(), (8, 8));
    }
}
