use std::fmt;
use std::str::FromStr;

// --- 構造体定義 ---

/// リサイズ後の幅と高さ。
///
/// `new` または `FromStr`（`"64x64"` 形式）を通じてのみ作成でき、
/// 幅・高さのどちらも 1 以上 `MAX_SIDE` 以下であることが保証されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    width: u32,
    height: u32,
}

// --- エラー定義 ---

/// `TargetSize` の作成時に発生する可能性のある検証エラー。
#[derive(Debug, PartialEq, Eq)]
pub enum TargetSizeError {
    /// `幅x高さ` の形になっていない。
    Malformed(String),
    /// 幅または高さが 0。
    ZeroDimension,
    /// 幅または高さが `TargetSize::MAX_SIDE` を超えている。
    TooLarge { max: u32 },
}

// --- 実装ブロック ---

impl TargetSize {
    /// 既定のサイズ (64x64)。
    pub const DEFAULT: TargetSize = TargetSize {
        width: 64,
        height: 64,
    };

    /// 1辺の上限。RGB8 で約 768MiB のバッファに収まる大きさ。
    pub const MAX_SIDE: u32 = 16384;

    pub fn new(width: u32, height: u32) -> Result<Self, TargetSizeError> {
        if width == 0 || height == 0 {
            return Err(TargetSizeError::ZeroDimension);
        }
        if width > Self::MAX_SIDE || height > Self::MAX_SIDE {
            return Err(TargetSizeError::TooLarge {
                max: Self::MAX_SIDE,
            });
        }
        Ok(Self { width, height })
    }

    /// (幅, 高さ) をまとめて取得。
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

// --- トレイト実装 ---

impl FromStr for TargetSize {
    type Err = TargetSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TargetSizeError::Malformed(s.to_string());
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(malformed)?;
        let width = w.trim().parse::<u32>().map_err(|_| malformed())?;
        let height = h.trim().parse::<u32>().map_err(|_| malformed())?;
        Self::new(width, height)
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl fmt::Display for TargetSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSizeError::Malformed(s) => {
                write!(f, "'{}' is not a size, expected WIDTHxHEIGHT such as 64x64", s)
            }
            TargetSizeError::ZeroDimension => {
                write!(f, "width and height must both be greater than zero")
            }
            TargetSizeError::TooLarge { max } => {
                write!(f, "width and height must both be at most {}", max)
            }
        }
    }
}

impl std::error::Error for TargetSizeError {}

// --- テストモジュール ---
