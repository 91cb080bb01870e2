//! # 错误类型模块
//!
//! [`StegoError`] 覆盖了从图像读写到载荷编解码的全部失败情形。
//! 库中的各层均返回 [`Result`]，由命令处理层统一附加上下文后报告给用户。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    #[error("Image not found: {}", path.display())]
    ImageNotFound { path: PathBuf },

    #[error("The {field} must not be empty")]
    EmptyInput { field: &'static str },

    #[error("Unencodable character in {field} at position {position} (code point {code})")]
    InvalidCharacter {
        field: &'static str,
        position: usize,
        code: u32,
    },

    #[error("Not enough space in the image: required {required} bits, available {available} bits")]
    CapacityExceeded { required: usize, available: usize },

    #[error("No separator found in the hidden data (corrupted data or no hidden message)")]
    NoSeparatorFound,

    #[error("No terminator found (the image carries no valid hidden message)")]
    NoTerminatorFound,

    #[error("Incorrect passphrase")]
    PassphraseMismatch,

    #[error("Pixel data length {actual} does not match a {rows}x{cols} grid")]
    GridShape {
        rows: usize,
        cols: usize,
        actual: usize,
    },

    #[error("Refusing to write lossy format: {}", path.display())]
    LossyFormat { path: PathBuf },

    #[error("Unsupported output format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Output file already exists: {}", path.display())]
    OutputExists { path: PathBuf },

    #[error("Saving canceled")]
    SaveCanceled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(image::ImageError),
}

/// 图像库包装的底层 I/O 失败归入 [`StegoError::Io`]，其余解码/编码失败保留为 [`StegoError::Image`]。
impl From<image::ImageError> for StegoError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => Self::Io(io),
            other => Self::Image(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, StegoError>;
