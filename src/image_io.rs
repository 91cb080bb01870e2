//! # 图像读写模块
//!
//! 负责在磁盘上的图像文件与 [`PixelGrid`] 之间转换，并决定输出文件的路径与格式。
//! 隐写编解码器本身不接触文件系统。

use crate::constants::{
    FALLBACK_EXTENSION, HIDDEN_IMAGE_PREFIX, LOSSLESS_EXTENSIONS, LOSSY_EXTENSIONS,
    RECOVERED_TEXT_EXTENSION, RECOVERED_TEXT_PREFIX,
};
use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// 读取图像文件并转换为像素网格。
///
/// # Errors
///
/// * [`StegoError::ImageNotFound`] - 路径不存在。
/// * [`StegoError::Io`] - 读取文件时发生 I/O 错误。
/// * [`StegoError::Image`] - 文件无法被解码为图像。
pub fn load(path: &Path) -> Result<PixelGrid> {
    if !path.is_file() {
        return Err(StegoError::ImageNotFound {
            path: path.to_path_buf(),
        });
    }

    let image = image::open(path)?;
    debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    let grid = PixelGrid::from_image(image);
    if grid.has_alpha() {
        debug!("Alpha plane of {} is carried through unchanged", path.display());
    }

    Ok(grid)
}

/// 将像素网格保存为图像文件，格式由扩展名决定。
///
/// 空路径等同于用户取消了保存，返回 [`StegoError::SaveCanceled`]。
/// 写盘失败 (如目录不存在) 返回 [`StegoError::Io`]。
pub fn save(grid: PixelGrid, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(StegoError::SaveCanceled);
    }

    check_output_format(path)?;
    grid.into_image()?.save(path)?;
    info!("Saved image to {}", path.display());

    Ok(())
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// 检查输出路径的扩展名是否为允许写出的无损格式。
pub fn check_output_format(path: &Path) -> Result<()> {
    match extension_of(path) {
        Some(ext) if LOSSLESS_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        Some(ext) if LOSSY_EXTENSIONS.contains(&ext.as_str()) => Err(StegoError::LossyFormat {
            path: path.to_path_buf(),
        }),
        _ => Err(StegoError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// 覆盖保护：目标已存在且未指定 `force` 时拒绝写入。
pub fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(StegoError::OutputExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn file_stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 默认的隐写结果路径：与源图像同目录，文件名加 `doctored_` 前缀。
/// 源图像为有损或未知格式时改用 PNG。
pub fn default_hidden_path(image: &Path) -> PathBuf {
    let ext = extension_of(image)
        .filter(|ext| LOSSLESS_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());

    image.with_file_name(format!(
        "{HIDDEN_IMAGE_PREFIX}{}.{ext}",
        file_stem_of(image)
    ))
}

/// 默认的恢复文本路径：与图像同目录，`recovered_<文件名>.txt`。
pub fn default_recovered_path(image: &Path) -> PathBuf {
    image.with_file_name(format!(
        "{RECOVERED_TEXT_PREFIX}{}.{RECOVERED_TEXT_EXTENSION}",
        file_stem_of(image)
    ))
}
