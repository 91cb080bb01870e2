//! # 像素网格模块
//!
//! [`PixelGrid`] 是隐写编解码器唯一依赖的数据结构：`rows × cols` 个像素，
//! 每个像素按 R, G, B 顺序保存 3 个 8 位通道值。
//!
//! 通道值以行优先顺序平铺存储 (第 0 行在前，列号递增，像素内部 R → G → B)，
//! 因此顺序遍历 `channels` 即为隐写的扫描顺序。

use crate::constants::CHANNELS_PER_PIXEL;
use crate::error::{Result, StegoError};
use image::{DynamicImage, Rgba, RgbImage, RgbaImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    rows: usize,
    cols: usize,
    channels: Vec<u8>,
    /// 源图像的透明通道 (如有)，编解码器从不读写它，保存时原样写回。
    alpha: Option<Vec<u8>>,
}

impl PixelGrid {
    /// 创建一个所有通道值均为 0 的网格。
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            channels: vec![0; rows * cols * CHANNELS_PER_PIXEL],
            alpha: None,
        }
    }

    /// 由行优先的 RGB 通道数据构建网格。
    ///
    /// # Errors
    ///
    /// 如果 `channels` 的长度不等于 `rows * cols * 3`，返回 [`StegoError::GridShape`]。
    pub fn from_channels(rows: usize, cols: usize, channels: Vec<u8>) -> Result<Self> {
        if channels.len() != rows * cols * CHANNELS_PER_PIXEL {
            return Err(StegoError::GridShape {
                rows,
                cols,
                actual: channels.len(),
            });
        }

        Ok(Self {
            rows,
            cols,
            channels,
            alpha: None,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channels(&self) -> &[u8] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut [u8] {
        &mut self.channels
    }

    /// 可写入的总位数：每个通道 1 bit。
    pub fn capacity_bits(&self) -> usize {
        self.channels.len()
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// 将解码后的图像转换为网格。带透明通道的图像会保留其 alpha 平面。
    pub fn from_image(image: DynamicImage) -> Self {
        let rows = image.height() as usize;
        let cols = image.width() as usize;

        if image.color().has_alpha() {
            let rgba = image.into_rgba8();
            let mut channels = Vec::with_capacity(rows * cols * CHANNELS_PER_PIXEL);
            let mut alpha = Vec::with_capacity(rows * cols);
            for &Rgba([r, g, b, a]) in rgba.pixels() {
                channels.extend_from_slice(&[r, g, b]);
                alpha.push(a);
            }
            Self {
                rows,
                cols,
                channels,
                alpha: Some(alpha),
            }
        } else {
            Self {
                rows,
                cols,
                channels: image.into_rgb8().into_raw(),
                alpha: None,
            }
        }
    }

    /// 将网格转换回图像，供图像保存使用。
    ///
    /// # Errors
    ///
    /// 如果网格尺寸超出图像所能表示的范围，返回 [`StegoError::GridShape`]。
    pub fn into_image(self) -> Result<DynamicImage> {
        let shape_error = StegoError::GridShape {
            rows: self.rows,
            cols: self.cols,
            actual: self.channels.len(),
        };
        let (Ok(width), Ok(height)) = (u32::try_from(self.cols), u32::try_from(self.rows)) else {
            return Err(shape_error);
        };

        let image = match self.alpha {
            Some(alpha) => {
                let raw: Vec<u8> = self
                    .channels
                    .chunks_exact(CHANNELS_PER_PIXEL)
                    .zip(alpha)
                    .flat_map(|(rgb, a)| [rgb[0], rgb[1], rgb[2], a])
                    .collect();
                RgbaImage::from_raw(width, height, raw).map(DynamicImage::ImageRgba8)
            }
            None => RgbImage::from_raw(width, height, self.channels).map(DynamicImage::ImageRgb8),
        };

        image.ok_or(shape_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[test]
    fn from_channels_rejects_wrong_length() {
        let result = PixelGrid::from_channels(2, 2, vec![0; 11]);
        assert!(matches!(
            result,
            Err(StegoError::GridShape {
                rows: 2,
                cols: 2,
                actual: 11
            })
        ));
    }

    #[test]
    fn pixels_are_row_major_rgb() {
        let channels: Vec<u8> = (0..18).collect();
        let grid = PixelGrid::from_channels(2, 3, channels).unwrap();

        let pixels: Vec<&[u8]> = grid.channels().chunks_exact(3).collect();
        assert_eq!(pixels[0], [0, 1, 2]);
        assert_eq!(pixels[2], [6, 7, 8]);
        assert_eq!(pixels[3], [9, 10, 11]);
        assert_eq!(grid.capacity_bits(), 18);
    }

    #[test]
    fn image_conversion_keeps_dimensions_and_values() {
        let img = ImageBuffer::from_fn(4, 2, |x, y| Rgb([x as u8, y as u8, 200]));
        let grid = PixelGrid::from_image(DynamicImage::ImageRgb8(img.clone()));

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 4);
        // 第 1 行第 3 列 => 像素下标 1 * 4 + 3
        assert_eq!(grid.channels()[21..24], [3, 1, 200]);
        assert!(!grid.has_alpha());

        let back = grid.into_image().unwrap();
        assert_eq!(back.to_rgb8(), img);
    }

    #[test]
    fn alpha_plane_survives_round_trip() {
        let img = ImageBuffer::from_fn(3, 3, |x, y| Rgba([x as u8, y as u8, 7, (x * 10 + y) as u8]));
        let grid = PixelGrid::from_image(DynamicImage::ImageRgba8(img.clone()));

        assert!(grid.has_alpha());
        assert_eq!(grid.capacity_bits(), 27);

        let back = grid.into_image().unwrap();
        assert_eq!(back.to_rgba8(), img);
    }
}
