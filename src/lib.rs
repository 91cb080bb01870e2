//! # lsb_vault 库
//!
//! 本库包含口令保护的 LSB 隐写工具的核心逻辑：
//! 像素网格 ([`grid`])、隐写编解码 ([`steganography`])、图像读写 ([`image_io`])
//! 以及命令行交互 ([`cli`], [`handler`])。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod error;
pub mod grid;
pub mod handler;
pub mod image_io;
pub mod logging;
pub mod steganography;

pub use error::{Result, StegoError};
pub use grid::PixelGrid;
pub use steganography::{embed, extract};
