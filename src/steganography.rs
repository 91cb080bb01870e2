//! # LSB 隐写编解码模块
//!
//! 载荷格式为 `口令 ":" 消息`，每个字符占 1 字节，之后紧跟一个 `0x00` 结束字节。
//! 每个字节按高位在前的顺序展开为比特流，依次写入像素网格中各通道的最低有效位。
//! 扫描顺序为行优先，像素内部 R → G → B。

use crate::constants::{BITS_PER_BYTE, LSB_CLEAR_MASK, MAX_CODE_POINT, SEPARATOR, TERMINATOR};
use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;
use log::{debug, trace};

/// 按字节边界累积比特。
///
/// 只有在凑满 8 bits 时才交出一个完整字节，调用方只在这些字节边界上判断结束标记，
/// 因此跨越两个字节的连续 8 个零比特不会被误判为结束。
#[derive(Debug, Default, Clone)]
pub struct BitAccumulator {
    current: u8,
    filled: usize,
}

impl BitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个比特 (只取最低位)。凑满一个字节时返回该字节。
    pub fn push(&mut self, bit: u8) -> Option<u8> {
        self.current = (self.current << 1) | (bit & 1);
        self.filled += 1;

        if self.filled < BITS_PER_BYTE {
            return None;
        }

        let byte = self.current;
        self.current = 0;
        self.filled = 0;
        Some(byte)
    }

    /// 当前尚未凑成字节的比特数。
    pub fn pending_bits(&self) -> usize {
        self.filled
    }
}

pub fn modify(bytes: &[u8], pix: &mut [u8]) -> Result<()> {
    let required = bytes.len() * BITS_PER_BYTE;
    if required > pix.len() {
        return Err(StegoError::CapacityExceeded {
            required,
            available: pix.len(),
        });
    }

    let bits = bytes
        .iter()
        .flat_map(|&byte| (0..BITS_PER_BYTE).rev().map(move |shift| (byte >> shift) & 1));

    for (channel, bit) in pix.iter_mut().zip(bits) {
        *channel = (*channel & LSB_CLEAR_MASK) | bit;
    }

    Ok(())
}

pub fn recover(pix: &[u8]) -> Result<Vec<u8>> {
    let mut accumulator = BitAccumulator::new();
    let mut bytes = Vec::new();

    for &channel in pix {
        if let Some(byte) = accumulator.push(channel) {
            if byte == TERMINATOR {
                trace!("Terminator found after {} payload bytes", bytes.len());
                return Ok(bytes);
            }
            bytes.push(byte);
        }
    }

    debug!(
        "No terminator after {} bytes ({} trailing bits)",
        bytes.len(),
        accumulator.pending_bits()
    );
    Err(StegoError::NoTerminatorFound)
}

/// 校验并编码单个文本字段，每个字符映射为一个字节。
///
/// 码点 0 与结束标记无法区分，码点 255 及以上无法表示，二者都视为非法字符。
fn encode_field(field: &'static str, text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(StegoError::EmptyInput { field });
    }

    text.chars()
        .enumerate()
        .map(|(position, ch)| match u8::try_from(ch) {
            Ok(byte) if byte != TERMINATOR && u32::from(byte) <= MAX_CODE_POINT => Ok(byte),
            _ => Err(StegoError::InvalidCharacter {
                field,
                position,
                code: u32::from(ch),
            }),
        })
        .collect()
}

/// 构建 `口令 ":" 消息` 载荷 (不含结束字节)。
///
/// # Errors
///
/// * [`StegoError::EmptyInput`] - 口令或消息为空。
/// * [`StegoError::InvalidCharacter`] - 出现码点 0 或 255 以上的字符，或口令中含有分隔符。
pub fn build_payload(message: &str, passphrase: &str) -> Result<Vec<u8>> {
    let passphrase = encode_field("passphrase", passphrase)?;
    if let Some(position) = passphrase.iter().position(|&b| b == SEPARATOR) {
        return Err(StegoError::InvalidCharacter {
            field: "passphrase",
            position,
            code: u32::from(SEPARATOR),
        });
    }
    let message = encode_field("message", message)?;

    let mut payload = Vec::with_capacity(passphrase.len() + 1 + message.len());
    payload.extend_from_slice(&passphrase);
    payload.push(SEPARATOR);
    payload.extend_from_slice(&message);
    Ok(payload)
}

/// 长度为 `payload_len` 字节的载荷连同结束字节所需的比特数。
pub fn required_bits(payload_len: usize) -> usize {
    (payload_len + 1) * BITS_PER_BYTE
}

/// 在给定口令下，网格最多能容纳的消息字符数。
pub fn max_message_len(grid: &PixelGrid, passphrase: &str) -> usize {
    let byte_slots = grid.capacity_bits() / BITS_PER_BYTE;
    byte_slots.saturating_sub(passphrase.chars().count() + 2)
}

/// 将消息连同口令隐藏到像素网格中。
///
/// 只有在全部校验通过且容量足够时才会写入，失败时网格保持不变。
///
/// # Errors
///
/// * [`StegoError::EmptyInput`] / [`StegoError::InvalidCharacter`] - 见 [`build_payload`]。
/// * [`StegoError::CapacityExceeded`] - 比特流长度超过 `rows * cols * 3`。
pub fn embed(grid: &mut PixelGrid, message: &str, passphrase: &str) -> Result<()> {
    let mut payload = build_payload(message, passphrase)?;
    let required = required_bits(payload.len());
    let available = grid.capacity_bits();

    debug!(
        "Embedding {} payload bytes ({} bits) into a {}x{} grid ({} bits available)",
        payload.len(),
        required,
        grid.rows(),
        grid.cols(),
        available
    );

    if required > available {
        return Err(StegoError::CapacityExceeded {
            required,
            available,
        });
    }

    payload.push(TERMINATOR);
    modify(&payload, grid.channels_mut())
}

/// 从像素网格中提取消息，并校验口令。
///
/// # Errors
///
/// * [`StegoError::EmptyInput`] - 提供的口令为空。
/// * [`StegoError::NoTerminatorFound`] - 扫描完整个网格仍未在字节边界上遇到结束字节。
/// * [`StegoError::InvalidCharacter`] - 解出的字节中含有无法表示的值 255。
/// * [`StegoError::NoSeparatorFound`] - 解出的数据中没有分隔符。
/// * [`StegoError::PassphraseMismatch`] - 存储的口令与提供的口令不一致。
pub fn extract(grid: &PixelGrid, passphrase: &str) -> Result<String> {
    if passphrase.is_empty() {
        return Err(StegoError::EmptyInput {
            field: "passphrase",
        });
    }

    let payload = recover(grid.channels())?;
    debug!("Recovered {} payload bytes", payload.len());

    let decoded = payload
        .iter()
        .enumerate()
        .map(|(position, &byte)| {
            if u32::from(byte) > MAX_CODE_POINT {
                return Err(StegoError::InvalidCharacter {
                    field: "payload",
                    position,
                    code: u32::from(byte),
                });
            }
            Ok(char::from(byte))
        })
        .collect::<Result<String>>()?;

    let (stored_passphrase, message) = decoded
        .split_once(char::from(SEPARATOR))
        .ok_or(StegoError::NoSeparatorFound)?;

    if stored_passphrase != passphrase {
        return Err(StegoError::PassphraseMismatch);
    }

    Ok(message.to_string())
}
