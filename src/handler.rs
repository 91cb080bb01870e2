//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::BITS_PER_BYTE;
use crate::error::StegoError;
use crate::image_io;
use crate::steganography::{embed, extract, max_message_len};
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs;

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和文本、检查输出路径、调用隐写核心函数写入口令与消息，
/// 最后将结果保存为无损格式的图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和口令的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 输出路径已存在 (且未指定 `--force`) 或不是无损格式。
/// * 消息或口令为空，或含有无法编码的字符。
/// * 图像没有足够的空间来隐藏文本。
/// * 无法写入到目标图像文件。
///
/// 用户取消保存 (空的输出路径) 不视为错误，只打印提示。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let mut grid = image_io::load(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let message = match (args.message, &args.text) {
        (Some(message), _) => message,
        (None, Some(path)) => fs::read_to_string(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("Either a message or a text file is required."),
    };

    let dest = args
        .dest
        .unwrap_or_else(|| image_io::default_hidden_path(&args.image));

    if !dest.as_os_str().is_empty() {
        image_io::check_output_format(&dest)?;
        image_io::ensure_writable(&dest, args.force)?;
    }

    if let Err(err) = embed(&mut grid, &message, &args.passphrase) {
        let context = match &err {
            StegoError::CapacityExceeded {
                required,
                available,
            } => format!(
                "Not enough space in the image to hide the text. \nRequired: {} bits, Available: {} bits",
                required.to_string().red().bold(),
                available.to_string().green().bold()
            ),
            _ => "Failed to hide the message in the image.".to_string(),
        };
        return Err(err).context(context);
    }
    info!(
        "Message of {} characters embedded into {}",
        message.chars().count(),
        args.image.display()
    );

    match image_io::save(grid, &dest) {
        Ok(()) => {}
        Err(StegoError::SaveCanceled) => {
            println!("{}", "Saving canceled.".yellow().bold());
            return Ok(());
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!(
                    "Unable to write to target image file: {}",
                    dest.to_string_lossy().red().bold()
                )
            });
        }
    }

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用恢复核心函数校验口令并取出消息，
/// 最后将消息写入目标文本文件或直接打印。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和口令的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中没有有效的隐藏数据，或口令不正确。
/// * 目标文本文件已存在 (且未指定 `--force`) 或无法写入。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let grid = image_io::load(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let message = extract(&grid, &args.passphrase).with_context(|| {
        format!(
            "Failed to recover the hidden message from '{}'.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    info!(
        "Recovered {} characters from {}",
        message.chars().count(),
        args.image.display()
    );

    if args.stdout {
        println!("{message}");
        return Ok(());
    }

    let text_path = args
        .text
        .unwrap_or_else(|| image_io::default_recovered_path(&args.image));
    image_io::ensure_writable(&text_path, args.force)?;

    fs::write(&text_path, message).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            text_path.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        text_path.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑：报告图像的隐写容量。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let grid = image_io::load(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let bits = grid.capacity_bits();
    println!(
        "Image: {} ({}x{} pixels)",
        args.image.to_string_lossy().green().bold(),
        grid.cols(),
        grid.rows()
    );
    println!("Capacity: {} bits", bits.to_string().green().bold());

    match args.passphrase {
        Some(passphrase) => println!(
            "Longest message with this passphrase: {} characters",
            max_message_len(&grid, &passphrase).to_string().green().bold()
        ),
        None => println!(
            "Payload space (passphrase + ':' + message): {} characters",
            (bits / BITS_PER_BYTE)
                .saturating_sub(1)
                .to_string()
                .green()
                .bold()
        ),
    }

    Ok(())
}
