//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::PASSPHRASE_ENV;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用口令保护隐藏在无损格式图像中的文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，在无损格式图像 (如 PNG, BMP) 中隐藏文本，并只在提供正确口令时恢复。"
)]
pub struct Cli {
    /// 输出更详细的日志 (可重复：-v, -vv, -vvv)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 中隐藏一段受口令保护的文本。
    Hide(HideArgs),

    /// 使用口令从经过隐写的图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 查看图像可隐藏的容量。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["message", "text"])))]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP, JPEG)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本 (与 --text 二选一)。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 要隐藏的文本内容的文件路径 (与 --message 二选一)。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 口令，恢复时必须提供相同的口令。
    #[arg(short, long, env = PASSPHRASE_ENV, hide_env_values = true)]
    pub passphrase: String,

    /// 结果图像的输出路径。默认为源图像同目录下的 `doctored_<文件名>`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 隐藏时使用的口令。
    #[arg(short, long, env = PASSPHRASE_ENV, hide_env_values = true)]
    pub passphrase: String,

    /// 保存恢复文本的路径。默认为图像同目录下的 `recovered_<文件名>.txt`。
    #[arg(short, long, conflicts_with = "stdout")]
    pub text: Option<PathBuf>,

    /// 将恢复的文本直接打印到标准输出，而不写入文件。
    #[arg(long)]
    pub stdout: bool,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要查看容量的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 计划使用的口令，用于计算可容纳的最长消息。
    #[arg(short, long, env = PASSPHRASE_ENV, hide_env_values = true)]
    pub passphrase: Option<String>,
}
