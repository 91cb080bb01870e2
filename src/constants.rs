/// 每个像素参与隐写的颜色通道数 (R, G, B)。
/// 每个通道的最低有效位承载 1 bit，因此每个像素可承载 3 bits。
pub const CHANNELS_PER_PIXEL: usize = 3;

/// 每个字节的位数。
pub const BITS_PER_BYTE: usize = 8;

/// 载荷结束标记：紧跟在载荷之后的一个全零字节。
pub const TERMINATOR: u8 = 0x00;

/// 口令与消息之间的分隔符，提取时只按第一次出现切分。
pub const SEPARATOR: u8 = b':';

/// 可编码字符的最大码点。码点 255 无法表示。
pub const MAX_CODE_POINT: u32 = 254;

/// 清除最低有效位的掩码。
pub const LSB_CLEAR_MASK: u8 = 0xFE;

/// 未指定输出路径时，隐写结果图像的文件名前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本的文件名前缀。
pub const RECOVERED_TEXT_PREFIX: &str = "recovered_";

/// 恢复文本文件的默认扩展名。
pub const RECOVERED_TEXT_EXTENSION: &str = "txt";

/// 允许写出的无损格式扩展名。
/// 有损重新压缩会破坏最低有效位，因此不在此列。
pub const LOSSLESS_EXTENSIONS: &[&str] = &["png", "bmp", "tif", "tiff", "webp", "qoi"];

/// 被明确拒绝的有损格式扩展名。
pub const LOSSY_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// 有损格式的源图像在生成默认输出路径时改用的扩展名。
pub const FALLBACK_EXTENSION: &str = "png";

/// 从环境变量读取口令时使用的变量名。
pub const PASSPHRASE_ENV: &str = "LSB_VAULT_PASSPHRASE";
