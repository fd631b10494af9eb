//! 转换错误类型

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// 转换过程中的错误
///
/// 结构不完整的指令（反引号分段不足）不属于错误，会被直接跳过。
#[derive(Debug, Error)]
pub enum ConvertError {
    /// 读取源文件或写入目标文件失败
    #[error("文件读写失败 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 数值字段无法解析为整数
    #[error("第 {line} 行 {field} 不是有效整数: {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// 生成的文档未通过结构校验
    #[error("输出文档校验失败: {0}")]
    Verify(String),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ConvertResult<T = ()> = Result<T, ConvertError>;
