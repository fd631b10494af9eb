//! INI 规则转换模块
//! 对外提供解析、渲染和文件转换接口

mod emitter;
mod error;
mod parser;
mod types;

pub use emitter::{render, verify_document};
pub use error::{ConvertError, ConvertResult};
pub use parser::{
    DirectiveParser, ParseOptions, SelectToken, classify_select_token, parse_lines, parse_str,
    provider_name_from_url,
};
pub use types::{ClashDocument, ConversionStats, GroupType, ProxyGroup, Rule, RuleProvider};

use log::info;
use std::fs;
use std::path::Path;

/// 将 INI 文本转换为 Clash 片段文本
pub fn convert_str(input: &str, options: ParseOptions) -> ConvertResult<String> {
    let verify = options.verify_output;
    let document = parse_str(input, options)?;
    render_checked(&document, verify)
}

fn render_checked(document: &ClashDocument, verify: bool) -> ConvertResult<String> {
    let text = render(document);
    if verify {
        verify_document(&text)?;
    }
    Ok(text)
}

/// 读取源文件、解析并写出目标文件
///
/// 源文件在解析前被完整读入内存；目标文件一次性写出，失败时不保证其内容。
/// 开启 `verify_output` 时，校验失败不会写出目标文件。
pub fn convert_file<P, Q>(
    input: P,
    output: Q,
    options: ParseOptions,
) -> ConvertResult<ConversionStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();

    let content = fs::read_to_string(input).map_err(|e| ConvertError::io(input, e))?;
    let verify = options.verify_output;
    let document = parse_str(&content, options)?;
    let stats = document.stats();

    let text = render_checked(&document, verify)?;
    fs::write(output, text).map_err(|e| ConvertError::io(output, e))?;
    info!(
        "已转换 {} -> {}: {} 个代理组, {} 个规则提供者, {} 条规则",
        input.display(),
        output.display(),
        stats.proxy_groups,
        stats.rule_providers,
        stats.rules
    );

    Ok(stats)
}
