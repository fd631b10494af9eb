//! INI 指令解析
//! 识别 `ruleset=` 与 `custom_proxy_group=` 两类指令，生成代理组、规则提供者和规则

use super::error::{ConvertError, ConvertResult};
use super::types::{ClashDocument, GroupType, ProxyGroup, Rule, RuleProvider};
use log::{debug, trace};

const COMMENT_MARKER: char = ';';
const RULESET_PREFIX: &str = "ruleset=";
const PROXY_GROUP_PREFIX: &str = "custom_proxy_group=";

/// 兜底规则的特殊地址
const FINAL_MARKER: &str = "[]FINAL";
/// 代理/子组引用标记
const REFERENCE_MARKER: &str = "[]";
const WILDCARD: &str = ".*";
const DEFAULT_EXTENSION: &str = ".list";

/// 解析参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// 规则集本地缓存目录
    pub ruleset_dir: String,
    /// 规则提供者更新间隔（秒）
    pub provider_interval: u64,
    /// url-test 组未写间隔时的默认值（秒）
    pub default_test_interval: i64,
    /// 写出前用 YAML 解析器校验输出
    pub verify_output: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ruleset_dir: "./ruleset".to_string(),
            provider_interval: 86400,
            default_test_interval: 300,
            verify_output: false,
        }
    }
}

/// select 组中单个分段的分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectToken {
    /// `.*`，包含全部节点
    Wildcard,
    /// `[]Name`，去掉标记后的名称（可能为空）
    GroupReference(String),
    /// 含括号的正则过滤
    RegexFilter(String),
    /// 其他内容一律视为代理名（可能为空）
    BareName(String),
}

/// 对 select 组的分段进行分类，按通配、引用、正则、裸名的顺序判定
pub fn classify_select_token(token: &str) -> SelectToken {
    if token == WILDCARD {
        SelectToken::Wildcard
    } else if token.contains(REFERENCE_MARKER) {
        SelectToken::GroupReference(token.replace(REFERENCE_MARKER, "").trim().to_string())
    } else if token.contains('(') && token.contains(')') {
        SelectToken::RegexFilter(token.to_string())
    } else {
        SelectToken::BareName(token.trim().to_string())
    }
}

/// 从规则集地址推导提供者名称和本地文件扩展名
///
/// 名称取最后一个 `/` 之后的文件名，去掉结尾的 `.list` 或 `.txt`；
/// 扩展名取文件名最后一个 `.` 之后的部分，没有时使用 `.list`。
pub fn provider_name_from_url(url: &str) -> (String, String) {
    let filename = url.rsplit('/').next().unwrap_or(url);

    let name = filename
        .strip_suffix(".list")
        .or_else(|| filename.strip_suffix(".txt"))
        .unwrap_or(filename);

    let extension = match filename.rsplit_once('.') {
        Some((_, ext)) => format!(".{}", ext),
        None => DEFAULT_EXTENSION.to_string(),
    };

    (name.to_string(), extension)
}

/// 逐行解析指令的状态机
#[derive(Debug, Default)]
pub struct DirectiveParser {
    options: ParseOptions,
    document: ClashDocument,
}

impl DirectiveParser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            document: ClashDocument::default(),
        }
    }

    /// 解析单行，`line_no` 从 1 开始，仅用于错误信息
    pub fn parse_line(&mut self, line_no: usize, raw: &str) -> ConvertResult<()> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            return Ok(());
        }

        if let Some(content) = line.strip_prefix(RULESET_PREFIX) {
            self.parse_ruleset(line_no, content);
            Ok(())
        } else if let Some(content) = line.strip_prefix(PROXY_GROUP_PREFIX) {
            self.parse_proxy_group(line_no, content)
        } else {
            trace!("第 {} 行不是可识别的指令，跳过", line_no);
            Ok(())
        }
    }

    pub fn finish(self) -> ClashDocument {
        self.document
    }

    // ruleset=Group,URL
    fn parse_ruleset(&mut self, line_no: usize, content: &str) {
        let Some((group, url)) = content.split_once(',') else {
            debug!("第 {} 行 ruleset 缺少地址，跳过", line_no);
            return;
        };
        let group = group.trim();
        let url = url.trim();

        if url == FINAL_MARKER {
            self.document.rules.push(Rule::Match {
                target: group.replace(REFERENCE_MARKER, ""),
            });
            return;
        }

        let (mut provider_name, extension) = provider_name_from_url(url);

        let providers = &mut self.document.rule_providers;
        if let Some(existing) = providers.get(&provider_name) {
            if existing.url != url {
                // 后缀取冲突发生时映射的大小
                let renamed = format!("{}_{}", provider_name, providers.len());
                debug!(
                    "规则提供者 {} 地址冲突，重命名为 {}",
                    provider_name, renamed
                );
                provider_name = renamed;
            }
        }

        let path = format!(
            "{}/{}{}",
            self.options.ruleset_dir.trim_end_matches('/'),
            provider_name,
            extension
        );
        providers.insert(
            provider_name.clone(),
            RuleProvider::new(url.to_string(), path, self.options.provider_interval),
        );

        self.document.rules.push(Rule::RuleSet {
            provider: provider_name,
            group: group.to_string(),
        });
    }

    // custom_proxy_group=Name`Type`Content`URL`Interval
    fn parse_proxy_group(&mut self, line_no: usize, content: &str) -> ConvertResult<()> {
        let parts: Vec<&str> = content.split('`').collect();
        if parts.len() < 3 {
            debug!("第 {} 行代理组分段不足，跳过", line_no);
            return Ok(());
        }

        let group_type = GroupType::parse(parts[1]);
        let mut group = ProxyGroup::new(parts[0].to_string(), group_type);

        match group.group_type {
            GroupType::Select => fill_select_group(&mut group, &parts[2..]),
            GroupType::UrlTest => {
                self.fill_url_test_group(&mut group, line_no, &parts)?;
            }
            GroupType::Other(_) => {}
        }

        self.document.proxy_groups.push(group);
        Ok(())
    }

    fn fill_url_test_group(
        &self,
        group: &mut ProxyGroup,
        line_no: usize,
        parts: &[&str],
    ) -> ConvertResult<()> {
        let filter = parts[2];

        if let Some(url) = parts.get(3) {
            group.url = Some(url.to_string());
        }

        // interval[,,tolerance]
        if let Some(timing) = parts.get(4) {
            let segments: Vec<&str> = timing.split(',').collect();
            let interval = segments.first().copied().unwrap_or("");
            group.interval = Some(if interval.is_empty() {
                self.options.default_test_interval
            } else {
                parse_number(line_no, "interval", interval)?
            });

            if let Some(tolerance) = segments.get(2).filter(|s| !s.is_empty()) {
                group.tolerance = Some(parse_number(line_no, "tolerance", tolerance)?);
            }
        }

        // url-test 组始终包含全部节点，过滤条件另行记录
        group.include_all = Some(true);
        if filter != WILDCARD {
            group.filter = Some(filter.to_string());
        }

        Ok(())
    }
}

fn fill_select_group(group: &mut ProxyGroup, tokens: &[&str]) {
    let mut proxies = Vec::new();
    let mut include_all = false;
    let mut filter = None;

    for token in tokens {
        match classify_select_token(token) {
            SelectToken::Wildcard => include_all = true,
            SelectToken::RegexFilter(expr) => {
                include_all = true;
                filter = Some(expr);
            }
            SelectToken::GroupReference(name) | SelectToken::BareName(name) => {
                if !name.is_empty() {
                    proxies.push(name);
                }
            }
        }
    }

    if !proxies.is_empty() {
        group.proxies = Some(proxies);
    }
    if include_all {
        group.include_all = Some(true);
    }
    group.filter = filter;
}

fn parse_number(line: usize, field: &'static str, value: &str) -> ConvertResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|source| ConvertError::InvalidNumber {
            line,
            field,
            value: value.to_string(),
            source,
        })
}

/// 按顺序解析全部行
pub fn parse_lines<I, S>(lines: I, options: ParseOptions) -> ConvertResult<ClashDocument>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = DirectiveParser::new(options);
    for (index, line) in lines.into_iter().enumerate() {
        parser.parse_line(index + 1, line.as_ref())?;
    }
    Ok(parser.finish())
}

/// 解析整段文本
pub fn parse_str(input: &str, options: ParseOptions) -> ConvertResult<ClashDocument> {
    parse_lines(input.lines(), options)
}
