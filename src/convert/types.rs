//! Clash 配置片段的数据结构定义
//! 代理组、规则提供者、规则三类集合

use indexmap::IndexMap;
use std::fmt;

/// 规则提供者的固定字段
pub const PROVIDER_BEHAVIOR: &str = "classical";
pub const PROVIDER_FORMAT: &str = "text";
pub const PROVIDER_TYPE: &str = "http";

/// 代理组类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupType {
    /// 手动选择
    Select,
    /// 延迟测试自动选择
    UrlTest,
    /// 其他类型（fallback、load-balance 等）原样透传
    Other(String),
}

impl GroupType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "select" => GroupType::Select,
            "url-test" => GroupType::UrlTest,
            other => GroupType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupType::Select => write!(f, "select"),
            GroupType::UrlTest => write!(f, "url-test"),
            GroupType::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// 代理组
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyGroup {
    /// 组名
    pub name: String,
    /// 组类型
    pub group_type: GroupType,
    /// 显式列出的代理或子组
    pub proxies: Option<Vec<String>>,
    /// 是否包含全部节点
    pub include_all: Option<bool>,
    /// 节点过滤正则
    pub filter: Option<String>,
    /// 健康检查地址
    pub url: Option<String>,
    /// 健康检查间隔（秒）
    pub interval: Option<i64>,
    /// 延迟容差
    pub tolerance: Option<i64>,
}

impl ProxyGroup {
    /// 创建只有名称和类型的代理组
    pub fn new(name: String, group_type: GroupType) -> Self {
        Self {
            name,
            group_type,
            proxies: None,
            include_all: None,
            filter: None,
            url: None,
            interval: None,
            tolerance: None,
        }
    }

    /// 代理列表（未设置时为空）
    pub fn proxy_names(&self) -> &[String] {
        self.proxies.as_deref().unwrap_or(&[])
    }
}

/// 规则提供者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleProvider {
    pub url: String,
    /// 本地缓存路径
    pub path: String,
    pub behavior: String,
    /// 更新间隔（秒）
    pub interval: u64,
    pub format: String,
    pub provider_type: String,
}

impl RuleProvider {
    /// 创建 http/text/classical 规则提供者
    pub fn new(url: String, path: String, interval: u64) -> Self {
        Self {
            url,
            path,
            behavior: PROVIDER_BEHAVIOR.to_string(),
            interval,
            format: PROVIDER_FORMAT.to_string(),
            provider_type: PROVIDER_TYPE.to_string(),
        }
    }
}

/// 单条路由规则，顺序决定匹配优先级
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// 兜底规则
    Match { target: String },
    /// 引用规则集
    RuleSet { provider: String, group: String },
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Match { target } => write!(f, "MATCH,{}", target),
            Rule::RuleSet { provider, group } => write!(f, "RULE-SET,{},{}", provider, group),
        }
    }
}

/// 解析结果：三个有序集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClashDocument {
    pub proxy_groups: Vec<ProxyGroup>,
    /// 按插入顺序迭代
    pub rule_providers: IndexMap<String, RuleProvider>,
    pub rules: Vec<Rule>,
}

impl ClashDocument {
    pub fn stats(&self) -> ConversionStats {
        ConversionStats {
            proxy_groups: self.proxy_groups.len(),
            rule_providers: self.rule_providers.len(),
            rules: self.rules.len(),
        }
    }

    /// 根据名称查找代理组
    pub fn find_group(&self, name: &str) -> Option<&ProxyGroup> {
        self.proxy_groups.iter().find(|g| g.name == name)
    }
}

/// 转换统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub proxy_groups: usize,
    pub rule_providers: usize,
    pub rules: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_type_round_trip_display() {
        assert_eq!(GroupType::parse("select"), GroupType::Select);
        assert_eq!(GroupType::parse("url-test"), GroupType::UrlTest);
        assert_eq!(
            GroupType::parse("load-balance"),
            GroupType::Other("load-balance".to_string())
        );
        assert_eq!(GroupType::parse("fallback").to_string(), "fallback");
        assert_eq!(GroupType::UrlTest.to_string(), "url-test");
    }

    #[test]
    fn test_rule_display() {
        let rule = Rule::RuleSet {
            provider: "Google".to_string(),
            group: "Proxy".to_string(),
        };
        assert_eq!(rule.to_string(), "RULE-SET,Google,Proxy");

        let rule = Rule::Match {
            target: "Final".to_string(),
        };
        assert_eq!(rule.to_string(), "MATCH,Final");
    }

    #[test]
    fn test_rule_provider_constants() {
        let provider = RuleProvider::new(
            "https://example.com/a.list".to_string(),
            "./ruleset/a.list".to_string(),
            86400,
        );
        assert_eq!(provider.behavior, "classical");
        assert_eq!(provider.format, "text");
        assert_eq!(provider.provider_type, "http");
        assert_eq!(provider.interval, 86400);
    }
}
