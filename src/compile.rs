use crate::types::{DomainItem, DomainKind};

/// A group's items split into the four rule-set match lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledRuleSet {
    pub domain: Vec<String>,
    pub domain_suffix: Vec<String>,
    pub domain_keyword: Vec<String>,
    pub domain_regex: Vec<String>,
}

impl CompiledRuleSet {
    /// Total number of values across all lists
    pub fn len(&self) -> usize {
        self.domain.len()
            + self.domain_suffix.len()
            + self.domain_keyword.len()
            + self.domain_regex.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition items by kind, preserving their relative order.
/// No deduplication happens here.
pub fn compile(items: &[DomainItem]) -> CompiledRuleSet {
    let mut compiled = CompiledRuleSet::default();

    for item in items {
        let list = match item.kind {
            DomainKind::Full => &mut compiled.domain,
            DomainKind::Keyword => &mut compiled.domain_keyword,
            DomainKind::Regex => &mut compiled.domain_regex,
            DomainKind::Suffix => &mut compiled.domain_suffix,
        };
        list.push(item.value.clone());
    }

    compiled
}
