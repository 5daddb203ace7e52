//! sing-box source rule-set documents.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::compile::CompiledRuleSet;
use crate::error::Result;

/// Rule-set format version written into every document
pub const RULE_SET_VERSION: u8 = 3;

/// Rule type discriminator of a plain (non-logical) rule
pub const RULE_TYPE_DEFAULT: &str = "default";

/// Top-level source rule-set document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRuleSet {
    pub version: u8,
    pub rules: Vec<HeadlessRule>,
}

/// Headless rule with the domain match fields used for geosite data.
/// Empty lists are omitted, as sing-box does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlessRule {
    #[serde(rename = "type")]
    pub rule_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain_suffix: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain_keyword: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain_regex: Vec<String>,
}

impl From<CompiledRuleSet> for HeadlessRule {
    fn from(compiled: CompiledRuleSet) -> Self {
        Self {
            rule_type: RULE_TYPE_DEFAULT.to_string(),
            domain: compiled.domain,
            domain_suffix: compiled.domain_suffix,
            domain_keyword: compiled.domain_keyword,
            domain_regex: compiled.domain_regex,
        }
    }
}

impl SourceRuleSet {
    /// Wrap compiled lists in a single default rule
    pub fn new(compiled: CompiledRuleSet) -> Self {
        Self {
            version: RULE_SET_VERSION,
            rules: vec![compiled.into()],
        }
    }

    /// Write as two-space indented JSON followed by a newline
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
