/// Match type of a domain record as stored in the V2Ray database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Substring match (`Domain.Type.Plain`)
    Plain,
    /// Regex match
    Regex,
    /// Domain and all subdomains
    RootDomain,
    /// Exact domain match
    Full,
    /// Type tag outside the known range, kept so grouping can drop it
    Unrecognized(i32),
}

impl MatchKind {
    /// Map a record match type to the kind of item it produces.
    ///
    /// `Plain` records become keyword matches, not exact matches.
    pub fn classify(self) -> Option<DomainKind> {
        match self {
            MatchKind::Full => Some(DomainKind::Full),
            MatchKind::Plain => Some(DomainKind::Keyword),
            MatchKind::Regex => Some(DomainKind::Regex),
            MatchKind::RootDomain => Some(DomainKind::Suffix),
            MatchKind::Unrecognized(_) => None,
        }
    }
}

/// One domain record decoded from the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDomainRecord {
    pub kind: MatchKind,
    pub value: String,
    /// Attribute keys, verbatim from the source
    pub tags: Vec<String>,
}

impl RawDomainRecord {
    pub fn new(kind: MatchKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Classify this record, or `None` if its match type is unrecognized
    pub fn to_item(&self) -> Option<DomainItem> {
        self.kind.classify().map(|kind| DomainItem {
            kind,
            value: self.value.clone(),
        })
    }
}

/// A top-level entry of the database (one category or country)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Lowercased category code
    pub code: String,
    pub records: Vec<RawDomainRecord>,
}

impl CategoryEntry {
    pub fn new(code: &str, records: Vec<RawDomainRecord>) -> Self {
        Self {
            code: code.to_lowercase(),
            records,
        }
    }
}

/// Match kind of a classified item, one per rule-set list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    Full,
    Keyword,
    Regex,
    Suffix,
}

/// Classified domain item; equality is (kind, value)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainItem {
    pub kind: DomainKind,
    pub value: String,
}

impl DomainItem {
    pub fn new(kind: DomainKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Named bucket of deduplicated items: `code` or `code@attribute`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub items: Vec<DomainItem>,
}

impl Group {
    /// Output file name for this group
    pub fn file_name(&self) -> String {
        format!("geosite-{}.json", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_mapping() {
        assert_eq!(MatchKind::Full.classify(), Some(DomainKind::Full));
        assert_eq!(MatchKind::Plain.classify(), Some(DomainKind::Keyword));
        assert_eq!(MatchKind::Regex.classify(), Some(DomainKind::Regex));
        assert_eq!(MatchKind::RootDomain.classify(), Some(DomainKind::Suffix));
        assert_eq!(MatchKind::Unrecognized(7).classify(), None);
    }

    #[test]
    fn test_category_code_lowercased() {
        let entry = CategoryEntry::new("GOOGLE", Vec::new());
        assert_eq!(entry.code, "google");
    }

    #[test]
    fn test_record_to_item_keeps_value_verbatim() {
        let record = RawDomainRecord::new(MatchKind::Full, "WWW.Example.com");
        assert_eq!(
            record.to_item(),
            Some(DomainItem::new(DomainKind::Full, "WWW.Example.com"))
        );
    }

    #[test]
    fn test_group_file_name() {
        let group = Group {
            name: "google@cn".into(),
            items: Vec::new(),
        };
        assert_eq!(group.file_name(), "geosite-google@cn.json");
    }
}
