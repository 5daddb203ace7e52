//! sing-geosite - Convert V2Ray geosite.dat domain lists into sing-box rule-sets
//!
//! The conversion is a pure pipeline over one decoded database:
//! - Decode the protobuf `GeoSiteList` into category entries
//! - Classify every domain record and regroup by category code, plus one
//!   `code@attribute` group per attribute key
//! - Compile each group into the four sing-box domain match lists
//! - Write one `geosite-<group>.json` source rule-set per group
//!
//! # Example
//!
//! ```rust
//! use prost::Message;
//! use sing_geosite::geo::dat::geodat::{Domain, GeoSite, GeoSiteList};
//! use sing_geosite::{compile, parse};
//!
//! let list = GeoSiteList {
//!     entry: vec![GeoSite {
//!         country_code: "TEST".to_string(),
//!         domain: vec![Domain {
//!             r#type: 2, // RootDomain
//!             value: "example.com".to_string(),
//!             attribute: vec![],
//!         }],
//!         resource_hash: vec![],
//!         code: String::new(),
//!     }],
//! };
//!
//! let groups = parse(&list.encode_to_vec()).unwrap();
//! assert_eq!(groups[0].name, "test");
//!
//! let compiled = compile(&groups[0].items);
//! assert_eq!(compiled.domain_suffix, vec!["example.com"]);
//! ```
//!
//! # Match Type Mapping
//!
//! | geosite.dat type | Rule-set field |
//! |------------------|----------------|
//! | `Full` | `domain` |
//! | `Plain` | `domain_keyword` |
//! | `Regex` | `domain_regex` |
//! | `RootDomain` | `domain_suffix` |

pub mod compile;
pub mod config;
pub mod error;
pub mod generate;
pub mod geo;
pub mod group;
pub mod output;
pub mod release;
pub mod ruleset;
pub mod types;

// Re-export commonly used items
pub use compile::{compile, CompiledRuleSet};
pub use config::Config;
pub use error::{GeositeError, ReleaseErrorKind, Result};
pub use generate::{generate, generate_from_file, parse, release, should_skip, RunOutcome};
pub use geo::{decode_geosite, load_geosite};
pub use group::{classify, group_all, group_entry};
pub use output::{replace_output, write_group, write_groups};
pub use release::{Release, ReleaseAsset, ReleaseClient};
pub use ruleset::{HeadlessRule, SourceRuleSet, RULE_SET_VERSION};
pub use types::{CategoryEntry, DomainItem, DomainKind, Group, MatchKind, RawDomainRecord};

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    use crate::geo::dat::geodat;

    #[test]
    fn test_full_workflow() {
        let list = geodat::GeoSiteList {
            entry: vec![geodat::GeoSite {
                country_code: "TEST".to_string(),
                domain: vec![
                    geodat::Domain {
                        r#type: 3, // Full
                        value: "a.com".to_string(),
                        attribute: vec![],
                    },
                    geodat::Domain {
                        r#type: 0, // Plain
                        value: "b.com".to_string(),
                        attribute: vec![geodat::domain::Attribute {
                            key: "x".to_string(),
                            typed_value: None,
                        }],
                    },
                    geodat::Domain {
                        r#type: 2, // RootDomain
                        value: "c.com".to_string(),
                        attribute: vec![],
                    },
                ],
                resource_hash: vec![],
                code: String::new(),
            }],
        };

        let groups = parse(&list.encode_to_vec()).unwrap();
        assert_eq!(groups.len(), 2);

        let base = compile(&groups[0].items);
        assert_eq!(groups[0].name, "test");
        assert_eq!(base.domain, vec!["a.com"]);
        assert_eq!(base.domain_suffix, vec!["c.com"]);
        assert_eq!(base.domain_keyword, vec!["b.com"]);
        assert!(base.domain_regex.is_empty());

        assert_eq!(groups[1].name, "test@x");
        assert_eq!(
            groups[1].items,
            vec![DomainItem::new(DomainKind::Keyword, "b.com")]
        );
    }
}
