use std::fs;
use std::path::Path;

use prost::Message;

use crate::error::Result;
use crate::types::{CategoryEntry, MatchKind, RawDomainRecord};

pub mod geodat;

/// Decode GeoSite data from V2Ray DAT format.
///
/// Entries are returned in file order. Unknown domain type tags are kept as
/// [`MatchKind::Unrecognized`].
pub fn decode_geosite(data: &[u8]) -> Result<Vec<CategoryEntry>> {
    let list = geodat::GeoSiteList::decode(data)?;

    Ok(list
        .entry
        .into_iter()
        .map(|entry| {
            let records = entry.domain.into_iter().map(domain_to_record).collect();
            CategoryEntry::new(&entry.country_code, records)
        })
        .collect())
}

/// Load GeoSite data from a V2Ray DAT file on disk
pub fn load_geosite(path: impl AsRef<Path>) -> Result<Vec<CategoryEntry>> {
    let data = fs::read(path.as_ref())?;
    decode_geosite(&data)
}

/// Convert protobuf Domain to RawDomainRecord
fn domain_to_record(domain: geodat::Domain) -> RawDomainRecord {
    use geodat::domain::Type;

    let kind = match Type::try_from(domain.r#type) {
        Ok(Type::Plain) => MatchKind::Plain,
        Ok(Type::Regex) => MatchKind::Regex,
        Ok(Type::RootDomain) => MatchKind::RootDomain,
        Ok(Type::Full) => MatchKind::Full,
        Err(_) => MatchKind::Unrecognized(domain.r#type),
    };

    RawDomainRecord {
        kind,
        value: domain.value,
        tags: domain.attribute.into_iter().map(|attr| attr.key).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(r#type: i32, value: &str, attrs: &[&str]) -> geodat::Domain {
        geodat::Domain {
            r#type,
            value: value.to_string(),
            attribute: attrs
                .iter()
                .map(|key| geodat::domain::Attribute {
                    key: key.to_string(),
                    typed_value: Some(geodat::domain::attribute::TypedValue::BoolValue(true)),
                })
                .collect(),
        }
    }

    #[test]
    fn test_decode_geosite_entries() {
        let list = geodat::GeoSiteList {
            entry: vec![geodat::GeoSite {
                country_code: "GOOGLE".to_string(),
                domain: vec![
                    domain(2, "google.com", &[]),
                    domain(3, "www.google.cn", &["cn"]),
                    domain(0, "google", &["ads", "cn"]),
                    domain(1, r"^ad\.google\.", &[]),
                ],
                resource_hash: vec![],
                code: String::new(),
            }],
        };

        let entries = decode_geosite(&list.encode_to_vec()).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.code, "google");
        assert_eq!(
            entry.records,
            vec![
                RawDomainRecord::new(MatchKind::RootDomain, "google.com"),
                RawDomainRecord::new(MatchKind::Full, "www.google.cn").with_tag("cn"),
                RawDomainRecord::new(MatchKind::Plain, "google")
                    .with_tag("ads")
                    .with_tag("cn"),
                RawDomainRecord::new(MatchKind::Regex, r"^ad\.google\."),
            ]
        );
    }

    #[test]
    fn test_decode_keeps_unknown_type() {
        let list = geodat::GeoSiteList {
            entry: vec![geodat::GeoSite {
                country_code: "x".to_string(),
                domain: vec![domain(9, "odd.example", &[])],
                resource_hash: vec![],
                code: String::new(),
            }],
        };

        let entries = decode_geosite(&list.encode_to_vec()).unwrap();
        assert_eq!(entries[0].records[0].kind, MatchKind::Unrecognized(9));
    }

    #[test]
    fn test_decode_empty_buffer() {
        let entries = decode_geosite(&[]).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_geosite(&[0x0a, 0x05, 0x01]);
        assert!(result.is_err());
    }
}
