//! Classification and regrouping of decoded category entries.
//!
//! Every entry yields a base group named after its code, plus one
//! `code@attribute` group per distinct attribute key among its records.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::types::{CategoryEntry, DomainItem, Group, RawDomainRecord};

/// Separator between category code and attribute key in group names
pub const ATTRIBUTE_SEPARATOR: char = '@';

/// Classify records and drop duplicates, keeping first-seen order.
/// Records with unrecognized match types produce nothing.
pub fn classify<'a, I>(records: I) -> Vec<DomainItem>
where
    I: IntoIterator<Item = &'a RawDomainRecord>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter_map(RawDomainRecord::to_item)
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Group a single category entry.
///
/// The base group comes first, followed by attribute groups in the order
/// their key was first seen. An attribute whose records are all dropped
/// still yields an empty group.
pub fn group_entry(entry: &CategoryEntry) -> Vec<Group> {
    let mut attr_index: HashMap<&str, usize> = HashMap::new();
    let mut attr_buckets: Vec<(&str, Vec<&RawDomainRecord>)> = Vec::new();

    for record in &entry.records {
        for tag in &record.tags {
            let index = *attr_index.entry(tag.as_str()).or_insert_with(|| {
                attr_buckets.push((tag.as_str(), Vec::new()));
                attr_buckets.len() - 1
            });
            attr_buckets[index].1.push(record);
        }
    }

    let mut groups = Vec::with_capacity(1 + attr_buckets.len());
    groups.push(Group {
        name: entry.code.clone(),
        items: classify(&entry.records),
    });

    for (attribute, records) in attr_buckets {
        groups.push(Group {
            name: format!("{}{}{}", entry.code, ATTRIBUTE_SEPARATOR, attribute),
            items: classify(records),
        });
    }

    debug!(
        "Grouped {} ({} records) into {} groups",
        entry.code,
        entry.records.len(),
        groups.len()
    );
    groups
}

/// Group every entry of a database.
///
/// Group names stay unique: if a category code occurs twice, the later
/// entry's group replaces the earlier one in place.
pub fn group_all(entries: &[CategoryEntry]) -> Vec<Group> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for entry in entries {
        for group in group_entry(entry) {
            match index.get(&group.name) {
                Some(&i) => {
                    warn!("Duplicate geosite group {}, keeping the later one", group.name);
                    groups[i] = group;
                }
                None => {
                    index.insert(group.name.clone(), groups.len());
                    groups.push(group);
                }
            }
        }
    }

    groups
}
