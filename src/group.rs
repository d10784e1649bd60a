use std::cmp::Ordering;
use std::cmp::Ordering::{Equal, Greater, Less};
use std::collections::BTreeMap;

use itertools::Itertools;

use crate::load::{MetricsTable, Record};

/// Records sharing a Mode value, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub mode: String,
    pub records: Vec<Record>,
}

impl Group {
    /// Head of the group: the first `n` records, or all of them when there are fewer.
    pub fn sample(&self, n: usize) -> &[Record] {
        &self.records[..self.records.len().min(n)]
    }
}

#[derive(Debug, Default)]
pub struct Groups {
    pub groups: Vec<Group>,
    /// rows left out because their Mode was empty
    pub skipped: usize,
}

/// Mode ordering: numbers compare as numbers and sort before text, text compares by code point
/// (`G1` < `ZGC` < `g1`). Ties fall back to the raw bytes so distinct modes never compare equal.
pub fn mode_cmp(l: &str, r: &str) -> Ordering {
    let res = match (l.trim().parse::<f64>(), r.trim().parse::<f64>()) {
        (Ok(lv), Ok(rv)) => lv.partial_cmp(&rv).unwrap_or(Equal),
        (Err(_), Err(_)) => l.cmp(r),
        (Ok(_), Err(_)) => Less,
        (Err(_), Ok(_)) => Greater,
    };
    res.then_with(|| l.cmp(r))
}

/// Partition the table by Mode. Row order inside each group is kept as read.
pub fn group_by_mode(table: &MetricsTable) -> Groups {
    let mut map: BTreeMap<&str, Vec<Record>> = BTreeMap::new();
    let mut skipped = 0usize;
    for rec in &table.records {
        if rec.mode.is_empty() {
            skipped += 1;
            continue;
        }
        map.entry(rec.mode.as_str()).or_default().push(rec.clone());
    }
    let groups = map
        .into_iter()
        .sorted_by(|(l, _), (r, _)| mode_cmp(l, r))
        .map(|(mode, records)| Group { mode: mode.to_string(), records })
        .collect();
    Groups { groups, skipped }
}
