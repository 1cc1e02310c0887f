//! Merging of the two relation result sets.

use gitlab::Issue;
use std::collections::HashSet;

/// Merge the assignee-relation and author-relation result sets into one
/// deduplicated sequence.
///
/// The assignee-side sequence is kept verbatim and first; each authored
/// issue whose `iid` is not already present is appended in authored
/// order. A stable set union with first-seen-wins, not a sort: the
/// aggregate order is a semantic contract of this function.
pub fn merge_by_relation(assigned: Vec<Issue>, authored: Vec<Issue>) -> Vec<Issue> {
    let mut seen: HashSet<u64> = assigned.iter().map(|issue| issue.iid).collect();
    let mut merged = assigned;
    for issue in authored {
        if seen.insert(issue.iid) {
            merged.push(issue);
        }
    }
    merged
}
