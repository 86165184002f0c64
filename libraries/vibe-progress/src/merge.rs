//! Last-write-wins merge of the two progress tiers
//!
//! The rule is deliberately lopsided: a local record only displaces the
//! remote one when its `updated_at` is strictly later. Equal stamps keep the
//! remote record, since the remote tier is the one every device shares.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use vibe_core::{ContentItemId, OwnerId, ProgressRecord};

/// Pick the winner between two records for the same key
pub fn merge_record<'a>(
    local: &'a ProgressRecord,
    remote: &'a ProgressRecord,
) -> &'a ProgressRecord {
    if local.is_newer_than(remote) {
        local
    } else {
        remote
    }
}

/// Merge both tiers into one record per content item
///
/// Records owned by someone other than `owner_id` are dropped before merging.
pub fn merge_tiers(
    owner_id: &OwnerId,
    remote: Vec<ProgressRecord>,
    local: Vec<ProgressRecord>,
) -> HashMap<ContentItemId, ProgressRecord> {
    let mut merged = collapse(owner_id, remote);

    for (id, record) in collapse(owner_id, local) {
        match merged.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                if record.is_newer_than(slot.get()) {
                    slot.insert(record);
                }
            }
        }
    }

    merged
}

/// Key one tier's records by item, keeping the later of any duplicates
fn collapse(
    owner_id: &OwnerId,
    records: Vec<ProgressRecord>,
) -> HashMap<ContentItemId, ProgressRecord> {
    let mut by_item = HashMap::with_capacity(records.len());

    for record in records {
        if &record.owner_id != owner_id {
            continue;
        }
        match by_item.entry(record.content_item_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                if record.is_newer_than(slot.get()) {
                    slot.insert(record);
                }
            }
        }
    }

    by_item
}
