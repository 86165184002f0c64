//! Property tests for the merge rule

use proptest::prelude::*;
use vibe_core::{ContentItemId, OwnerId, ProgressRecord};
use vibe_progress::{merge_record, merge_tiers};

fn arbitrary_record(item: &'static str) -> impl Strategy<Value = ProgressRecord> {
    (0u32..20, 0.0f64..10_000.0, 0.0f64..10_000.0, 0i64..1_000).prop_map(
        move |(part_index, position, total_duration, updated_at)| {
            ProgressRecord::new(
                OwnerId::new("user_123"),
                ContentItemId::new(item),
                part_index,
                position,
                total_duration,
                updated_at,
            )
        },
    )
}

fn with_stamp(mut record: ProgressRecord, updated_at: i64) -> ProgressRecord {
    record.updated_at = updated_at;
    record
}

/// Local and remote records for one item whose stamps are equal, earlier or
/// later in roughly equal shares
fn record_pair() -> impl Strategy<Value = (ProgressRecord, ProgressRecord)> {
    let offset = prop_oneof![Just(0i64), -500i64..0, 1i64..500];
    (arbitrary_record("b1"), arbitrary_record("b1"), 500i64..1_000, offset).prop_map(
        |(local, remote, stamp, offset)| {
            (with_stamp(local, stamp + offset), with_stamp(remote, stamp))
        },
    )
}

proptest! {
    /// Property: local wins only on a strictly later stamp
    #[test]
    fn merge_picks_remote_unless_local_is_strictly_newer(
        (local, remote) in record_pair(),
    ) {
        let winner = merge_record(&local, &remote);

        if local.updated_at > remote.updated_at {
            prop_assert_eq!(winner, &local);
        } else {
            prop_assert_eq!(winner, &remote);
        }
    }

    /// Property: equal stamps always resolve to the remote record
    #[test]
    fn equal_stamps_resolve_to_remote(
        local in arbitrary_record("b1"),
        remote in arbitrary_record("b1"),
        stamp in 0i64..1_000,
    ) {
        let local = with_stamp(local, stamp);
        let remote = with_stamp(remote, stamp);

        prop_assert_eq!(merge_record(&local, &remote), &remote);

        let merged = merge_tiers(&OwnerId::new("user_123"), vec![remote.clone()], vec![local]);
        prop_assert_eq!(&merged[&ContentItemId::new("b1")], &remote);
    }

    /// Property: merging the tiers agrees with the pairwise rule
    #[test]
    fn tier_merge_agrees_with_pairwise_rule(
        (local, remote) in record_pair(),
    ) {
        let owner = OwnerId::new("user_123");
        let expected = merge_record(&local, &remote).clone();

        let merged = merge_tiers(&owner, vec![remote], vec![local]);

        prop_assert_eq!(merged.len(), 1);
        prop_assert_eq!(&merged[&ContentItemId::new("b1")], &expected);
    }

    /// Property: every item from either tier appears exactly once
    #[test]
    fn tier_merge_keeps_every_item(
        locals in prop::collection::vec(arbitrary_record("a"), 0..3),
        remotes in prop::collection::vec(arbitrary_record("b"), 0..3),
    ) {
        let owner = OwnerId::new("user_123");
        let expected = usize::from(!locals.is_empty()) + usize::from(!remotes.is_empty());

        let merged = merge_tiers(&owner, remotes, locals);

        prop_assert_eq!(merged.len(), expected);
    }
}
