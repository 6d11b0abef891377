//! Clustering of recently obtained items.
//!
//! Asset IDs increase as items are created, so a batch of items received together has IDs
//! close to each other and close to the newest ID in the inventory.

/// Gets the numbers nearest to `near`, walking outward in order of distance and stopping at the
/// first step whose distance grows by more than `gap`.
pub fn cluster_near(nums: &[u64], near: u64, gap: u64) -> Vec<u64> {
    let mut sorted = nums
        .iter()
        .map(|num| (*num, num.abs_diff(near)))
        .collect::<Vec<_>>();

    sorted.sort_by_key(|(_, distance)| *distance);

    let Some((first, first_distance)) = sorted.first().copied() else {
        return Vec::new();
    };

    if first_distance > gap {
        return Vec::new();
    }

    let mut cluster = vec![first];
    let mut previous_distance = first_distance;

    for (num, distance) in sorted.into_iter().skip(1) {
        if distance - previous_distance > gap {
            break;
        }

        cluster.push(num);
        previous_distance = distance;
    }

    cluster
}
