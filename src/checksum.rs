//! Position-weighted checksum: the sum of `position * file_id` over every
//! occupied unit, positions counted from 0 across free units too.

use crate::arena::Arena;
use crate::disk_map::FileId;

/// Checksum of a dense prefix of occupied units, as yielded by
/// [`UnitSweep`](crate::unit_compactor::UnitSweep).
pub fn of_units<I: IntoIterator<Item = FileId>>(units: I) -> u64 {
    units
        .into_iter()
        .zip(0u64..)
        .map(|(file_id, position)| position * u64::from(file_id))
        .sum()
}

pub fn of_arena(arena: &Arena) -> u64 {
    let mut position = 0u64;
    let mut checksum = 0u64;
    for (_, block) in arena.iter() {
        let len = u64::from(block.len());
        if let Some(file_id) = block.file_id() {
            checksum += u64::from(file_id) * (position..position + len).sum::<u64>();
        }
        position += len;
    }
    checksum
}

#[cfg(test)]
mod test {
    use crate::arena::Arena;
    use crate::checksum::{of_arena, of_units};
    use crate::config::Limits;
    use crate::disk_map::DiskMap;

    #[test]
    fn test_of_units() {
        assert_eq!(of_units([0, 0, 9, 9, 8]), 18 + 27 + 32);
        assert_eq!(of_units([]), 0);
    }

    #[test]
    fn test_of_arena_skips_free() {
        // 0..111....22222
        let map = DiskMap::parse("12345\n").unwrap();
        let arena = Arena::from_disk_map(&map, Limits::unbounded()).unwrap();
        assert_eq!(of_arena(&arena), (3 + 4 + 5) + 2 * (10 + 11 + 12 + 13 + 14));
    }
}
