//! Whole-file compaction with first-fit placement.
//!
//! Files are visited once each, highest id first. A file moves into the
//! leftmost free block that is at least as long as itself and lies to its
//! left; an oversized gap is split, the file's old block becomes free space.

use crate::arena::{Arena, BlockId};
use crate::debug;
use crate::disk_map::FileId;
use crate::error::Result;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub moved: usize,
    /// Moves that had to split a larger gap.
    pub split: usize,
    pub stayed: usize,
}

pub fn compact(arena: &mut Arena) -> Result<Report> {
    let mut report = Report::default();
    for file_id in (0..arena.file_count()).rev() {
        let file_id = file_id as FileId;
        let Some(current) = locate(arena, file_id) else {
            continue;
        };
        let len = arena.get(current).len();
        // an empty file has nowhere worth going
        if len == 0 {
            report.stayed += 1;
            continue;
        }
        let Some(target) = first_fit(arena, current, len) else {
            report.stayed += 1;
            continue;
        };

        let gap = arena.get(target).len();
        if gap == len {
            arena.set_file(target, Some(file_id));
        } else {
            arena.insert_before(target, file_id, len)?;
            arena.set_len(target, gap - len);
            report.split += 1;
        }
        arena.set_file(current, None);
        report.moved += 1;
        debug!("file {} ({} units) moved to block {}", file_id, len, target.index());
    }
    debug!(
        "block compaction: {} moved ({} split), {} stayed",
        report.moved, report.split, report.stayed
    );
    Ok(report)
}

/// The block currently holding `file_id`. Until a file moves that is the
/// block the parser gave it.
fn locate(arena: &Arena, file_id: FileId) -> Option<BlockId> {
    arena
        .origin(file_id)
        .filter(|&id| arena.get(id).file_id() == Some(file_id))
        .or_else(|| {
            arena
                .iter()
                .find(|(_, block)| block.file_id() == Some(file_id))
                .map(|(id, _)| id)
        })
}

/// Leftmost free block left of `limit` with room for `len` units. Scans from
/// the head every time.
fn first_fit(arena: &Arena, limit: BlockId, len: u8) -> Option<BlockId> {
    arena
        .iter()
        .take_while(|&(id, _)| id != limit)
        .find(|(_, block)| block.is_free() && block.len() >= len)
        .map(|(id, _)| id)
}

#[cfg(test)]
mod test {
    use crate::arena::Arena;
    use crate::block_compactor::{compact, Report};
    use crate::checksum::of_arena;
    use crate::config::Limits;
    use crate::disk_map::DiskMap;
    use crate::error::Error;
    use alloc::string::String;

    fn render(arena: &Arena) -> String {
        let mut s = String::new();
        for (_, block) in arena.iter() {
            for _ in 0..block.len() {
                match block.file_id() {
                    Some(id) => s.push(char::from_digit(id as u32, 10).unwrap()),
                    None => s.push('.'),
                }
            }
        }
        s
    }

    fn compacted(input: &str) -> (Arena, Report) {
        let map = DiskMap::parse(input).unwrap();
        let mut arena = Arena::from_disk_map(&map, Limits::unbounded()).unwrap();
        let report = compact(&mut arena).unwrap();
        (arena, report)
    }

    #[test]
    fn test_example() {
        let (arena, report) = compacted("2333133121414131402\n");
        assert_eq!(render(&arena), "00992111777.44.333....5555.6666.....8888..");
        assert_eq!(of_arena(&arena), 2858);
        assert_eq!(report, Report { moved: 4, split: 2, stayed: 6 });
        assert_eq!(arena.total_units(), 42);
    }

    #[test]
    fn test_no_room() {
        let (arena, report) = compacted("12345\n");
        assert_eq!(render(&arena), "0..111....22222");
        assert_eq!(report.moved, 0);
    }

    #[test]
    fn test_zero_length_gap_is_not_a_target() {
        let (arena, report) = compacted("909\n");
        assert_eq!(report.moved, 0);
        assert_eq!(of_arena(&arena), (9..18).sum::<u64>());
    }

    #[test]
    fn test_zero_length_file_stays() {
        let (arena, report) = compacted("31021\n");
        assert_eq!(render(&arena), "0002...");
        assert_eq!(report, Report { moved: 1, split: 0, stayed: 2 });
        assert_eq!(of_arena(&arena), 6);
    }

    #[test]
    fn test_exact_fit_reuses_block() {
        let (arena, report) = compacted("1112\n");
        assert_eq!(render(&arena), "01...");
        assert_eq!(arena.len(), 4);
        assert_eq!(report.split, 0);
    }

    #[test]
    fn test_rerun_keeps_dense_layout() {
        let (mut arena, _) = compacted("1112\n");
        let before = of_arena(&arena);
        let report = compact(&mut arena).unwrap();
        assert_eq!(report.moved, 0);
        assert_eq!(of_arena(&arena), before);
    }

    #[test]
    fn test_split_over_capacity() {
        let map = DiskMap::parse("2333133121414131402\n").unwrap();
        let mut arena = Arena::from_disk_map(&map, Limits { max_blocks: 19 }).unwrap();
        assert_eq!(
            compact(&mut arena).unwrap_err(),
            Error::CapacityExceeded { needed: 20, capacity: 19 }
        );
    }
}
