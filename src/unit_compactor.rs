//! Unit-at-a-time compaction.
//!
//! Units are moved one by one from the tail of the medium into the leftmost
//! free unit. Nothing is materialised: a front and a back cursor walk the runs
//! of the disk map with remaining-length counters, and the sweep yields the
//! file occupying each position of the compacted medium in order.

use crate::disk_map::{DiskMap, FileId};

#[derive(Debug, Clone, Copy)]
struct Run {
    file_id: Option<FileId>,
    remaining: u8,
}

impl Run {
    fn load(map: &DiskMap<'_>, source_order: usize) -> Self {
        let extent = map.extent(source_order);
        Self {
            file_id: extent.file_id,
            remaining: extent.length,
        }
    }

    /// Nothing left to hand out from the back.
    fn is_spent(&self) -> bool {
        self.file_id.is_none() || self.remaining == 0
    }

    fn take(&mut self) -> Option<FileId> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.file_id
    }
}

/// Iterator over the file id at each position of the compacted medium.
pub struct UnitSweep<'a> {
    map: DiskMap<'a>,
    front: usize,
    back: usize,
    front_run: Run,
    back_run: Run,
    /// Set once the cursors meet on the same run.
    tail: Option<Run>,
}

impl<'a> UnitSweep<'a> {
    pub fn new(map: DiskMap<'a>) -> Self {
        let empty = Run {
            file_id: None,
            remaining: 0,
        };
        if map.is_empty() {
            return Self {
                map,
                front: 0,
                back: 0,
                front_run: empty,
                back_run: empty,
                tail: Some(empty),
            };
        }
        let back = map.len() - 1;
        Self {
            front: 0,
            back,
            front_run: Run::load(&map, 0),
            back_run: Run::load(&map, back),
            tail: None,
            map,
        }
    }
}

impl Iterator for UnitSweep<'_> {
    type Item = FileId;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tail) = &mut self.tail {
            return tail.take();
        }
        while self.front < self.back {
            if self.back_run.is_spent() {
                self.back -= 1;
                self.back_run = Run::load(&self.map, self.back);
            } else if self.front_run.remaining == 0 {
                self.front += 1;
                self.front_run = Run::load(&self.map, self.front);
            } else if self.front_run.file_id.is_none() {
                // free unit in front: fill it from the back
                self.front_run.remaining -= 1;
                return self.back_run.take();
            } else {
                return self.front_run.take();
            }
        }

        // Both cursors sit on the same run. The cursor that arrived last
        // loaded it fresh, so the smaller counter is what is still unplaced.
        let tail = self.tail.insert(Run {
            file_id: self.front_run.file_id,
            remaining: self.front_run.remaining.min(self.back_run.remaining),
        });
        tail.take()
    }
}
