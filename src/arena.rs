//! Block store of the simulated medium.
//!
//! Blocks live in one append-only vector and are chained left to right through
//! `prev`/`next` handles. A handle is an index into that vector, so links stay
//! valid when a split appends a block. The vector is reserved once, up front,
//! and never reallocates: running out of room is reported instead.

use crate::config::Limits;
use crate::debug;
use crate::disk_map::{DiskMap, FileId};
use crate::error::{Error, Result};
use alloc::vec::Vec;

/// Stable handle of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct BlockId(u16);

impl BlockId {
    const NONE: u16 = u16::MAX;
    /// Number of addressable blocks.
    pub const LIMIT: usize = Self::NONE as usize;

    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn link(raw: u16) -> Option<Self> {
        (raw != Self::NONE).then_some(Self(raw))
    }
}

const FREE: u16 = u16::MAX;

/// A contiguous span holding either one file's units or free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    file: u16,
    len: u8,
    prev: u16,
    next: u16,
}

impl Block {
    /// `None` for free space.
    pub fn file_id(&self) -> Option<FileId> {
        (self.file != FREE).then_some(self.file)
    }

    pub fn is_free(&self) -> bool {
        self.file == FREE
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn prev(&self) -> Option<BlockId> {
        BlockId::link(self.prev)
    }

    pub fn next(&self) -> Option<BlockId> {
        BlockId::link(self.next)
    }
}

#[derive(Debug)]
pub struct Arena {
    blocks: Vec<Block>,
    head: Option<BlockId>,
    capacity: usize,
    extents: usize,
}

impl Arena {
    /// One block per extent, in parse order, so extent `k` gets handle `k`.
    ///
    /// Room is reserved for one split per file, the most a whole-file
    /// compaction can produce, unless `limits` allows less.
    pub fn from_disk_map(map: &DiskMap<'_>, limits: Limits) -> Result<Self> {
        let extents = map.len();
        let capacity = (extents + map.file_count())
            .min(limits.max_blocks)
            .min(BlockId::LIMIT);
        if extents > capacity {
            return Err(Error::CapacityExceeded {
                needed: extents,
                capacity,
            });
        }

        let mut blocks = Vec::new();
        blocks
            .try_reserve_exact(capacity)
            .map_err(|_| Error::CapacityExceeded {
                needed: capacity,
                capacity: 0,
            })?;
        debug!("arena: {} blocks reserved for {} extents", capacity, extents);

        for extent in map.extents() {
            let k = extent.source_order as u16;
            blocks.push(Block {
                file: extent.file_id.unwrap_or(FREE),
                len: extent.length,
                prev: if k == 0 { BlockId::NONE } else { k - 1 },
                next: if extent.source_order + 1 < extents {
                    k + 1
                } else {
                    BlockId::NONE
                },
            });
        }

        Ok(Self {
            blocks,
            head: (extents > 0).then_some(BlockId(0)),
            capacity,
            extents,
        })
    }

    pub fn head(&self) -> Option<BlockId> {
        self.head
    }

    /// # Panics
    ///
    /// If `id` was not handed out by this arena.
    pub fn get(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// Number of blocks, free and zero-length ones included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn file_count(&self) -> usize {
        self.extents.div_ceil(2)
    }

    /// Handle of the block the parser created for `file_id`.
    pub fn origin(&self, file_id: FileId) -> Option<BlockId> {
        let k = file_id as usize * 2;
        (k < self.extents).then_some(BlockId(k as u16))
    }

    /// Links a new file block in front of `at` and returns its handle.
    pub fn insert_before(&mut self, at: BlockId, file_id: FileId, len: u8) -> Result<BlockId> {
        if self.blocks.len() >= self.capacity {
            return Err(Error::CapacityExceeded {
                needed: self.blocks.len() + 1,
                capacity: self.capacity,
            });
        }
        debug_assert!(file_id != FREE);

        let id = BlockId(self.blocks.len() as u16);
        let prev = self.blocks[at.index()].prev;
        self.blocks.push(Block {
            file: file_id,
            len,
            prev,
            next: at.0,
        });
        self.blocks[at.index()].prev = id.0;
        match BlockId::link(prev) {
            Some(prev) => self.blocks[prev.index()].next = id.0,
            None => self.head = Some(id),
        }
        Ok(id)
    }

    /// Retags a block; `None` marks it free.
    pub fn set_file(&mut self, id: BlockId, file_id: Option<FileId>) {
        self.blocks[id.index()].file = file_id.unwrap_or(FREE);
    }

    pub fn set_len(&mut self, id: BlockId, len: u8) {
        self.blocks[id.index()].len = len;
    }

    /// Walks the medium left to right.
    pub fn iter(&self) -> Blocks<'_> {
        Blocks {
            arena: self,
            cursor: self.head,
        }
    }

    pub fn total_units(&self) -> usize {
        self.iter().map(|(_, block)| block.len() as usize).sum()
    }
}

pub struct Blocks<'a> {
    arena: &'a Arena,
    cursor: Option<BlockId>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = (BlockId, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let block = self.arena.get(id);
        self.cursor = block.next();
        Some((id, block))
    }
}
