use crate::arena::{Block, BlockId};

/// Bytes handed to the firmware allocator. The rest of the 256k RAM is stack.
pub const HEAP_SIZE: usize = 192 * 1024;

pub const UART_BAUD: u32 = 115_200;

/// Storage allotted to one block-compaction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_blocks: usize,
}

impl Limits {
    /// Only bounded by the handle space.
    pub const fn unbounded() -> Self {
        Self {
            max_blocks: BlockId::LIMIT,
        }
    }

    /// As many blocks as fit in `heap_bytes`.
    pub const fn for_heap(heap_bytes: usize) -> Self {
        let max_blocks = heap_bytes / size_of::<Block>();
        Self {
            max_blocks: if max_blocks < BlockId::LIMIT {
                max_blocks
            } else {
                BlockId::LIMIT
            },
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod test {
    use crate::arena::BlockId;
    use crate::config::{Limits, HEAP_SIZE};

    #[test]
    fn test_for_heap() {
        assert_eq!(Limits::for_heap(0).max_blocks, 0);
        assert_eq!(Limits::for_heap(usize::MAX).max_blocks, BlockId::LIMIT);
        let firmware = Limits::for_heap(HEAP_SIZE);
        assert!(firmware.max_blocks > 10_000);
        assert!(firmware.max_blocks < BlockId::LIMIT);
        assert_eq!(Limits::default(), Limits::unbounded());
    }
}
