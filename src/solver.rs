use crate::arena::Arena;
use crate::block_compactor;
use crate::checksum;
use crate::config::Limits;
use crate::disk_map::DiskMap;
use crate::error::Result;
use crate::info;
use crate::unit_compactor::UnitSweep;
use core::fmt;

/// Both compaction policies over the same raw input. Each part parses the
/// input on its own so the two runs never share state.
pub struct DiskCompaction<'a> {
    input: &'a str,
    limits: Limits,
}

impl<'a> DiskCompaction<'a> {
    pub fn new(input: &'a str, limits: Limits) -> Self {
        Self { input, limits }
    }

    /// Checksum after moving single units into the leftmost free space.
    pub fn part1(&self) -> Result<u64> {
        let map = DiskMap::parse(self.input)?;
        Ok(checksum::of_units(UnitSweep::new(map)))
    }

    /// Checksum after moving whole files, first fit.
    pub fn part2(&self) -> Result<u64> {
        let map = DiskMap::parse(self.input)?;
        let mut arena = Arena::from_disk_map(&map, self.limits)?;
        block_compactor::compact(&mut arena)?;
        debug_assert_eq!(arena.total_units(), map.total_units());
        Ok(checksum::of_arena(&arena))
    }

    pub fn answers(&self) -> Result<Answers> {
        let answers = Answers {
            unit_checksum: self.part1()?,
            block_checksum: self.part2()?,
        };
        info!(
            "answers: {} {}",
            answers.unit_checksum, answers.block_checksum
        );
        Ok(answers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answers {
    pub unit_checksum: u64,
    pub block_checksum: u64,
}

impl fmt::Display for Answers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "answers : {}  {}", self.unit_checksum, self.block_checksum)
    }
}
