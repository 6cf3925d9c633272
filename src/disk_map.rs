//! Disk map decoding.
//!
//! A disk map is one line of ASCII digits. The digit at even position `k` is
//! the length of file `k / 2`, the digit at odd position is the length of the
//! free gap that follows it. `0` is legal for both and still takes a slot.

use crate::arena::BlockId;
use crate::debug;
use crate::error::{Error, Result};

pub type FileId = u16;

/// One run of the map, as written in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// `None` for free space.
    pub file_id: Option<FileId>,
    pub length: u8,
    pub source_order: usize,
}

impl Extent {
    pub fn is_file(&self) -> bool {
        self.file_id.is_some()
    }
}

/// A validated disk map. Borrows the digits of the input, extents are decoded
/// on access.
#[derive(Debug, Clone, Copy)]
pub struct DiskMap<'a> {
    digits: &'a [u8],
}

impl<'a> DiskMap<'a> {
    /// Reads the first line of `input`. Anything after the line break is
    /// ignored; a missing line break ends the map at the end of input.
    pub fn parse(input: &'a str) -> Result<Self> {
        let bytes = input.as_bytes();
        let digits = match bytes.iter().position(|&b| b == b'\n') {
            Some(eol) => bytes[..eol].strip_suffix(b"\r").unwrap_or(&bytes[..eol]),
            None => bytes,
        };
        if let Some(position) = digits.iter().position(|b| !b.is_ascii_digit()) {
            return Err(Error::MalformedInput {
                position,
                byte: digits[position],
            });
        }
        if digits.len() > BlockId::LIMIT {
            return Err(Error::CapacityExceeded {
                needed: digits.len(),
                capacity: BlockId::LIMIT,
            });
        }

        let map = Self { digits };
        debug!(
            "disk map: {} extents, {} files, {} units",
            map.len(),
            map.file_count(),
            map.total_units()
        );
        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// # Panics
    ///
    /// If `source_order` is out of bounds.
    pub fn extent(&self, source_order: usize) -> Extent {
        Extent {
            file_id: (source_order % 2 == 0).then_some((source_order / 2) as FileId),
            length: self.digits[source_order] - b'0',
            source_order,
        }
    }

    pub fn extents(&self) -> impl DoubleEndedIterator<Item = Extent> + '_ {
        (0..self.len()).map(|k| self.extent(k))
    }

    pub fn file_count(&self) -> usize {
        self.len().div_ceil(2)
    }

    pub fn total_units(&self) -> usize {
        self.extents().map(|e| e.length as usize).sum()
    }

    pub fn file_units(&self) -> usize {
        self.extents()
            .filter(Extent::is_file)
            .map(|e| e.length as usize)
            .sum()
    }
}

#[cfg(test)]
mod test {
    use crate::disk_map::{DiskMap, Extent};
    use crate::error::Error;

    #[test]
    fn test_parse() {
        let map = DiskMap::parse("2333133121414131402\n").unwrap();
        assert_eq!(map.len(), 19);
        assert_eq!(map.file_count(), 10);
        assert_eq!(map.total_units(), 42);
        assert_eq!(map.file_units(), 28);
        assert_eq!(
            map.extent(0),
            Extent { file_id: Some(0), length: 2, source_order: 0 }
        );
        assert_eq!(
            map.extent(1),
            Extent { file_id: None, length: 3, source_order: 1 }
        );
        assert_eq!(map.extents().last().and_then(|e| e.file_id), Some(9));
    }

    #[test]
    fn test_zero_digits_keep_their_slot() {
        let map = DiskMap::parse("10101\n").unwrap();
        assert_eq!(map.len(), 5);
        assert_eq!(map.extent(1).length, 0);
        assert_eq!(map.extent(2).file_id, Some(1));
        assert_eq!(map.extent(2).length, 0);
        assert_eq!(map.extent(4).file_id, Some(2));
    }

    #[test]
    fn test_terminators() {
        assert_eq!(DiskMap::parse("12345").unwrap().len(), 5);
        assert_eq!(DiskMap::parse("12345\r\n").unwrap().len(), 5);
        assert_eq!(DiskMap::parse("12345\nnot a map").unwrap().len(), 5);
        assert!(DiskMap::parse("\n").unwrap().is_empty());
    }

    #[test]
    fn test_malformed() {
        assert_eq!(
            DiskMap::parse("23a3\n").unwrap_err(),
            Error::MalformedInput { position: 2, byte: b'a' }
        );
        assert_eq!(
            DiskMap::parse("2 3\n").unwrap_err(),
            Error::MalformedInput { position: 1, byte: b' ' }
        );
        assert_eq!(
            DiskMap::parse("23\r").unwrap_err(),
            Error::MalformedInput { position: 2, byte: b'\r' }
        );
    }
}
