use thiserror::Error;

/// Everything that can stop a compaction run. Both are fatal: the input is
/// embedded and the run is a single deterministic pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Error {
    /// A byte other than an ASCII digit appeared before the line break.
    #[error("malformed disk map: byte 0x{byte:02x} at position {position}")]
    MalformedInput { position: usize, byte: u8 },
    /// More blocks were needed than the arena is allowed to hold.
    #[error("capacity exceeded: {needed} blocks needed, {capacity} available")]
    CapacityExceeded { needed: usize, capacity: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
