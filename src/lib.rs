#![cfg_attr(target_os = "none", no_std)]

extern crate alloc;

pub mod arena;
pub mod block_compactor;
pub mod checksum;
pub mod config;
pub mod console;
pub mod disk_map;
pub mod error;
pub mod solver;
pub mod unit_compactor;

// defmt on the board, stderr on the host

#[cfg(target_os = "none")]
#[macro_export]
macro_rules! debug {
    ($($tt:tt)*) => {::defmt::debug!($($tt)*)};
}

#[cfg(target_os = "none")]
#[macro_export]
macro_rules! info {
    ($($tt:tt)*) => {::defmt::info!($($tt)*)};
}

#[cfg(not(target_os = "none"))]
#[macro_export]
macro_rules! debug {
    ($($tt:tt)*) => {
        if cfg!(debug_assertions) {
            ::std::eprintln!($($tt)*)
        }
    };
}

#[cfg(not(target_os = "none"))]
#[macro_export]
macro_rules! info {
    ($($tt:tt)*) => {::std::eprintln!($($tt)*)};
}
