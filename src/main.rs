#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod pico;

#[cfg(not(target_os = "none"))]
mod host;

const INPUT: &str = include_str!("../inputs/disk_map.txt");

#[cfg(not(target_os = "none"))]
fn main() -> std::process::ExitCode {
    host::main()
}
