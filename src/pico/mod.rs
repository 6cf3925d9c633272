use cortex_m::delay::Delay;
use defmt::{error, info};
use defmt_rtt as _;
use defrag_pico::config::{HEAP_SIZE, Limits, UART_BAUD};
use defrag_pico::console::{Console, report};
use defrag_pico::solver::DiskCompaction;
use embedded_hal::digital::OutputPin;
use panic_probe as _;
use rp2040_hal as hal;
use hal::Clock;
use hal::clocks::init_clocks_and_plls;
use hal::fugit::RateExtU32;
use hal::gpio::{FunctionUart, Pins};
use hal::uart::{DataBits, StopBits, UartConfig, UartPeripheral};
use hal::{Sio, Watchdog};
use crate::pico::console::ConsoleUartWriter;

mod console;
mod memory;

#[unsafe(link_section = ".boot2")]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

const XOSC_CRYSTAL_FREQ: u32 = 12_000_000;
const BLINK_MS: u32 = 250;

#[hal::entry]
fn entry() -> ! {
    unsafe { memory::init_heap() };

    let mut pac = hal::pac::Peripherals::take().unwrap();
    let core = hal::pac::CorePeripherals::take().unwrap();
    memory::install_core0_stack_guard(&core.MPU);

    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let clocks = init_clocks_and_plls(
        XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .unwrap();

    let sio = Sio::new(pac.SIO);
    let pins = Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let (_uart_rx, uart_tx) = UartPeripheral::new(
        pac.UART0,
        (
            pins.gpio0.into_function::<FunctionUart>(),
            pins.gpio1.into_function::<FunctionUart>(),
        ),
        &mut pac.RESETS,
    )
    .enable(
        UartConfig::new(UART_BAUD.Hz(), DataBits::Eight, None, StopBits::One),
        clocks.peripheral_clock.freq(),
    )
    .unwrap()
    .split();
    let mut console = Console::new(ConsoleUartWriter(uart_tx));
    let mut led = pins.gpio25.into_push_pull_output();

    info!("compacting {} bytes of input", crate::INPUT.len());
    let result = DiskCompaction::new(crate::INPUT, Limits::for_heap(HEAP_SIZE)).answers();
    memory::debug_heap_size("after compaction");
    report(&mut console, &result);

    match result {
        Ok(_) => {
            let _ = led.set_high();
            loop {
                cortex_m::asm::wfi();
            }
        }
        Err(err) => {
            error!("compaction failed: {}", err);
            let mut delay = Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());
            loop {
                let _ = led.set_high();
                delay.delay_ms(BLINK_MS);
                let _ = led.set_low();
                delay.delay_ms(BLINK_MS);
            }
        }
    }
}
