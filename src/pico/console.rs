use defrag_pico::console::ConsoleOutput;
use rp2040_hal::uart::{UartDevice, ValidUartPinout, Writer};

pub struct ConsoleUartWriter<U: UartDevice, P: ValidUartPinout<U>>(pub Writer<U, P>);

impl<U: UartDevice, P: ValidUartPinout<U>> ConsoleOutput for ConsoleUartWriter<U, P> {
    fn output(&mut self, mut line: &[u8]) {
        loop {
            match self.0.write_raw(line) {
                Ok([]) => break,
                Ok(rem) => line = rem,
                Err(_) => {},
            }
        }
    }
}
