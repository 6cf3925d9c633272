use cortex_m::peripheral::MPU;
use cortex_m_rt::heap_start;
use defmt::debug;
use defrag_pico::config::HEAP_SIZE;
use embedded_alloc::LlffHeap as Heap;

#[global_allocator]
static HEAP: Heap = Heap::empty();

unsafe extern "C" {
    static _stack_end: usize;
}

/// # Safety
///
/// Call once, before anything allocates.
pub(crate) unsafe fn init_heap() {
    let heap_bottom = heap_start() as usize;
    debug!("HEAP size: {}k at {:x}", HEAP_SIZE / 1024, heap_bottom);
    unsafe { HEAP.init(heap_bottom, HEAP_SIZE) }
}

pub fn debug_heap_size(place: &str) {
    let used = HEAP.used();
    let free = HEAP.free();
    let percent = 100 * used / (used + free);
    debug!("HEAP usage {}: {}k ({}%)", place, used / 1024, percent);
}

#[inline(always)]
fn install_stack_guard(mpu: &MPU, stack_bottom: usize) {
    debug!("Installing stack guard at {:x}", stack_bottom);

    // Trap if MPU is already configured
    if mpu.ctrl.read() != 0 {
        cortex_m::asm::udf();
    }

    // The minimum we can protect is 32 bytes on a 32 byte boundary, so round up which will
    // just shorten the valid stack range a tad.
    let addr = (stack_bottom as u32 + 31) & !31;
    // Mask is 1 bit per 32 bytes of the 256 byte range... clear the bit for the segment we want
    let subregion_select = 0xff ^ (1 << ((addr >> 5) & 7));
    unsafe {
        mpu.ctrl.write(5); // enable mpu with background default map
        const RBAR_VALID: u32 = 0x10;
        mpu.rbar.write((addr & !0xff) | RBAR_VALID);
        mpu.rasr.write(
            1 // enable region
                | (0x7 << 1) // size 2^(7 + 1) = 256
                | (subregion_select << 8)
                | 0x10000000, // XN = disable instruction fetch; no other bits means no permissions
        );
    }
}

/// Faults instead of letting the stack grow into the heap.
pub(crate) fn install_core0_stack_guard(mpu: &MPU) {
    install_stack_guard(mpu, &raw const _stack_end as usize)
}
