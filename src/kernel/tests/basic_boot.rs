#![no_std]
#![no_main]
#![feature(custom_test_frameworks)]
#![test_runner(ferrox_kernel::testutil::test_runner)]
#![reexport_test_harness_main = "test_main"]

use core::fmt::Write as _;
use core::panic::PanicInfo;
use ferrox_kernel::arch::x86_64::vga::Writer;
use ferrox_kernel::testutil::{exit_qemu, QemuExitCode};

#[no_mangle]
pub extern "C" fn _start() -> ! {
    ferrox_kernel::init();
    test_main();
    exit_qemu(QemuExitCode::Success);
    loop {}
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    ferrox_kernel::testutil::test_panic_handler(info)
}

#[test_case]
fn trivial_assertion() {
    assert_eq!(1, 1);
}

#[test_case]
fn vga_writer_survives_scroll() {
    let mut writer = Writer::new();
    writer.clear_screen();
    // Far more lines than the grid holds; every overflow must scroll
    // cleanly instead of running off the buffer.
    for i in 0..100 {
        let _ = writeln!(writer, "line {}", i);
    }
    writer.backspace();
    writer.clear_screen();
}
