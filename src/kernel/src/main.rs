//! Ferrox Kernel Entry Point
//!
//! Initializes the memory manager and the session state, then runs the
//! polling loop: keyboard controller status, scancode, decode, dispatch.

#![no_std]
#![no_main]

extern crate alloc;

use ::x86_64::VirtAddr;
use bootloader::{entry_point, BootInfo};
use core::fmt::Write as _;
use core::panic::PanicInfo;
use ferrox_kernel::arch::x86_64::{
    self,
    vga::{Color, Writer},
    Cpuid, PhysWindow, PortSpace,
};
use ferrox_kernel::boot::{self, Status};
use ferrox_kernel::probe::{self, Machine};
use ferrox_kernel::serial_println;
use ferrox_kernel::terminal::Shell;

entry_point!(kernel_main);

/// Kernel entry point.
///
/// Called by the bootloader after setting up the initial environment.
/// Interrupts stay disabled for the whole session; every input byte comes
/// from polling the keyboard controller.
fn kernel_main(boot_info: &'static BootInfo) -> ! {
    // ========================================================================
    // Phase 1: Core Initialization
    // ========================================================================
    ferrox_kernel::init();

    // Memory initialization
    let phys_mem_offset = VirtAddr::new(boot_info.physical_memory_offset);
    let mut mapper = unsafe { ferrox_kernel::memory::init_mapper(phys_mem_offset) };
    let mut frame_allocator =
        unsafe { ferrox_kernel::memory::BootInfoFrameAllocator::init(&boot_info.memory_map) };

    ferrox_kernel::allocator::init_heap(&mut mapper, &mut frame_allocator)
        .expect("heap initialization failed");

    // The session console; owned here and passed by reference from now on.
    let mut console = Writer::new();
    console.clear_screen();
    boot::banner::print_banner(&mut console);

    // ========================================================================
    // Phase 2: Boot Logging
    // ========================================================================
    boot::log(&mut console, Status::Ok, "Serial port initialized");
    boot::log(&mut console, Status::Ok, "Memory manager initialized");
    boot::log(&mut console, Status::Ok, "Kernel heap ready");

    // ========================================================================
    // Phase 3: Hardware Capabilities and Boot Snapshot
    // ========================================================================
    let mut machine = Machine::new(
        PortSpace::new(),
        Cpuid::new(),
        PhysWindow::new(phys_mem_offset),
    );

    // The uptime reference for the whole session, captured exactly once.
    let boot_time = probe::clock::read_time(&mut machine.ports);
    boot::log(
        &mut console,
        Status::Ok,
        &alloc::format!("Clock synchronized at {}", boot_time),
    );
    log::info!("boot snapshot {}", boot_time);

    // Run kernel self tests (simulated hardware, reports over serial)
    ferrox_kernel::tests::run_all();
    boot::log(&mut console, Status::Ok, "Self tests passed");

    // ========================================================================
    // Boot Complete
    // ========================================================================
    boot::log(&mut console, Status::Ok, "Boot complete!");
    console.set_color(Color::Cyan, Color::Black);
    let _ = console.write_str("\nType 'info' for available commands.\n\n");
    console.set_color(Color::White, Color::Black);

    // ========================================================================
    // Phase 4: Session Polling Loop
    // ========================================================================
    let mut shell = Shell::new(boot_time);
    shell.prompt(&mut console);

    loop {
        if let Some(scancode) = probe::keyboard::poll_scancode(&mut machine.ports) {
            shell.handle_scancode(scancode, &mut console, &mut machine);
        }
        core::hint::spin_loop();
    }
}

/// Panic handler.
///
/// Called when the kernel encounters an unrecoverable error.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    // Use the already-initialized serial port
    serial_println!("KERNEL PANIC: {}", info);

    // The session writer is unreachable from here; a fresh one over the same
    // buffer is fine because nothing else runs after a panic.
    let mut console = Writer::new();
    console.set_color(Color::LightRed, Color::Black);
    let _ = console.write_str("\n\n!!! KERNEL PANIC !!!\n");
    console.set_color(Color::White, Color::Black);
    let _ = writeln!(console, "{}", info);

    x86_64::halt_loop()
}
