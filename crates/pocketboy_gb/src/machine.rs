mod apu;
mod boot;
mod bus;
mod cartridge;
mod gameboy;
mod interrupts;
mod joypad;
mod ppu;
mod ram;
mod serial;
mod timer;

pub use boot::BOOT_IMAGE_SIZE;
pub use bus::SystemBus;
pub use gameboy::{GameBoy, CYCLES_PER_FRAME};
pub use interrupts::{Interrupt, Interrupts};
pub use joypad::Button;
pub use ppu::Mode;

#[cfg(test)]
mod tests;
