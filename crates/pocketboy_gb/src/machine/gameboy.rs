use anyhow::Result;

use super::boot::BOOT_IMAGE_SIZE;
use super::joypad::Button;
use super::SystemBus;
use crate::cpu::{Bus, Cpu, Status};

/// Clock ticks per display frame (~1/60 s at 4 MiHz).
pub const CYCLES_PER_FRAME: u32 = 70_224;

/// High-level Game Boy machine.
///
/// Ownership is a strict tree: the machine owns the CPU, the CPU owns the
/// bus, the bus owns every peripheral. The host drives it by loading a
/// program image, then calling `step_frame` once per display frame and
/// consuming `frame` afterwards.
pub struct GameBoy {
    pub cpu: Cpu<SystemBus>,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(SystemBus::default()),
        }
    }

    /// Install a raw program image and perform a full reset.
    ///
    /// Bytes 0x0000–0x3FFF populate ROM bank 0 and 0x4000–0x7FFF bank N;
    /// larger images are rejected since bank switching is unsupported.
    pub fn load_rom(&mut self, image: &[u8]) -> Result<()> {
        self.cpu.bus.load_rom(image)?;
        self.cpu.reset();
        Ok(())
    }

    /// Install a 256-byte boot image; it overlays the bottom of ROM on
    /// the next reset until the program writes FF50.
    pub fn install_boot_image(&mut self, image: [u8; BOOT_IMAGE_SIZE]) {
        self.cpu.bus.install_boot_image(image);
    }

    pub fn start(&mut self) {
        self.cpu.start();
    }

    pub fn pause(&mut self) {
        self.cpu.pause();
    }

    pub fn stop(&mut self) {
        self.cpu.stop();
    }

    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.cpu.status()
    }

    /// Execute a single instruction; returns the run status and the cycle
    /// cost in clock ticks.
    pub fn step(&mut self) -> (Status, u32) {
        self.cpu.step()
    }

    /// Step the machine for one frame worth of time (70,224 clock ticks).
    ///
    /// Stops early when the CPU leaves the running state so a halted or
    /// paused machine does not spin.
    pub fn step_frame(&mut self) {
        let mut elapsed = 0u32;
        while elapsed < CYCLES_PER_FRAME {
            let (status, cycles) = self.cpu.step();
            if status != Status::Running || cycles == 0 {
                break;
            }
            elapsed += cycles;
        }
    }

    /// The current frame as RGBA bytes, row-major.
    pub fn frame(&self) -> &[u8] {
        self.cpu.bus.ppu().frame()
    }

    /// Copy the current frame into a caller-supplied RGBA buffer.
    pub fn copy_frame_into(&self, buffer: &mut [u8]) {
        self.cpu.bus.ppu().copy_frame_into(buffer);
    }

    pub fn press_key(&mut self, button: Button) {
        self.cpu.bus.press_key(button);
    }

    pub fn release_key(&mut self, button: Button) {
        self.cpu.bus.release_key(button);
    }

    /// Bytes the program has written out through the serial port.
    pub fn serial_output(&self) -> &[u8] {
        self.cpu.bus.serial_output()
    }

    /// Reproduce the reference implementation's quirk of suppressing
    /// interrupt-flag writes while the master gate is down. Off by
    /// default; real hardware keeps the flag register independent of
    /// the gate.
    pub fn set_ime_flag_gating(&mut self, enabled: bool) {
        self.cpu.bus.interrupts_mut().ime_gates_flag_writes = enabled;
    }
}
