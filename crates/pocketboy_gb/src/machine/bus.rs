use anyhow::Result;

use super::apu::ApuRegisters;
use super::boot::{BootOverlay, BOOT_IMAGE_SIZE};
use super::cartridge::Cartridge;
use super::interrupts::Interrupts;
use super::joypad::{Button, Joypad};
use super::ppu::{Ppu, OAM_SIZE};
use super::ram::WorkRam;
use super::serial::Serial;
use super::timer::Timer;
use crate::cpu::Bus;

/// System bus: the address-range router that owns every peripheral.
///
/// The bus itself keeps no addressable state; each read or write resolves
/// to exactly one owning peripheral (or the unmapped sentinel) through an
/// ordered range decode, translating the absolute address into a
/// region-relative offset on the way.
#[derive(Default)]
pub struct SystemBus {
    boot: BootOverlay,
    cartridge: Cartridge,
    ppu: Ppu,
    ram: WorkRam,
    timer: Timer,
    interrupts: Interrupts,
    joypad: Joypad,
    apu: ApuRegisters,
    serial: Serial,
}

impl Bus for SystemBus {
    fn read8(&mut self, addr: u16) -> u8 {
        match addr {
            // Boot overlay shadows the bottom of ROM until disabled.
            0x0000..=0x00FF if self.boot.is_active() => self.boot.read(addr),
            0x0000..=0x7FFF => self.cartridge.rom_read(addr),
            0x8000..=0x9FFF => self.ppu.vram_read(addr - 0x8000),
            0xA000..=0xBFFF => self.cartridge.ram_read(addr - 0xA000),
            0xC000..=0xDFFF => self.ram.wram_read(addr - 0xC000),
            // Echo RAM mirrors work RAM at -0x2000.
            0xE000..=0xFDFF => self.ram.wram_read(addr - 0xE000),
            0xFE00..=0xFE9F => self.ppu.oam_read(addr - 0xFE00),
            0xFEA0..=0xFEFF => {
                log::trace!("read from unusable region 0x{addr:04X}");
                0xFF
            }
            0xFF00..=0xFF7F => self.io_read(addr),
            0xFF80..=0xFFFE => self.ram.hram_read(addr - 0xFF80),
            0xFFFF => self.interrupts.read_enable(),
        }
    }

    fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => {
                log::warn!("dropped write to ROM: 0x{value:02X} -> 0x{addr:04X}");
            }
            0x8000..=0x9FFF => self.ppu.vram_write(addr - 0x8000, value),
            0xA000..=0xBFFF => self.cartridge.ram_write(addr - 0xA000, value),
            0xC000..=0xDFFF => self.ram.wram_write(addr - 0xC000, value),
            0xE000..=0xFDFF => self.ram.wram_write(addr - 0xE000, value),
            0xFE00..=0xFE9F => self.ppu.oam_write(addr - 0xFE00, value),
            0xFEA0..=0xFEFF => {
                log::debug!("dropped write to unusable region: 0x{addr:04X}");
            }
            0xFF00..=0xFF7F => self.io_write(addr, value),
            0xFF80..=0xFFFE => self.ram.hram_write(addr - 0xFF80, value),
            0xFFFF => self.interrupts.write_enable(value),
        }
    }

    /// Advance the cycle-driven peripherals by `cycles` clock ticks.
    fn tick(&mut self, cycles: u32) {
        self.timer.tick(cycles, &mut self.interrupts);
        self.ppu.tick(cycles, &mut self.interrupts);
    }

    fn interrupts(&self) -> &Interrupts {
        &self.interrupts
    }

    fn interrupts_mut(&mut self) -> &mut Interrupts {
        &mut self.interrupts
    }

    fn program_loaded(&self) -> bool {
        self.cartridge.is_loaded()
    }

    fn boot_overlay_active(&self) -> bool {
        self.boot.is_active()
    }

    /// Reset every peripheral with session-persistent state. The loaded
    /// ROM image survives; the boot overlay re-arms if installed.
    fn reset(&mut self) {
        self.cartridge.reset();
        self.ram.reset();
        self.timer.reset();
        self.interrupts.reset();
        self.ppu.reset();
        self.apu.reset();
        self.serial.reset();
        self.joypad.reset();
        self.boot.reset();
    }
}

impl SystemBus {
    /// IO register window dispatch (0xFF00–0xFF7F).
    fn io_read(&mut self, addr: u16) -> u8 {
        match addr {
            0xFF00 => self.joypad.read(),
            0xFF01..=0xFF02 => self.serial.read(addr - 0xFF01),
            0xFF04..=0xFF07 => self.timer.read(addr - 0xFF04),
            0xFF0F => self.interrupts.read_flags(),
            0xFF10..=0xFF2F => self.apu.read_register(addr - 0xFF10),
            0xFF30..=0xFF3F => self.apu.read_wave(addr - 0xFF30),
            0xFF40..=0xFF4B => self.ppu.read_register(addr - 0xFF40),
            _ => {
                log::debug!("read from unmapped IO port 0x{addr:04X}");
                0xFF
            }
        }
    }

    fn io_write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF00 => self.joypad.write(value),
            0xFF01..=0xFF02 => self.serial.write(addr - 0xFF01, value, &mut self.interrupts),
            0xFF04..=0xFF07 => self.timer.write(addr - 0xFF04, value),
            0xFF0F => self.interrupts.write_flags(value),
            0xFF10..=0xFF2F => self.apu.write_register(addr - 0xFF10, value),
            0xFF30..=0xFF3F => self.apu.write_wave(addr - 0xFF30, value),
            // The DMA register additionally kicks off the OAM copy.
            0xFF46 => {
                self.ppu.write_register(0x06, value);
                self.oam_dma(value);
            }
            0xFF40..=0xFF4B => self.ppu.write_register(addr - 0xFF40, value),
            0xFF50 => {
                if value != 0 {
                    self.boot.disable();
                }
            }
            _ => {
                log::debug!("dropped write to unmapped IO port: 0x{value:02X} -> 0x{addr:04X}");
            }
        }
    }

    /// OAM DMA: copy 160 bytes from `value << 8` into sprite memory. The
    /// source is read through the normal bus decode.
    fn oam_dma(&mut self, value: u8) {
        let base = (value as u16) << 8;
        for i in 0..OAM_SIZE as u16 {
            let byte = self.read8(base.wrapping_add(i));
            self.ppu.oam_write(i, byte);
        }
    }

    pub(crate) fn load_rom(&mut self, image: &[u8]) -> Result<()> {
        self.cartridge.load(image)
    }

    pub(crate) fn install_boot_image(&mut self, image: [u8; BOOT_IMAGE_SIZE]) {
        self.boot.install(image);
    }

    #[inline]
    pub(crate) fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// Bytes captured from the serial port so far.
    pub(crate) fn serial_output(&self) -> &[u8] {
        &self.serial.output
    }

    pub(crate) fn press_key(&mut self, button: Button) {
        self.joypad.press(button, &mut self.interrupts);
    }

    pub(crate) fn release_key(&mut self, button: Button) {
        self.joypad.release(button);
    }
}
