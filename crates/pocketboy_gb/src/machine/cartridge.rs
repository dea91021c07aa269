use anyhow::{bail, Result};

/// Size of one fixed ROM bank.
pub(crate) const ROM_BANK_SIZE: usize = 0x4000;
/// Size of the external RAM window at 0xA000–0xBFFF.
pub(crate) const EXTERNAL_RAM_SIZE: usize = 0x2000;

/// Cartridge storage: two fixed 16 KiB ROM banks plus the external RAM
/// window.
///
/// Only the flat 32 KiB, two-bank image format is supported; mapper
/// hardware (bank switching) is deliberately out of scope, so images that
/// would need it are rejected at load time rather than silently truncated.
pub(crate) struct Cartridge {
    rom0: [u8; ROM_BANK_SIZE],
    romn: [u8; ROM_BANK_SIZE],
    ram: [u8; EXTERNAL_RAM_SIZE],
    loaded: bool,
}

impl Default for Cartridge {
    fn default() -> Self {
        Self {
            rom0: [0xFF; ROM_BANK_SIZE],
            romn: [0xFF; ROM_BANK_SIZE],
            ram: [0; EXTERNAL_RAM_SIZE],
            loaded: false,
        }
    }
}

impl Cartridge {
    /// Copy a raw program image into the two ROM banks.
    ///
    /// Bytes 0x0000–0x3FFF populate bank 0 and bytes 0x4000–0x7FFF
    /// populate bank N; shorter images leave the remainder reading as
    /// 0xFF (open bus).
    pub(crate) fn load(&mut self, image: &[u8]) -> Result<()> {
        if image.is_empty() {
            bail!("empty program image");
        }
        if image.len() > 2 * ROM_BANK_SIZE {
            bail!(
                "program image is {} bytes; only flat 32 KiB two-bank images \
                 are supported (bank switching is not)",
                image.len()
            );
        }

        self.rom0 = [0xFF; ROM_BANK_SIZE];
        self.romn = [0xFF; ROM_BANK_SIZE];

        let bank0_len = image.len().min(ROM_BANK_SIZE);
        self.rom0[..bank0_len].copy_from_slice(&image[..bank0_len]);
        if image.len() > ROM_BANK_SIZE {
            let bankn = &image[ROM_BANK_SIZE..];
            self.romn[..bankn.len()].copy_from_slice(bankn);
        }

        self.ram = [0; EXTERNAL_RAM_SIZE];
        self.loaded = true;
        Ok(())
    }

    #[inline]
    pub(crate) fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Read from ROM space (offset relative to 0x0000).
    #[inline]
    pub(crate) fn rom_read(&self, offset: u16) -> u8 {
        let offset = offset as usize;
        if offset < ROM_BANK_SIZE {
            self.rom0[offset]
        } else {
            self.romn[offset - ROM_BANK_SIZE]
        }
    }

    /// Read from the external RAM window (offset relative to 0xA000).
    #[inline]
    pub(crate) fn ram_read(&self, offset: u16) -> u8 {
        self.ram[offset as usize]
    }

    /// Write to the external RAM window (offset relative to 0xA000).
    #[inline]
    pub(crate) fn ram_write(&mut self, offset: u16, value: u8) {
        self.ram[offset as usize] = value;
    }

    /// Clear external RAM; the ROM image itself survives a reset.
    pub(crate) fn reset(&mut self) {
        self.ram = [0; EXTERNAL_RAM_SIZE];
    }
}
