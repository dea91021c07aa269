/// The five DMG interrupt sources, in priority order (lowest bit wins).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Interrupt {
    VBlank = 0,
    LcdStat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    /// Bit mask of this source in IE/IF.
    #[inline]
    pub fn mask(self) -> u8 {
        1 << (self as u8)
    }

    /// Fixed dispatch vector for this source.
    #[inline]
    pub fn vector(self) -> u16 {
        0x0040 + (self as u16) * 8
    }

    fn from_index(index: u32) -> Option<Interrupt> {
        match index {
            0 => Some(Interrupt::VBlank),
            1 => Some(Interrupt::LcdStat),
            2 => Some(Interrupt::Timer),
            3 => Some(Interrupt::Serial),
            4 => Some(Interrupt::Joypad),
            _ => None,
        }
    }
}

/// IF bits that exist in hardware; the upper three always read as 1.
const IF_USED_BITS: u8 = 0x1F;
const IF_UNUSED_BITS: u8 = 0xE0;

/// DMG power-on value of IF (upper bits set, VBlank already requested).
const IF_POWER_ON: u8 = 0xE1;

/// Interrupt controller: IE/IF registers plus the master-enable gate.
///
/// Peripherals raise interrupts by calling `request`; the CPU consumes
/// them through `pending`/`clear` and gates *dispatch* on `ime`.
///
/// `ime_gates_flag_writes` reproduces a behaviour observed in one
/// reference implementation where `request` and `clear` are themselves
/// suppressed while IME is off. Real hardware keeps IF fully independent
/// of IME, so the toggle defaults to off; it exists so the divergence is
/// a documented switch rather than a silent correction.
pub struct Interrupts {
    enable: u8,
    flags: u8,
    pub(crate) ime: bool,
    pub(crate) ime_gates_flag_writes: bool,
}

impl Default for Interrupts {
    fn default() -> Self {
        Self {
            enable: 0,
            flags: IF_POWER_ON & IF_USED_BITS,
            ime: false,
            ime_gates_flag_writes: false,
        }
    }
}

impl Interrupts {
    /// Set the flag bit for `interrupt`.
    pub(crate) fn request(&mut self, interrupt: Interrupt) {
        if self.ime_gates_flag_writes && !self.ime {
            return;
        }
        self.flags |= interrupt.mask();
    }

    /// Clear the flag bit for `interrupt`.
    pub(crate) fn clear(&mut self, interrupt: Interrupt) {
        if self.ime_gates_flag_writes && !self.ime {
            return;
        }
        self.flags &= !interrupt.mask();
    }

    /// Highest-priority interrupt that is both enabled and requested, if
    /// any. The master-enable gate is *not* consulted here; it only gates
    /// dispatch in the CPU.
    pub(crate) fn pending(&self) -> Option<Interrupt> {
        let pending = self.enable & self.flags & IF_USED_BITS;
        if pending == 0 {
            return None;
        }
        Interrupt::from_index(pending.trailing_zeros())
    }

    #[inline]
    pub(crate) fn read_enable(&self) -> u8 {
        self.enable
    }

    #[inline]
    pub(crate) fn write_enable(&mut self, value: u8) {
        self.enable = value;
    }

    /// IF read: unused upper bits are forced to 1 as on hardware.
    #[inline]
    pub(crate) fn read_flags(&self) -> u8 {
        self.flags | IF_UNUSED_BITS
    }

    #[inline]
    pub(crate) fn write_flags(&mut self, value: u8) {
        self.flags = value & IF_USED_BITS;
    }

    pub(crate) fn reset(&mut self) {
        let gated = self.ime_gates_flag_writes;
        *self = Self::default();
        self.ime_gates_flag_writes = gated;
    }
}
