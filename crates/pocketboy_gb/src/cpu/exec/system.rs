use crate::cpu::{Bus, Cpu};

impl<B: Bus> Cpu<B> {
    /// HALT: idle until an enabled interrupt is requested.
    pub(super) fn exec_halt(&mut self) -> u32 {
        self.halted = true;
        1
    }

    /// STOP: two-byte encoding; the padding byte is consumed. Treated as
    /// a deep idle equivalent to HALT.
    pub(super) fn exec_stop(&mut self) -> u32 {
        let padding = self.fetch8();
        if padding != 0 {
            log::debug!("STOP with nonzero padding byte 0x{padding:02X}");
        }
        self.halted = true;
        1
    }

    /// DI: disable the master gate immediately, cancelling any EI in
    /// flight.
    pub(super) fn exec_di(&mut self) -> u32 {
        self.bus.interrupts_mut().ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        1
    }

    /// EI: enable the master gate after the following instruction.
    pub(super) fn exec_ei(&mut self) -> u32 {
        self.ime_enable_pending = true;
        1
    }
}
