use super::interrupts::{Interrupt, Interrupts};

/// Cycles per DIV increment (16384 Hz at 4 MiHz).
const DIV_PERIOD: u32 = 256;

/// TIMA periods selected by TAC bits 1:0.
const TIMA_PERIODS: [u32; 4] = [1024, 16, 64, 256];

const TAC_ENABLE: u8 = 0x04;
const TAC_USED_BITS: u8 = 0x07;
const TAC_UNUSED_BITS: u8 = 0xF8;

/// Timer / divider unit.
///
/// Time advances through explicit `tick` calls carrying the cycle cost of
/// the instruction just executed. Two private accumulators track partial
/// progress towards the next DIV and TIMA increments; neither is
/// addressable.
///
/// A TIMA overflow does not reload the counter on the tick where it
/// happens: the counter reads 0 until the *next* `tick` call, which
/// performs the reload from TMA and requests the timer interrupt. This
/// one-tick delay is observable and covered by tests.
pub(crate) struct Timer {
    /// DIV (FF04): free-running divider.
    div: u8,
    /// TIMA (FF05): programmable counter.
    tima: u8,
    /// TMA (FF06): reload value.
    tma: u8,
    /// TAC (FF07): control, lower 3 bits meaningful.
    tac: u8,
    /// Cycles accumulated towards the next DIV increment.
    div_acc: u32,
    /// Cycles accumulated towards the next TIMA increment.
    tima_acc: u32,
    /// Armed by a TIMA overflow; serviced at the start of the next tick.
    reload_pending: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            div: 0,
            tima: 0,
            tma: 0,
            tac: 0,
            div_acc: 0,
            tima_acc: 0,
            reload_pending: false,
        }
    }
}

impl Timer {
    /// Advance the timer by `cycles` clock ticks.
    pub(crate) fn tick(&mut self, cycles: u32, interrupts: &mut Interrupts) {
        if self.reload_pending {
            // One tick after overflow: reload TIMA and raise the interrupt.
            self.tima = self.tma;
            self.reload_pending = false;
            interrupts.request(Interrupt::Timer);
        }

        self.div_acc += cycles;
        while self.div_acc >= DIV_PERIOD {
            self.div_acc -= DIV_PERIOD;
            self.div = self.div.wrapping_add(1);
        }

        if self.tac & TAC_ENABLE == 0 {
            return;
        }

        let period = TIMA_PERIODS[(self.tac & 0x03) as usize];
        self.tima_acc += cycles;
        while self.tima_acc >= period {
            self.tima_acc -= period;
            let (next, overflow) = self.tima.overflowing_add(1);
            self.tima = next;
            if overflow {
                self.reload_pending = true;
            }
        }
    }

    pub(crate) fn read(&self, offset: u16) -> u8 {
        match offset {
            0 => self.div,
            1 => self.tima,
            2 => self.tma,
            3 => TAC_UNUSED_BITS | self.tac,
            _ => unreachable!("timer register offset out of range: {offset}"),
        }
    }

    pub(crate) fn write(&mut self, offset: u16, value: u8) {
        match offset {
            // Any DIV write clears the divider and the hidden accumulators.
            0 => {
                self.div = 0;
                self.div_acc = 0;
                self.tima_acc = 0;
            }
            1 => self.tima = value,
            2 => self.tma = value,
            3 => self.tac = value & TAC_USED_BITS,
            _ => unreachable!("timer register offset out of range: {offset}"),
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
