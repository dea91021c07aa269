use super::{Bus, Cpu, Flag};

impl<B: Bus> Cpu<B> {
    /// The 0xCB-prefixed page: rotates, shifts, SWAP, and the BIT/RES/SET
    /// bit operations. The second opcode byte decomposes into an
    /// operation class (bits 6–7), a bit index or sub-operation (bits
    /// 3–5) and a register field (bits 0–2).
    pub(super) fn exec_cb(&mut self) -> u32 {
        let cb = self.fetch8();
        let class = cb >> 6;
        let y = cb >> 3 & 0x07;
        let reg = cb & 0x07;

        match class {
            // Rotates and shifts.
            0 => {
                let value = self.read_reg8(reg);
                let carry_in = self.get_flag(Flag::C);
                let (result, carry_out) = match y {
                    // RLC
                    0 => (value.rotate_left(1), value & 0x80 != 0),
                    // RRC
                    1 => (value.rotate_right(1), value & 0x01 != 0),
                    // RL
                    2 => (value << 1 | carry_in as u8, value & 0x80 != 0),
                    // RR
                    3 => (value >> 1 | (carry_in as u8) << 7, value & 0x01 != 0),
                    // SLA
                    4 => (value << 1, value & 0x80 != 0),
                    // SRA: arithmetic shift keeps the sign bit.
                    5 => (value >> 1 | value & 0x80, value & 0x01 != 0),
                    // SWAP
                    6 => (value << 4 | value >> 4, false),
                    // SRL
                    7 => (value >> 1, value & 0x01 != 0),
                    _ => unreachable!(),
                };
                self.write_reg8(reg, result);
                self.clear_flags();
                self.set_flag(Flag::Z, result == 0);
                self.set_flag(Flag::C, carry_out);
                if reg == 6 {
                    4
                } else {
                    2
                }
            }
            // BIT b, r: test only; C preserved.
            1 => {
                let value = self.read_reg8(reg);
                self.set_flag(Flag::Z, value & (1 << y) == 0);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
                if reg == 6 {
                    3
                } else {
                    2
                }
            }
            // RES b, r
            2 => {
                let value = self.read_reg8(reg);
                self.write_reg8(reg, value & !(1 << y));
                if reg == 6 {
                    4
                } else {
                    2
                }
            }
            // SET b, r
            3 => {
                let value = self.read_reg8(reg);
                self.write_reg8(reg, value | 1 << y);
                if reg == 6 {
                    4
                } else {
                    2
                }
            }
            _ => unreachable!(),
        }
    }
}
