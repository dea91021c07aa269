use super::{Cpu, Flag};

/// 8-bit ALU and the 16-bit add helpers.
///
/// Flag conventions: half-carry is the carry out of bit 3 (8-bit) or bit
/// 11 (16-bit adds on HL); carry is the carry out of bit 7 or bit 15.
impl<B> Cpu<B> {
    /// ADD/ADC on A; `use_carry` selects ADC.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = (use_carry && self.get_flag(Flag::C)) as u8;

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;

        self.regs.a = result;
        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, half > 0x0F);
        self.set_flag(Flag::C, full > 0xFF);
    }

    /// SUB/SBC on A; `use_carry` selects SBC.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = (use_carry && self.get_flag(Flag::C)) as i16;

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in;
        let full = a as i16 - value as i16 - carry_in;
        let result = full as u8;

        self.regs.a = result;
        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, half < 0);
        self.set_flag(Flag::C, full < 0);
    }

    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;
        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, true);
    }

    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;
        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
    }

    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;
        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
    }

    /// CP: flags as for `A - value`, A untouched.
    pub(super) fn alu_cp(&mut self, value: u8) {
        let a = self.regs.a;
        self.alu_sub(value, false);
        self.regs.a = a;
    }

    /// INC on an arbitrary byte; C is untouched.
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, value & 0x0F == 0x0F);
        result
    }

    /// DEC on an arbitrary byte; C is untouched.
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, value & 0x0F == 0);
        result
    }

    /// ADD HL, rr. Z is untouched; H/C come from bits 11 and 15.
    pub(super) fn alu_add_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let (result, carry) = hl.overflowing_add(value);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, carry);
        self.regs.set_hl(result);
    }

    /// SP plus a signed 8-bit offset, as used by ADD SP,r8 and
    /// LD HL,SP+r8. H and C are computed from the low byte; Z and N
    /// always clear.
    pub(super) fn alu_sp_offset(&mut self, offset: i8) -> u16 {
        let sp = self.regs.sp;
        let unsigned = offset as i16 as u16;
        self.clear_flags();
        self.set_flag(Flag::H, (sp & 0x000F) + (unsigned & 0x000F) > 0x000F);
        self.set_flag(Flag::C, (sp & 0x00FF) + (unsigned & 0x00FF) > 0x00FF);
        sp.wrapping_add(unsigned)
    }

    /// Decimal adjust A after BCD addition or subtraction.
    ///
    /// The correction value is built from C, H and (after additions) the
    /// digit ranges of A; N selects whether it is added or subtracted.
    /// Z tracks the result, H always clears, C latches when a 0x60
    /// correction applied after an addition.
    pub(super) fn alu_daa(&mut self) {
        let a = self.regs.a;
        let mut adjust: u8 = 0;
        let mut carry = self.get_flag(Flag::C);

        if self.get_flag(Flag::N) {
            if self.get_flag(Flag::C) {
                adjust |= 0x60;
            }
            if self.get_flag(Flag::H) {
                adjust |= 0x06;
            }
            self.regs.a = a.wrapping_sub(adjust);
        } else {
            if self.get_flag(Flag::C) || a > 0x99 {
                adjust |= 0x60;
                carry = true;
            }
            if self.get_flag(Flag::H) || a & 0x0F > 0x09 {
                adjust |= 0x06;
            }
            self.regs.a = a.wrapping_add(adjust);
        }

        self.set_flag(Flag::Z, self.regs.a == 0);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, carry);
    }
}
