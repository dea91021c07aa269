use crate::cpu::{Bus, Cpu, Flag};

impl<B: Bus> Cpu<B> {
    /// The 0x80–0xBF block: ADD/ADC/SUB/SBC/AND/XOR/OR/CP A, r selected
    /// by bits 3–5, operand register by bits 0–2.
    pub(super) fn exec_alu_r(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x80..=0xBF));

        let src = opcode & 0x07;
        let value = self.read_reg8(src);
        self.apply_alu_op(opcode >> 3 & 0x07, value);
        if src == 6 {
            2
        } else {
            1
        }
    }

    /// ALU A, d8 (0xC6/0xCE/... 0xFE): same operation field, immediate
    /// operand.
    pub(super) fn exec_alu_d8(&mut self, opcode: u8) -> u32 {
        let value = self.fetch8();
        self.apply_alu_op(opcode >> 3 & 0x07, value);
        2
    }

    fn apply_alu_op(&mut self, op: u8, value: u8) {
        match op {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            7 => self.alu_cp(value),
            _ => panic!("ALU operation code out of range: {op}"),
        }
    }

    /// ADD HL, rr
    pub(super) fn exec_add_hl_rr(&mut self, opcode: u8) -> u32 {
        let value = self.read_pair(opcode >> 4 & 0x03);
        self.alu_add_hl(value);
        2
    }

    /// ADD SP, r8
    pub(super) fn exec_add_sp_r8(&mut self) -> u32 {
        let offset = self.fetch8() as i8;
        self.regs.sp = self.alu_sp_offset(offset);
        4
    }

    /// RLCA / RRCA / RLA / RRA. Unlike their CB-prefixed counterparts,
    /// these always clear Z.
    pub(super) fn exec_rotate_a(&mut self, opcode: u8) -> u32 {
        let a = self.regs.a;
        let carry_in = self.get_flag(Flag::C);
        let (result, carry_out) = match opcode {
            0x07 => (a.rotate_left(1), a & 0x80 != 0),
            0x0F => (a.rotate_right(1), a & 0x01 != 0),
            0x17 => (a << 1 | carry_in as u8, a & 0x80 != 0),
            0x1F => (a >> 1 | (carry_in as u8) << 7, a & 0x01 != 0),
            _ => unreachable!(),
        };
        self.regs.a = result;
        self.clear_flags();
        self.set_flag(Flag::C, carry_out);
        1
    }

    /// DAA
    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        1
    }

    /// CPL: complement A; N and H set.
    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        1
    }

    /// SCF: set carry; N and H clear.
    pub(super) fn exec_scf(&mut self) -> u32 {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
        1
    }

    /// CCF: complement carry; N and H clear.
    pub(super) fn exec_ccf(&mut self) -> u32 {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
        1
    }
}
