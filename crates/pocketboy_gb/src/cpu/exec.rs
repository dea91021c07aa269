mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::{Bus, Cpu};

impl<B: Bus> Cpu<B> {
    /// Decode and execute one opcode, returning its cost in quanta.
    ///
    /// This is the full instruction table: a single total match over the
    /// opcode byte, with each arm extracting its register/condition fields
    /// from the documented bit positions. `None` means a fatal decode
    /// error — the opcode byte has no assigned encoding — and the caller
    /// halts the machine.
    pub(super) fn exec_opcode(&mut self, opcode: u8) -> Option<u32> {
        let quanta = match opcode {
            // NOP
            0x00 => 1,

            // LD rr, d16
            0x01 | 0x11 | 0x21 | 0x31 => self.exec_ld_rr_d16(opcode),

            // LD (BC/DE/HL+/HL-), A
            0x02 | 0x12 | 0x22 | 0x32 => self.exec_ld_indirect_a(opcode),

            // INC rr / DEC rr
            0x03 | 0x13 | 0x23 | 0x33 => self.exec_inc_rr(opcode),
            0x0B | 0x1B | 0x2B | 0x3B => self.exec_dec_rr(opcode),

            // INC r / DEC r
            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => self.exec_inc_r(opcode),
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => self.exec_dec_r(opcode),

            // LD r, d8
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => self.exec_ld_r_d8(opcode),

            // Accumulator rotates
            0x07 | 0x0F | 0x17 | 0x1F => self.exec_rotate_a(opcode),

            // LD (a16), SP
            0x08 => self.exec_ld_a16_sp(),

            // ADD HL, rr
            0x09 | 0x19 | 0x29 | 0x39 => self.exec_add_hl_rr(opcode),

            // LD A, (BC/DE/HL+/HL-)
            0x0A | 0x1A | 0x2A | 0x3A => self.exec_ld_a_indirect(opcode),

            // STOP
            0x10 => self.exec_stop(),

            // JR r8 / JR cc, r8
            0x18 => self.exec_jr(),
            0x20 | 0x28 | 0x30 | 0x38 => self.exec_jr_cc(opcode),

            // DAA / CPL / SCF / CCF
            0x27 => self.exec_daa(),
            0x2F => self.exec_cpl(),
            0x37 => self.exec_scf(),
            0x3F => self.exec_ccf(),

            // HALT sits in the middle of the LD r,r block.
            0x76 => self.exec_halt(),

            // LD r, r
            0x40..=0x7F => self.exec_ld_rr(opcode),

            // ALU A, r
            0x80..=0xBF => self.exec_alu_r(opcode),

            // RET cc / RET / RETI
            0xC0 | 0xC8 | 0xD0 | 0xD8 => self.exec_ret_cc(opcode),
            0xC9 => self.exec_ret(),
            0xD9 => self.exec_reti(),

            // POP rr / PUSH rr
            0xC1 | 0xD1 | 0xE1 | 0xF1 => self.exec_pop_rr(opcode),
            0xC5 | 0xD5 | 0xE5 | 0xF5 => self.exec_push_rr(opcode),

            // JP cc, a16 / JP a16 / JP HL
            0xC2 | 0xCA | 0xD2 | 0xDA => self.exec_jp_cc(opcode),
            0xC3 => self.exec_jp_a16(),
            0xE9 => self.exec_jp_hl(),

            // CALL cc, a16 / CALL a16
            0xC4 | 0xCC | 0xD4 | 0xDC => self.exec_call_cc(opcode),
            0xCD => self.exec_call_a16(),

            // ALU A, d8
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => self.exec_alu_d8(opcode),

            // RST
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => self.exec_rst(opcode),

            // CB-prefixed page
            0xCB => self.exec_cb(),

            // LDH / LD with high or absolute addressing
            0xE0 | 0xF0 => self.exec_ldh_a8(opcode),
            0xE2 | 0xF2 => self.exec_ldh_c(opcode),
            0xEA | 0xFA => self.exec_ld_a16_a(opcode),

            // SP arithmetic and transfers
            0xE8 => self.exec_add_sp_r8(),
            0xF8 => self.exec_ld_hl_sp_r8(),
            0xF9 => self.exec_ld_sp_hl(),

            // DI / EI
            0xF3 => self.exec_di(),
            0xFB => self.exec_ei(),

            // The eleven unassigned encodings. Executing one is a fatal
            // decode error: report it and halt until restarted.
            0xD3 | 0xDB | 0xDD | 0xE3 | 0xE4 | 0xEB | 0xEC | 0xED | 0xF4 | 0xFC | 0xFD => {
                log::error!(
                    "unassigned opcode 0x{opcode:02X} at 0x{pc:04X} \
                     (AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X} SP=0x{sp:04X}); \
                     stopping",
                    pc = self.regs.pc.wrapping_sub(1),
                    af = self.regs.af(),
                    bc = self.regs.bc(),
                    de = self.regs.de(),
                    hl = self.regs.hl(),
                    sp = self.regs.sp,
                );
                return None;
            }
        };
        Some(quanta)
    }
}
