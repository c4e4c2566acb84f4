//! Defines the [`Instruction`] type and the closed [`Opcode`] set of the
//! machine.

use std::fmt;

/// The operation performed by an [`Instruction`].
///
/// The set is closed: these eleven opcodes are the whole instruction set,
/// and the machine matches on them exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `R[dst] = imm`: load a constant, truncated to a 32-bit word.
    LoadConst,
    /// `R[dst] = R[dst] + R[src]`
    Add,
    /// `R[dst] = R[dst] - R[src]`
    Subtract,
    /// `R[dst] = R[dst] * R[src]` (low 32 bits of the product)
    Multiply,
    /// `R[dst] = R[dst] / R[src]` (unsigned; a zero divisor is an error)
    Divide,
    /// `flags = R[dst] - R[src]`, with the numeric result discarded and no
    /// register written.
    Compare,
    /// `pc = target`, unconditionally.
    Jump,
    /// `pc = target` when the Zero flag is set; fall through otherwise.
    JumpIfZero,
    /// `pc = target` when the Zero flag is clear; fall through otherwise.
    JumpIfNotZero,
    /// `R[dst] = MEM[R[addr]]`: 32-bit word load.
    Load,
    /// `MEM[R[addr]] = R[src]`: 32-bit word store.
    Store,
}

impl Opcode {
    /// Returns the assembly mnemonic of this opcode, used by traces and
    /// program dumps.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LoadConst => "LOAD_CONST",
            Self::Add => "ADD",
            Self::Subtract => "SUB",
            Self::Multiply => "MUL",
            Self::Divide => "DIV",
            Self::Compare => "CMP",
            Self::Jump => "JMP",
            Self::JumpIfZero => "JZ",
            Self::JumpIfNotZero => "JNZ",
            Self::Load => "LOAD",
            Self::Store => "STORE",
        }
    }
}

/// A single machine instruction.
///
/// Every instruction carries the full field set regardless of its opcode;
/// the fields an opcode does not use are kept at zero so that instructions
/// stay comparable and printable without knowing their opcode. The
/// per-opcode constructors below uphold that convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// The operation to perform.
    pub op: Opcode,
    /// Destination register (arithmetic, [`Opcode::LoadConst`],
    /// [`Opcode::Load`]).
    pub dst: u32,
    /// Source register (arithmetic, [`Opcode::Compare`],
    /// [`Opcode::Store`]).
    pub src: u32,
    /// Immediate value ([`Opcode::LoadConst`] only). Wider than a machine
    /// word on purpose: the front end parses literals as signed 64-bit
    /// values, and truncation to 32 bits happens at execution.
    pub imm: i64,
    /// Jump destination, as a program-counter index (jump family only).
    pub target: usize,
    /// Register holding the memory address ([`Opcode::Load`] and
    /// [`Opcode::Store`] only).
    pub addr: u32,
}

impl Instruction {
    /// `R[dst] = imm`
    pub const fn load_const(dst: u32, imm: i64) -> Self {
        Self {
            op: Opcode::LoadConst,
            dst,
            src: 0,
            imm,
            target: 0,
            addr: 0,
        }
    }

    /// `R[dst] = R[dst] + R[src]`
    pub const fn add(dst: u32, src: u32) -> Self {
        Self::binary(Opcode::Add, dst, src)
    }

    /// `R[dst] = R[dst] - R[src]`
    pub const fn subtract(dst: u32, src: u32) -> Self {
        Self::binary(Opcode::Subtract, dst, src)
    }

    /// `R[dst] = R[dst] * R[src]`
    pub const fn multiply(dst: u32, src: u32) -> Self {
        Self::binary(Opcode::Multiply, dst, src)
    }

    /// `R[dst] = R[dst] / R[src]`
    pub const fn divide(dst: u32, src: u32) -> Self {
        Self::binary(Opcode::Divide, dst, src)
    }

    /// `flags = R[dst] - R[src]`, result discarded.
    pub const fn compare(dst: u32, src: u32) -> Self {
        Self::binary(Opcode::Compare, dst, src)
    }

    /// `pc = target`
    pub const fn jump(target: usize) -> Self {
        Self::branch(Opcode::Jump, target)
    }

    /// `pc = target` when the Zero flag is set.
    pub const fn jump_if_zero(target: usize) -> Self {
        Self::branch(Opcode::JumpIfZero, target)
    }

    /// `pc = target` when the Zero flag is clear.
    pub const fn jump_if_not_zero(target: usize) -> Self {
        Self::branch(Opcode::JumpIfNotZero, target)
    }

    /// `R[dst] = MEM[R[addr]]`
    pub const fn load(dst: u32, addr: u32) -> Self {
        Self {
            op: Opcode::Load,
            dst,
            src: 0,
            imm: 0,
            target: 0,
            addr,
        }
    }

    /// `MEM[R[addr]] = R[src]`
    pub const fn store(src: u32, addr: u32) -> Self {
        Self {
            op: Opcode::Store,
            dst: 0,
            src,
            imm: 0,
            target: 0,
            addr,
        }
    }

    const fn binary(op: Opcode, dst: u32, src: u32) -> Self {
        Self {
            op,
            dst,
            src,
            imm: 0,
            target: 0,
            addr: 0,
        }
    }

    const fn branch(op: Opcode, target: usize) -> Self {
        Self {
            op,
            dst: 0,
            src: 0,
            imm: 0,
            target,
            addr: 0,
        }
    }
}

impl fmt::Display for Instruction {
    /// Renders the instruction in the mnemonic form used by program dumps,
    /// e.g. `LOAD_CONST   R1, 3` or `LOAD         R3, [R1]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.op.name();
        match self.op {
            Opcode::LoadConst => write!(f, "{name:<12} R{}, {}", self.dst, self.imm),
            Opcode::Jump | Opcode::JumpIfZero | Opcode::JumpIfNotZero => {
                write!(f, "{name:<12} {}", self.target)
            }
            Opcode::Load => write!(f, "{name:<12} R{}, [R{}]", self.dst, self.addr),
            Opcode::Store => write!(f, "{name:<12} R{}, [R{}]", self.src, self.addr),
            _ => write!(f, "{name:<12} R{}, R{}", self.dst, self.src),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_zero_unused_fields() {
        let instr = Instruction::compare(1, 2);
        assert_eq!(instr.imm, 0);
        assert_eq!(instr.target, 0);
        assert_eq!(instr.addr, 0);

        let instr = Instruction::jump(7);
        assert_eq!((instr.dst, instr.src, instr.imm, instr.addr), (0, 0, 0, 0));
    }

    #[test]
    fn instructions_render_per_opcode() {
        assert_eq!(
            Instruction::load_const(1, -3).to_string(),
            "LOAD_CONST   R1, -3"
        );
        assert_eq!(Instruction::add(0, 1).to_string(), "ADD          R0, R1");
        assert_eq!(Instruction::jump_if_zero(6).to_string(), "JZ           6");
        assert_eq!(Instruction::load(3, 1).to_string(), "LOAD         R3, [R1]");
        assert_eq!(
            Instruction::store(2, 1).to_string(),
            "STORE        R2, [R1]"
        );
    }
}
