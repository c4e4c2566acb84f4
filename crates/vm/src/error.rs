//! Defines the [`Error`] type of the crate.

use crate::alu::Word;

/// An error that might occur while executing a program on the machine.
///
/// Every failure is a specific kind rather than a generic one, and each kind
/// carries enough context to diagnose it: CPU-side failures record the
/// program counter at which they occurred, memory-side failures record the
/// offending address. There is no recovery anywhere in the crate; the first
/// error aborts the execution that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An instruction named a register outside the 32-slot register file.
    #[error("{role} register R{reg} out of range (max R31) at pc={pc}")]
    RegisterOutOfRange {
        /// Which operand named the register (`dst`, `src` or `addr`).
        role: &'static str,
        /// The out-of-range register index.
        reg: u32,
        /// Program counter of the faulting instruction.
        pc: usize,
    },

    /// A jump instruction targeted a position past the end of the program.
    ///
    /// A target equal to the program length is *not* an error: it points
    /// just past the last instruction and halts the machine.
    #[error("jump target {target} out of bounds (program has {len} instructions) at pc={pc}")]
    JumpTargetOutOfRange {
        /// The invalid jump target.
        target: usize,
        /// Number of instructions in the program.
        len: usize,
        /// Program counter of the faulting instruction.
        pc: usize,
    },

    /// A word access used an address that is not 4-byte aligned.
    #[error("unaligned {op} at address {addr:#010x} (must be 4-byte aligned)")]
    UnalignedAccess {
        /// The access direction (`read` or `write`).
        op: &'static str,
        /// The unaligned address.
        addr: Word,
    },

    /// A word access fell wholly or partly outside the address space.
    #[error("{op} out of bounds at address {addr:#010x} (memory size = {size:#x})")]
    OutOfBounds {
        /// The access direction (`read` or `write`).
        op: &'static str,
        /// The out-of-bounds address.
        addr: Word,
        /// Total size of the address space, in bytes.
        size: usize,
    },

    /// A load or store executed on a machine with no memory attached.
    #[error("{op} at pc={pc} but no memory is attached to this machine")]
    MemoryNotAttached {
        /// The mnemonic of the faulting instruction.
        op: &'static str,
        /// Program counter of the faulting instruction.
        pc: usize,
    },

    /// A divide instruction found zero in its divisor register.
    #[error("division by zero (R{reg} = 0) at pc={pc}")]
    DivisionByZero {
        /// The register holding the zero divisor.
        reg: u32,
        /// Program counter of the faulting instruction.
        pc: usize,
    },

    /// The execution dispatched more instructions than the step ceiling
    /// allows; the program is almost certainly stuck in an infinite loop.
    #[error("execution limit exceeded (possible infinite loop) at pc={pc}")]
    StepLimitExceeded {
        /// Program counter at the moment the ceiling was hit.
        pc: usize,
    },

    /// The machine was asked to execute a program with no instructions.
    #[error("cannot execute an empty program")]
    EmptyProgram,
}
