//! # Registeel
//!
//! A bit-accurate register-machine virtual machine: a 32-slot register file,
//! hardware-accurate condition flags, a flat 64 KB word-addressed RAM and a
//! fetch-decode-execute loop over a small load/store instruction set.
//!
//! # Components
//!
//! - [`Program`]: an append-only sequence of [`Instruction`]s, indexed by
//!   program-counter position. Built by a code generator or by hand; the
//!   machine only reads it.
//!
//! - [`alu`]: the pure arithmetic operations. Addition and subtraction go
//!   through an explicit ripple-carry adder so the [`Flags`] they produce
//!   come from the real carry chain.
//!
//! - [`Memory`]: the RAM, constructed by the caller and attached to a
//!   machine by reference. Optional: programs without loads or stores run
//!   without one.
//!
//! - [`Machine`]: ties the above together and runs a program to completion.
//!
//! # Example
//!
//! ```
//! use registeel_vm::{execute, Instruction, Program};
//!
//! let mut program = Program::new();
//! program.push(Instruction::load_const(0, 40));
//! program.push(Instruction::load_const(1, 2));
//! program.push(Instruction::add(0, 1));
//!
//! assert_eq!(execute(&program, None).unwrap(), 42);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

use tracing::{debug, trace};

pub use alu::{Flags, Word};
pub use cpu::{Cpu, NUM_REGS};
pub use error::Error;
pub use instr::{Instruction, Opcode};
pub use memory::{Memory, MEM_SIZE};
pub use program::Program;

pub mod alu;
pub mod cpu;
pub mod error;
pub mod instr;
pub mod memory;
pub mod program;

/// The maximum number of instructions a single execution may dispatch.
///
/// This ceiling is the only defense against non-terminating programs:
/// crossing it aborts the run with [`Error::StepLimitExceeded`] before any
/// unbounded resource growth.
pub const MAX_STEPS: u64 = 1_000_000;

/// Contains the full state of one program execution: the [`Cpu`], the
/// optionally attached [`Memory`], and the bookkeeping of the run.
///
/// A machine starts zeroed, executes one program and is then discarded; the
/// only persistent artifacts of a run are its result value (or error) and
/// whatever the program stored in the attached memory.
#[derive(Debug)]
pub struct Machine<'mem> {
    /// Register file, condition flags and program counter.
    cpu: Cpu,

    /// The RAM attached to this machine, if any.
    ///
    /// Borrowed, not owned: the caller constructs the memory and may inspect
    /// it after the run. `None` is valid for programs that never load or
    /// store; executing a load/store then fails with
    /// [`Error::MemoryNotAttached`].
    memory: Option<&'mem mut Memory>,

    /// The register most recently written by an executed instruction.
    ///
    /// This is the machine's result convention: on normal halt, the value of
    /// this register is the program's result. Only instructions that write a
    /// register update it; Compare, Store and the jumps never do.
    last_dst: u32,

    /// Instructions dispatched so far, bounded by [`MAX_STEPS`].
    steps: u64,
}

impl<'mem> Machine<'mem> {
    /// Creates a machine with zeroed state, optionally attached to `memory`.
    pub fn new(memory: Option<&'mem mut Memory>) -> Self {
        Self {
            cpu: Cpu::new(),
            memory,
            last_dst: 0,
            steps: 0,
        }
    }

    /// Returns the current state of the [`Cpu`].
    #[inline(always)]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Executes `program` until it halts.
    ///
    /// The machine halts normally when the program counter reaches the end
    /// of the program. The result is then the value of the most recently
    /// written register, sign-extended to `i64`. Callers that care about
    /// the raw bit pattern can truncate it back to a [`Word`] losslessly.
    ///
    /// # Errors
    ///
    /// An empty program is rejected up front with [`Error::EmptyProgram`].
    /// During execution, the first validation or runtime failure (register
    /// index, jump target, memory access, division by zero, step ceiling)
    /// aborts the run immediately with the specific [`Error`]; no partial
    /// result is produced.
    pub fn execute(&mut self, program: &Program) -> Result<i64, Error> {
        if program.is_empty() {
            return Err(Error::EmptyProgram);
        }

        while self.cpu.pc < program.len() {
            self.steps += 1;
            if self.steps > MAX_STEPS {
                return Err(Error::StepLimitExceeded { pc: self.cpu.pc });
            }

            self.step(program)?;
        }

        // Sign-extend through i32 so the 64-bit result reports negative
        // two's-complement patterns as negative numbers.
        let result = self.cpu.regs[self.last_dst as usize] as i32 as i64;
        debug!(result, steps = self.steps, "program halted");
        Ok(result)
    }

    /// Executes the single instruction at the current program counter,
    /// leaving the program counter on the next instruction to run.
    ///
    /// The caller guarantees that the program counter is in bounds.
    fn step(&mut self, program: &Program) -> Result<(), Error> {
        let pc = self.cpu.pc;
        let instr = program[pc];

        match instr.op {
            Opcode::LoadConst => {
                // The immediate is a wider signed value; it is reinterpreted
                // as a 32-bit word here, at the machine boundary.
                let value = instr.imm as Word;
                self.cpu.set_reg(instr.dst, "dst", value)?;
                trace!(pc, "R{} = {}", instr.dst, value);
                self.last_dst = instr.dst;
                self.cpu.pc += 1;
            }

            Opcode::Add | Opcode::Subtract | Opcode::Multiply | Opcode::Divide => {
                self.arithmetic(instr)?;
            }

            Opcode::Compare => {
                let a = self.cpu.reg(instr.dst, "dst")?;
                let b = self.cpu.reg(instr.src, "src")?;

                // Subtract purely for its flag side effect: the difference
                // is discarded and no register is written, so the result
                // tracking is left alone too.
                let (_, flags) = alu::sub(a, b);
                self.cpu.flags = flags;
                trace!(pc, "CMP R{}, R{} ({flags})", instr.dst, instr.src);
                self.cpu.pc += 1;
            }

            Opcode::Jump => {
                self.jump(instr.target, program)?;
                trace!(pc, "JMP -> {}", instr.target);
            }

            Opcode::JumpIfZero => {
                if self.cpu.flags.zero() {
                    self.jump(instr.target, program)?;
                    trace!(pc, "JZ -> taken ({})", instr.target);
                } else {
                    trace!(pc, "JZ -> not taken");
                    self.cpu.pc += 1;
                }
            }

            Opcode::JumpIfNotZero => {
                if !self.cpu.flags.zero() {
                    self.jump(instr.target, program)?;
                    trace!(pc, "JNZ -> taken ({})", instr.target);
                } else {
                    trace!(pc, "JNZ -> not taken");
                    self.cpu.pc += 1;
                }
            }

            Opcode::Load => {
                self.cpu.check_reg(instr.dst, "dst")?;
                let addr = self.cpu.reg(instr.addr, "addr")?;

                let memory = self.attached_memory("LOAD", pc)?;
                let value = memory.read_word(addr)?;

                self.cpu.set_reg(instr.dst, "dst", value)?;
                trace!(pc, "LOAD R{} <- MEM[{addr:#06x}] -> {value}", instr.dst);
                self.last_dst = instr.dst;
                self.cpu.pc += 1;
            }

            Opcode::Store => {
                let value = self.cpu.reg(instr.src, "src")?;
                let addr = self.cpu.reg(instr.addr, "addr")?;

                let memory = self.attached_memory("STORE", pc)?;
                memory.write_word(addr, value)?;

                trace!(pc, "STORE MEM[{addr:#06x}] <- R{} ({value})", instr.src);
                self.cpu.pc += 1;
            }
        }

        Ok(())
    }

    /// Executes one of the four ALU instructions: reads both operand
    /// registers, dispatches to the arithmetic unit, writes the result into
    /// the destination register and replaces the flags.
    fn arithmetic(&mut self, instr: Instruction) -> Result<(), Error> {
        let pc = self.cpu.pc;
        let a = self.cpu.reg(instr.dst, "dst")?;
        let b = self.cpu.reg(instr.src, "src")?;

        let (symbol, (result, flags)) = match instr.op {
            Opcode::Add => ("+", alu::add(a, b)),
            Opcode::Subtract => ("-", alu::sub(a, b)),
            Opcode::Multiply => ("*", alu::mul(a, b)),
            Opcode::Divide => {
                // The zero-check lives here, not in the ALU: the divide
                // primitive requires a non-zero divisor from its caller.
                if b == 0 {
                    return Err(Error::DivisionByZero {
                        reg: instr.src,
                        pc,
                    });
                }
                ("/", alu::div(a, b))
            }
            op => unreachable!("not an ALU opcode: {op:?}"),
        };

        self.cpu.set_reg(instr.dst, "dst", result)?;
        self.cpu.flags = flags;
        trace!(
            pc,
            "R{dst} = R{dst} {symbol} R{src} -> {result} ({flags})",
            dst = instr.dst,
            src = instr.src,
        );
        self.last_dst = instr.dst;
        self.cpu.pc += 1;
        Ok(())
    }

    /// Validates `target` and moves the program counter there.
    ///
    /// A target equal to the program length is valid: it points just past
    /// the last instruction, so the execution loop exits and the machine
    /// halts.
    fn jump(&mut self, target: usize, program: &Program) -> Result<(), Error> {
        if target > program.len() {
            return Err(Error::JumpTargetOutOfRange {
                target,
                len: program.len(),
                pc: self.cpu.pc,
            });
        }
        self.cpu.pc = target;
        Ok(())
    }

    /// Returns the attached memory, or the error that the `op` instruction
    /// at `pc` requires one.
    fn attached_memory(&mut self, op: &'static str, pc: usize) -> Result<&mut Memory, Error> {
        match self.memory.as_deref_mut() {
            Some(memory) => Ok(memory),
            None => Err(Error::MemoryNotAttached { op, pc }),
        }
    }
}

/// Executes `program` on a freshly zeroed [`Machine`], optionally attached
/// to `memory`.
///
/// This is the sole entry point the front end needs; see
/// [`Machine::execute`] for the execution contract.
pub fn execute(program: &Program, memory: Option<&mut Memory>) -> Result<i64, Error> {
    Machine::new(memory).execute(program)
}
