use super::{
    Address, Comparison, Memory, Opcode, Register, Registers, Stack, Value, DMA_OFFSET,
    MAX_PROGRAM_SIZE,
};
use crate::error;
use crate::lang::Error;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, Error>;

/// ## Result of a batch of steps
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The cycle budget ran out with the machine still running.
    Running,
    /// `rdi` is waiting on a pin. Service the input, then `release()`.
    Waiting,
    Halted,
    Fault(Error),
}

/// ## Virtual machine
///
/// The host loads a program once and then calls [`fetch_and_run`] once per
/// tick until [`halted`] reports true. Nothing here blocks or spawns; the
/// host owns all pacing.
///
/// The interrupt flag is a polling convention. While it is set each step
/// re-dispatches the opcode at `pc` without advancing. Only `rdi` sets it
/// and only [`release`] or `rst` clears it.
///
/// [`fetch_and_run`]: VirtualMachine::fetch_and_run
/// [`halted`]: VirtualMachine::halted
/// [`release`]: VirtualMachine::release
#[derive(Debug, Default)]
pub struct VirtualMachine {
    memory: Memory,
    registers: Registers,
    pc: Address,
    op_address: Address,
    halted: bool,
    interrupt: bool,
    call_stack: Stack<Address>,
}

impl VirtualMachine {
    pub fn new() -> VirtualMachine {
        VirtualMachine::default()
    }

    /// Places the program at address 0, bypassing write protection.
    pub fn load_program(&mut self, program: &[Value]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(error!(ProgramTooLarge, @program.len(); "PROGRAM EXCEEDS 200 CELLS"));
        }
        for (address, value) in program.iter().enumerate() {
            self.memory.write_no_check(address, *value)?;
        }
        debug!(len = program.len(), "program loaded");
        Ok(())
    }

    pub fn register_get(&self, reg: Register) -> u8 {
        self.registers.get(reg)
    }

    pub fn register_set(&mut self, reg: Register, value: u8) {
        self.registers.set(reg, value)
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn pc(&self) -> Address {
        self.pc
    }

    pub fn interrupt_pending(&self) -> bool {
        self.interrupt
    }

    pub fn call_stack(&self) -> &Stack<Address> {
        &self.call_stack
    }

    pub fn release(&mut self) {
        if self.interrupt {
            debug!(pc = self.pc, "interrupt released");
        }
        self.interrupt = false;
    }

    pub fn pin(&self, index: u8) -> Result<Value> {
        self.memory.read(DMA_OFFSET + index as Address)
    }

    pub fn set_pin(&mut self, index: u8, value: u8) -> Result<()> {
        self.memory
            .write(DMA_OFFSET + index as Address, Value::Immediate(value))
    }

    /// Same effect as executing `rst`.
    pub fn reset(&mut self) {
        self.pc = 0;
        self.registers.clear();
        self.memory.clear_dma();
        self.call_stack.clear();
        self.interrupt = false;
        self.halted = false;
        debug!("reset");
    }

    /// Steps until halted, waiting, faulted, or `cycles` steps have run.
    pub fn execute(&mut self, cycles: usize) -> Event {
        for _ in 0..cycles {
            if self.halted {
                return Event::Halted;
            }
            if let Err(error) = self.fetch_and_run() {
                return Event::Fault(error);
            }
            if self.interrupt {
                return Event::Waiting;
            }
        }
        if self.halted {
            Event::Halted
        } else {
            Event::Running
        }
    }

    /// One host tick. A halted machine does nothing.
    pub fn fetch_and_run(&mut self) -> Result<()> {
        if self.halted {
            return Ok(());
        }
        self.op_address = self.pc;
        let value = if self.interrupt {
            self.current()?
        } else {
            self.fetch()?
        };
        match value {
            Value::OpCode(code) => match Opcode::from_u8(code) {
                Some(op) => {
                    trace!(pc = self.op_address, opcode = %op, "dispatch");
                    self.run_opcode(op)
                }
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }

    // The instruction stream ends with the protected region.
    fn current(&self) -> Result<Value> {
        if self.pc >= MAX_PROGRAM_SIZE {
            return Ok(Value::Null);
        }
        self.memory.read(self.pc)
    }

    fn fetch(&mut self) -> Result<Value> {
        let value = self.current()?;
        self.pc += 1;
        Ok(value)
    }

    fn run_opcode(&mut self, op: Opcode) -> Result<()> {
        use Opcode::*;
        match op {
            Nop => Ok(()),
            Mov => self.mov(),
            Jmp => self.jmp(),
            Cal => self.cal(),
            Ret => {
                self.ret();
                Ok(())
            }
            Cmp => self.cmp(),
            Jmc => self.jmc(),
            Add => self.binary(|src, dst| dst.wrapping_add(src)),
            Sub => self.binary(|src, dst| dst.wrapping_sub(src)),
            Not => self.not(),
            And => self.binary(|src, dst| src & dst),
            Or => self.binary(|src, dst| src | dst),
            Xor => self.binary(|src, dst| src ^ dst),
            Wro => self.wro(),
            Rdi => self.rdi(),
            Rst => {
                self.reset();
                Ok(())
            }
            Hlt => {
                self.halt();
                Ok(())
            }
            Db => self.db(),
            Str => self.store(),
        }
    }

    fn fault(&self, msg: &'static str) -> Error {
        error!(OperandTypeFault, @self.op_address; msg)
    }

    fn register_operand(&self, value: Value) -> Result<Register> {
        match value {
            Value::Register(n) => match Register::from_u8(n) {
                Some(reg) => Ok(reg),
                None => Err(self.fault("INVALID REGISTER")),
            },
            _ => Err(self.fault("EXPECTED REGISTER")),
        }
    }

    fn resolve(&self, value: Value) -> Result<u8> {
        match value {
            Value::Immediate(n) => Ok(n),
            Value::Register(_) => Ok(self.registers.get(self.register_operand(value)?)),
            Value::Address(a) => Ok(self.memory.read(a as Address)?.payload()),
            _ => Err(self.fault("EXPECTED IMMEDIATE, REGISTER OR ADDRESS")),
        }
    }

    fn jump_target(&self, value: Value) -> Result<Address> {
        match value {
            Value::Immediate(_) | Value::Register(_) => Ok(self.resolve(value)? as Address),
            _ => Err(self.fault("EXPECTED IMMEDIATE OR REGISTER")),
        }
    }

    fn halt(&mut self) {
        self.halted = true;
        debug!(pc = self.pc, "halted");
    }

    fn mov(&mut self) -> Result<()> {
        let src = self.fetch()?;
        let dst = self.fetch()?;
        let reg = self.register_operand(dst)?;
        let value = self.resolve(src)?;
        self.registers.set(reg, value);
        Ok(())
    }

    fn jmp(&mut self) -> Result<()> {
        let addr = self.fetch()?;
        self.pc = self.jump_target(addr)?;
        Ok(())
    }

    fn cal(&mut self) -> Result<()> {
        let addr = self.fetch()?;
        let target = self.jump_target(addr)?;
        self.call_stack.push(self.pc);
        self.pc = target;
        Ok(())
    }

    fn ret(&mut self) {
        match self.call_stack.pop() {
            Some(addr) => self.pc = addr,
            None => self.halt(),
        }
    }

    fn cmp(&mut self) -> Result<()> {
        let src = self.fetch()?;
        let code = self.fetch()?;
        let comparison = match code {
            Value::Immediate(n) => match Comparison::from_u8(n) {
                Some(c) => c,
                None => return Err(self.fault("INVALID COMPARISON")),
            },
            _ => return Err(self.fault("EXPECTED COMPARISON CODE")),
        };
        let reg = self.register_operand(src)?;
        let result = comparison.test_zero(self.registers.get(reg));
        self.registers.set(Register::R, result as u8);
        Ok(())
    }

    fn jmc(&mut self) -> Result<()> {
        let addr = self.fetch()?;
        let target = self.jump_target(addr)?;
        if self.registers.get(Register::R) == 1 {
            self.pc = target;
        }
        Ok(())
    }

    fn binary(&mut self, f: fn(u8, u8) -> u8) -> Result<()> {
        let src = self.fetch()?;
        let dst = self.fetch()?;
        let reg = self.register_operand(dst)?;
        let lhs = self.resolve(src)?;
        let rhs = self.registers.get(reg);
        self.registers.set(reg, f(lhs, rhs));
        Ok(())
    }

    fn not(&mut self) -> Result<()> {
        let src = self.fetch()?;
        let reg = self.register_operand(src)?;
        self.registers.set(reg, !self.registers.get(reg));
        Ok(())
    }

    fn wro(&mut self) -> Result<()> {
        let src = self.fetch()?;
        let dst = self.fetch()?;
        let pin = match dst {
            Value::Pin(n) => n,
            _ => return Err(self.fault("EXPECTED PIN")),
        };
        let value = self.resolve(src)?;
        self.memory
            .write_no_check(DMA_OFFSET + pin as Address, Value::Immediate(value))
    }

    // Rewinds to its own opcode and raises the interrupt on every entry, so
    // once reached it re-runs each step and refreshes `dst` from the pin.
    fn rdi(&mut self) -> Result<()> {
        let src = self.fetch()?;
        let dst = self.fetch()?;
        let reg = self.register_operand(dst)?;
        self.pc -= if self.interrupt { 2 } else { 3 };
        if !self.interrupt {
            debug!(pc = self.pc, "interrupt raised");
        }
        self.interrupt = true;
        let index = match src {
            Value::Pin(n) => n,
            other => self.resolve(other)?,
        };
        let cell = self.memory.read(DMA_OFFSET + index as Address)?;
        self.registers.set(reg, cell.payload());
        Ok(())
    }

    fn db(&mut self) -> Result<()> {
        while self.pc < MAX_PROGRAM_SIZE && !self.current()?.is_opcode() {
            self.pc += 1;
        }
        Ok(())
    }

    fn store(&mut self) -> Result<()> {
        let src = self.fetch()?;
        let dst = self.fetch()?;
        let reg = self.register_operand(src)?;
        let addr = match dst {
            Value::Address(a) => a as Address,
            _ => return Err(self.fault("EXPECTED ADDRESS")),
        };
        self.memory
            .write(addr, Value::Immediate(self.registers.get(reg)))
    }
}
