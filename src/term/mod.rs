extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use ansi_term::Style;
use gpcd::lang::{Error, LabelTable, Options};
use gpcd::mach::{
    Address, Event, Listing, Register, Value, VirtualMachine, MAX_MEMORY_SIZE,
};
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Steps between checks for Ctrl-C.
const SLICE: usize = 1000;

const HELP: &str = "\
load FILE        assemble and load a program
step [N]         run N instructions (default 1)
run [N]          run until halted, waiting or N steps
regs             show registers
mem [FROM [TO]]  show memory (default the pin region)
list             disassemble the program
labels           show the label table
pin N [VALUE]    show or set pin N
x|y|r [VALUE]    show or set a register
release          clear the interrupt flag
reset            reset the machine, keeping the program
quit             leave the monitor
";

pub struct Config {
    pub file: Option<PathBuf>,
    pub batch: bool,
    pub cycles: usize,
    pub options: Options,
}

enum LoadError {
    Io(std::io::Error),
    Asm(Error),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "{}", e),
            LoadError::Asm(e) => write!(f, "{}", e),
        }
    }
}

struct Session {
    vm: VirtualMachine,
    labels: LabelTable,
    options: Options,
    cycles: usize,
}

impl Session {
    fn new(config: &Config) -> Session {
        Session {
            vm: VirtualMachine::new(),
            labels: LabelTable::new(),
            options: config.options,
            cycles: config.cycles,
        }
    }

    fn load(&mut self, path: &Path) -> Result<usize, LoadError> {
        let source = std::fs::read_to_string(path).map_err(LoadError::Io)?;
        let (program, labels) =
            gpcd::assemble_with(&source, self.options).map_err(LoadError::Asm)?;
        let mut vm = VirtualMachine::new();
        vm.load_program(&program).map_err(LoadError::Asm)?;
        self.vm = vm;
        self.labels = labels;
        Ok(program.len())
    }

    fn run(&mut self, cycles: usize, interrupted: &AtomicBool) -> (Event, bool) {
        let mut remaining = cycles;
        while remaining > 0 {
            if interrupted.swap(false, Ordering::SeqCst) {
                return (Event::Running, true);
            }
            let n = remaining.min(SLICE);
            match self.vm.execute(n) {
                Event::Running => remaining -= n,
                event => return (event, false),
            }
        }
        (Event::Running, false)
    }

    fn regs(&self) -> String {
        let mut s = format!("PC={:<3} {}", self.vm.pc(), self.vm.registers());
        if !self.vm.call_stack().is_empty() {
            s.push_str(&format!(" DEPTH={}", self.vm.call_stack().len()));
        }
        if self.vm.interrupt_pending() {
            s.push_str(" INT");
        }
        if self.vm.halted() {
            s.push_str(" HALTED");
        }
        s
    }
}

fn describe(event: &Event, broken: bool) -> String {
    match event {
        Event::Halted => "HALTED".to_string(),
        Event::Waiting => "WAITING FOR INPUT".to_string(),
        Event::Running if broken => "BREAK".to_string(),
        Event::Running => "EXECUTION CYCLES EXCEEDED".to_string(),
        Event::Fault(error) => format!("{}", Style::new().bold().paint(error.to_string())),
    }
}

/// Accepts `0x` hexadecimal or decimal.
fn parse_number(s: &str) -> Option<usize> {
    let lower = s.to_ascii_lowercase();
    match lower.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => lower.parse().ok(),
    }
}

pub fn main(config: Config) -> i32 {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("Error setting Ctrl-C handler: {}", error);
        return 1;
    }
    let mut session = Session::new(&config);
    if config.batch {
        return batch(&mut session, &config, &interrupted);
    }
    match main_loop(&mut session, &config, &interrupted) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("{}", error);
            1
        }
    }
}

fn batch(session: &mut Session, config: &Config, interrupted: &AtomicBool) -> i32 {
    let path = match &config.file {
        Some(path) => path,
        None => return 1,
    };
    if let Err(error) = session.load(path) {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
        return 1;
    }
    let (event, broken) = session.run(config.cycles, interrupted);
    println!("{}", describe(&event, broken));
    println!("{}", session.regs());
    match event {
        Event::Halted => 0,
        Event::Fault(_) => 1,
        _ => 2,
    }
}

fn main_loop(
    session: &mut Session,
    config: &Config,
    interrupted: &AtomicBool,
) -> std::io::Result<()> {
    let interface = Interface::new("GPCD")?;
    interface.set_report_signal(Signal::Interrupt, true);
    interface.set_prompt("> ")?;
    interface.write_fmt(format_args!("GPCD MONITOR\n"))?;
    if let Some(path) = &config.file {
        load_command(&interface, session, path)?;
    }
    loop {
        let line = match interface.read_line()? {
            ReadResult::Input(line) => line,
            ReadResult::Signal(Signal::Interrupt) => {
                interface.set_buffer("")?;
                continue;
            }
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        interface.add_history_unique(line.clone());
        if !command(&interface, session, &words, interrupted)? {
            break;
        }
    }
    Ok(())
}

fn load_command(
    interface: &Interface<DefaultTerminal>,
    session: &mut Session,
    path: &Path,
) -> std::io::Result<()> {
    match session.load(path) {
        Ok(len) => interface.write_fmt(format_args!("LOADED {} CELLS\n", len)),
        Err(error) => interface.write_fmt(format_args!(
            "{}\n",
            Style::new().bold().paint(error.to_string())
        )),
    }
}

// Returns false when the monitor should exit.
fn command(
    interface: &Interface<DefaultTerminal>,
    session: &mut Session,
    words: &[&str],
    interrupted: &AtomicBool,
) -> std::io::Result<bool> {
    let arg = |i: usize| words.get(i).and_then(|s| parse_number(s));
    match words[0].to_ascii_lowercase().as_str() {
        "quit" | "exit" => return Ok(false),
        "help" => interface.write_fmt(format_args!("{}", HELP))?,
        "load" => match words.get(1) {
            Some(path) => load_command(interface, session, Path::new(path))?,
            None => interface.write_fmt(format_args!("?MISSING FILE NAME\n"))?,
        },
        "step" => {
            for _ in 0..arg(1).unwrap_or(1) {
                if let Err(error) = session.vm.fetch_and_run() {
                    interface.write_fmt(format_args!(
                        "{}\n",
                        Style::new().bold().paint(error.to_string())
                    ))?;
                    break;
                }
            }
            interface.write_fmt(format_args!("{}\n", session.regs()))?;
        }
        "run" => {
            let cycles = arg(1).unwrap_or(session.cycles);
            let (event, broken) = session.run(cycles, interrupted);
            interface.write_fmt(format_args!("{}\n", describe(&event, broken)))?;
        }
        "regs" => interface.write_fmt(format_args!("{}\n", session.regs()))?,
        "mem" => {
            let from = arg(1).unwrap_or(200).min(MAX_MEMORY_SIZE);
            let to = arg(2).unwrap_or(MAX_MEMORY_SIZE).min(MAX_MEMORY_SIZE);
            for address in from..to {
                if let Ok(value) = session.vm.memory().read(address) {
                    interface.write_fmt(format_args!("{:3}: {}\n", address, value))?;
                }
            }
        }
        "list" => {
            let pc: Address = session.vm.pc();
            let listing = Listing::from_memory(session.vm.memory(), &session.labels);
            for (address, line) in listing.lines() {
                let marker = if *address == pc && !line.ends_with(':') {
                    ">"
                } else {
                    " "
                };
                interface.write_fmt(format_args!("{}{:3} {}\n", marker, address, line))?;
            }
        }
        "labels" => {
            for (name, address) in session.labels.iter() {
                interface.write_fmt(format_args!("{:3} {}\n", address, name))?;
            }
        }
        "pin" => match (arg(1), arg(2)) {
            (Some(n), value) if n <= u8::max_value() as usize => {
                let n = n as u8;
                let result = match value {
                    Some(v) => session.vm.set_pin(n, (v & 0xFF) as u8).map(|_| None),
                    None => session.vm.pin(n).map(Some),
                };
                match result {
                    Ok(Some(value)) => {
                        interface.write_fmt(format_args!("@{} = {}\n", n, pin_text(value)))?
                    }
                    Ok(None) => {}
                    Err(error) => interface.write_fmt(format_args!(
                        "{}\n",
                        Style::new().bold().paint(error.to_string())
                    ))?,
                }
            }
            _ => interface.write_fmt(format_args!("?PIN NUMBER REQUIRED\n"))?,
        },
        "release" => session.vm.release(),
        "reset" => {
            session.vm.reset();
            interface.write_fmt(format_args!("{}\n", session.regs()))?;
        }
        "x" | "y" | "r" => {
            let reg = Register::from_name(words[0]).unwrap_or(Register::X);
            match arg(1) {
                Some(v) => session.vm.register_set(reg, (v & 0xFF) as u8),
                None => interface.write_fmt(format_args!(
                    "{} = {}\n",
                    reg,
                    session.vm.register_get(reg)
                ))?,
            }
        }
        _ => interface.write_fmt(format_args!("?UNKNOWN COMMAND; TRY HELP\n"))?,
    }
    Ok(true)
}

fn pin_text(value: Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        other => other.payload().to_string(),
    }
}
