//! Intcode VM - CLI Entry Point
//!
//! Commands:
//! - `intcode run <program>` - Run a program file until it halts
//! - `intcode test` - Run the built-in self-test

use clap::{Parser, Subcommand};
use intcode::{load_program, Interpreter, Signal, StopReason, Suspension, VmState};

#[derive(Parser)]
#[command(name = "intcode")]
#[command(version = "0.1.0")]
#[command(about = "An interactive interpreter for integer-coded programs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program until it halts, printing every output value
    Run {
        /// Path to the program file (one line of comma-separated integers)
        program: String,
        /// Value supplied to every input request
        #[arg(short, long, default_value = "0")]
        input: i64,
        /// Maximum number of instructions to execute (default: 1000000)
        #[arg(short, long, default_value = "1000000")]
        max_cycles: u64,
        /// Dump the final machine state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            program,
            input,
            max_cycles,
            json,
        }) => {
            run_program(&program, input, max_cycles, json);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("Intcode VM v0.1.0");
            println!("An interactive interpreter for integer-coded programs");
            println!();
            println!("Use --help for available commands");
        }
    }
}

fn run_program(path: &str, input: i64, max_cycles: u64, json: bool) {
    println!("Running: {}", path);

    let code = match load_program(path) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Failed to load program: {}", e);
            std::process::exit(1);
        }
    };
    println!("Loaded {} cells", code.len());

    let mut vm = Interpreter::new(&code, input);

    println!();
    println!("--- Execution ---");

    // Step-driven so the cycle limit holds even when the program
    // loops without producing output
    while vm.is_running() && vm.cycles() < max_cycles {
        match vm.step() {
            Ok(Signal::Suspended(Suspension::ProducedOutput)) => {
                if let Some(value) = vm.last_output() {
                    println!("out: {}", value);
                }
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("fault at ip={}: {}", vm.ip(), e);
                break;
            }
        }
    }

    println!();
    println!("--- Result ---");
    println!("Cycles: {}", vm.cycles());
    println!("State:  {:?}", vm.state());
    match vm.last_output() {
        Some(value) => println!("Output: {}", value),
        None => println!("Output: (none)"),
    }

    if vm.is_running() && vm.cycles() >= max_cycles {
        println!();
        println!(
            "Reached max cycles limit ({}). Use --max-cycles to increase.",
            max_cycles
        );
    }

    if json {
        match serde_json::to_string_pretty(&vm) {
            Ok(dump) => println!("{}", dump),
            Err(e) => eprintln!("Failed to serialize state: {}", e),
        }
    }

    if vm.state() == VmState::Faulted {
        std::process::exit(1);
    }
}

fn run_self_test() {
    println!("--- Intcode VM Self-Test ---");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: halt-only program
    print!("Halt-only program... ");
    let mut vm = Interpreter::new(&[99], 0);
    if vm.run_until_halt(0) == Ok(None) && vm.is_halted() {
        println!("ok");
        passed += 1;
    } else {
        println!("FAILED");
        failed += 1;
    }

    // Test 2: positional add doubles cell zero
    print!("Positional add... ");
    let mut vm = Interpreter::new(&[1, 0, 0, 0, 99], 0);
    let ok = vm.run_until_halt(0).is_ok() && vm.memory().read(0) == Ok(2);
    if ok {
        println!("ok");
        passed += 1;
    } else {
        println!("FAILED");
        failed += 1;
    }

    // Test 3: large multiply is not truncated
    print!("Large multiply... ");
    let mut vm = Interpreter::new(&[1102, 34_915_192, 34_915_192, 7, 4, 7, 99, 0], 0);
    match vm.run_until_output(0) {
        Ok((Some(value), StopReason::ProducedOutput)) if value.to_string().len() >= 16 => {
            println!("ok ({})", value);
            passed += 1;
        }
        _ => {
            println!("FAILED");
            failed += 1;
        }
    }

    // Test 4: quine reproduces its own memory
    print!("Relative-mode quine... ");
    let program = [
        109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99,
    ];
    let mut vm = Interpreter::new(&program, 0);
    let mut outputs = Vec::new();
    loop {
        match vm.run_until_output(0) {
            Ok((Some(value), StopReason::ProducedOutput)) => outputs.push(value),
            Ok(_) => break,
            Err(_) => break,
        }
    }
    if outputs == program {
        println!("ok");
        passed += 1;
    } else {
        println!("FAILED");
        failed += 1;
    }

    // Test 5: echo across a suspension boundary
    print!("Input/output echo... ");
    let mut vm = Interpreter::new(&[3, 0, 4, 0, 99], 0);
    let consumed = vm.run_until_input_consumed(7);
    let echoed = vm.run_until_output(0);
    if consumed.is_ok() && echoed == Ok((Some(7), StopReason::ProducedOutput)) {
        println!("ok");
        passed += 1;
    } else {
        println!("FAILED");
        failed += 1;
    }

    println!();
    println!("Results: {} passed, {} failed", passed, failed);

    if failed > 0 {
        std::process::exit(1);
    }
    println!("All tests passed!");
}
