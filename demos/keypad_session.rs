//! Keypad Session
//!
//! This example drives the calculator the way a keypad screen would.
//!
//! Key concepts:
//! - Dispatching key events and reading the readout after each one
//! - Selecting policies at construction time
//! - Inspecting the key history
//!
//! Run with: RUST_LOG=abacus=debug cargo run --example keypad_session

use abacus::config::EngineConfig;
use abacus::core::State;
use abacus::engine::Calculator;
use tracing_subscriber::EnvFilter;

fn show(calculator: &Calculator, script: &str) {
    let readout = calculator.readout();
    let highlighted = readout
        .active_operator
        .map(|op| op.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  {:<14} display: {:>12}   clear key: {:<2}   active: {}",
        script, readout.display, readout.clear_label, highlighted
    );
}

fn run_session(title: &str, config: EngineConfig, scripts: &[&str]) {
    println!("{title}");
    let mut calculator = match Calculator::with_config(config) {
        Ok(calculator) => calculator,
        Err(e) => {
            eprintln!("  invalid configuration: {e}");
            return;
        }
    };

    for script in scripts {
        if let Err(e) = calculator.press_script(script) {
            eprintln!("  {script}: {e}");
            continue;
        }
        show(&calculator, script);
    }

    let path: Vec<&str> = calculator
        .history()
        .get_path()
        .into_iter()
        .map(|phase| phase.name())
        .collect();
    println!("  path: {}\n", path.join(" -> "));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Keypad Session ===\n");

    run_session(
        "Classic policies:",
        EngineConfig::classic(),
        &["1 2", "+", "%", "7", "=", "=", "÷ 0 =", "+", "C"],
    );

    run_session(
        "Forgiving policies:",
        EngineConfig::forgiving(),
        &["2", "×", "3", "=", "=", "÷ 0 =", "+ 9 =", "AC"],
    );

    println!("=== Example Complete ===");
}
