use calcrs::{Calculator, CalculatorConfig, Strategy};
use std::io::{self, BufRead, Write};

fn main() -> io::Result<()> {
    pretty_env_logger::init();

    let strategy = if std::env::args().any(|arg| arg == "--postfix") {
        Strategy::Postfix
    } else {
        Strategy::RecursiveDescent
    };
    let calculator = Calculator::new(CalculatorConfig::default().with_strategy(strategy));

    println!("Enter an expression, or 'exit' to quit.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "exit" | "quit" => break,
            "" => continue,
            expression => match calculator.calculate(expression) {
                Ok(result) => println!("{}", result),
                Err(err) => println!("Error: {}", err),
            },
        }
    }

    Ok(())
}
