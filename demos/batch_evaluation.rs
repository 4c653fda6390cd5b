use calcrs::ast::{Evaluator, Parser};
use calcrs::postfix::{render, Compiler};

fn main() {
    pretty_env_logger::init();

    let expressions = [
        "2 + 3 * 4",
        "(2 + 3) * 4",
        "10 - 2 - 3",
        "-(1.5 * 2) / .5",
        "5 / 0",
        "2 & 3",
        "(1 + 2",
    ];

    for (expression, result) in expressions.iter().zip(calcrs::calculate_many(&expressions)) {
        match result {
            Ok(value) => println!("{:<20} = {}", expression, value),
            Err(err) => println!("{:<20} ! {}", expression, err),
        }
    }

    let ast = Parser::parse("-(1.5 * 2) / .5").expect("Failed to parse");
    println!("ast:     {}", ast);
    println!("postfix: {}", render(&Compiler::compile(&ast)));
    match Evaluator::new().evaluate(&ast) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
