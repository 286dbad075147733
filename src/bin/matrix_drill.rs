use matrix_practice::cli::Args;
use matrix_practice::grader::AnswerSheet;
use matrix_practice::report::{render_matrix, render_report};
use matrix_practice::session::PracticeSession;
use std::io::{self, BufRead, Write};

fn main() {
    env_logger::init();

    let args = Args::parse_args();

    let request = match args.generation_request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut session = PracticeSession::new(args.generator_config());

    let grid = match session.generate(&request) {
        Ok(grid) => grid.clone(),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Matrix Math Practice: {} ({})",
        request.operation.name(),
        request.level.name()
    );
    println!("Each cell = Row {} Column", request.operation.symbol());
    println!();
    println!(
        "{}",
        render_matrix(&grid.row_values, &grid.col_values, request.operation)
    );
    println!();
    println!(
        "Enter {} comma-separated answers per row (leave a field blank to skip it).",
        grid.col_values.len()
    );

    let answers = match read_answers(&grid.row_values) {
        Ok(answers) => answers,
        Err(e) => {
            eprintln!("Error reading answers: {}", e);
            std::process::exit(1);
        }
    };

    let report = match session.submit(&answers) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("{}", render_report(&report, !args.no_color));
}

/// Reads one line per row; missing lines and fields count as blank answers
fn read_answers(row_values: &[i64]) -> io::Result<AnswerSheet> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut answers = AnswerSheet::new();

    for (i, row_value) in row_values.iter().enumerate() {
        print!("Row {} ({}): ", i + 1, row_value);
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => String::new(),
        };

        for (j, field) in line.split(',').enumerate() {
            answers.set(i, j, field);
        }
    }

    // Keep the report on its own line when answers came from a pipe
    println!();

    Ok(answers)
}
