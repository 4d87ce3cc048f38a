use std::{
	io::{self, IsTerminal, Write},
	process::ExitCode,
};

use ariadne::{Label, Report, ReportKind, Source};
use clap::Parser;
use fairroll::{evaluate, roll::Describe, Error, Mode};

/// Max number of individual die faces listed per term
const LIST_LIMIT: usize = 20;

/// Rolls a dice expression like `2d6 + 1d4 + 3`
#[derive(Parser, Debug)]
#[command(name = "fairroll", version, about)]
struct Args {
	/// Roll twice and keep the higher total
	#[arg(short, long, conflicts_with_all = ["disadvantage", "mode"])]
	advantage: bool,

	/// Roll twice and keep the lower total
	#[arg(short, long, conflicts_with = "mode")]
	disadvantage: bool,

	/// Roll mode by name (normal, advantage or disadvantage)
	#[arg(short, long)]
	mode: Option<Mode>,

	/// Expression to roll; read from stdin when omitted
	#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
	expression: Vec<String>,
}

impl Args {
	/// Gets the mode selected by whichever option was given.
	fn mode(&self) -> Mode {
		if self.advantage {
			Mode::Advantage
		} else if self.disadvantage {
			Mode::Disadvantage
		} else {
			self.mode.unwrap_or_default()
		}
	}
}

fn main() -> ExitCode {
	pretty_env_logger::init();

	let args = Args::parse();
	let mode = args.mode();

	let input = if args.expression.is_empty() {
		let stdin = io::stdin();

		// Only prompt when someone is typing
		if stdin.is_terminal() {
			print!("Enter dice expression: ");
			if io::stdout().flush().is_err() {
				return ExitCode::FAILURE;
			}
		}

		// Grab the first line available from stdin
		match stdin.lines().next() {
			Some(Ok(line)) => line,
			_ => {
				eprintln!("No expression given");
				return ExitCode::FAILURE;
			}
		}
	} else {
		// Combine all remaining args so that the expression can be left unquoted even with spaces
		args.expression.join(" ")
	};

	match evaluate(&input, mode) {
		Ok(eval) => {
			println!("Expression: {} ({})", eval.expression(), eval.mode());
			for (idx, set) in eval.roll_sets().iter().enumerate() {
				let marker = if idx == eval.selected_index() { '*' } else { ' ' };
				println!("{marker} #{idx}: {} = {}", set.describe(Some(LIST_LIMIT)), set.total());
			}
			println!("Total: {}", eval.total());
			ExitCode::SUCCESS
		}
		Err(err) => {
			report(&input, &err);
			ExitCode::FAILURE
		}
	}
}

/// Prints a validation error, pointing at the offending part of the (whitespace-stripped) expression if possible.
fn report(input: &str, err: &Error) {
	let stripped = input.chars().filter(|c| !c.is_whitespace()).collect::<String>();

	match err.span() {
		Some(span) => {
			let printed = Report::build(ReportKind::Error, span.clone())
				.with_code(err.kind())
				.with_message(Error::CODE)
				.with_label(Label::new(span).with_message(err.to_string()))
				.finish()
				.eprint(Source::from(&stripped));
			if printed.is_err() {
				eprintln!("{}: {err}", err.kind());
			}
		}
		None => eprintln!("{}: {err}", err.kind()),
	}
}
