use std::process::ExitCode;

use clap::Parser;

use relm::cli::{self, Cli};
use relm::ui;

fn main() -> ExitCode {
    let args = Cli::parse();
    cli::init_tracing(args.verbose);

    match cli::run(args) {
        Ok(code) => code,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
