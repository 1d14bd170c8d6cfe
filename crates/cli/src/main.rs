use std::process::ExitCode;

fn main() -> ExitCode {
    skumatch_cli::run()
}
