use std::process::ExitCode;

fn main() -> ExitCode {
    msamagi_lib::run()
}
