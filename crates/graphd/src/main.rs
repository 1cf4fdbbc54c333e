use std::process::ExitCode;

fn main() -> ExitCode {
    match graphd::run_daemon() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("graphd: {error}");
            ExitCode::FAILURE
        }
    }
}
