use std::process::ExitCode;

fn main() -> ExitCode {
    match hardhat_run::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = hardhat_run::cli::report_error(&err);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
