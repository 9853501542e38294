// src/bin/fetch_mlst.rs
use std::process::ExitCode;

use fetch_mlst::{cli, loge, MlstError};

fn main() -> ExitCode {
    if let Err(e) = color_eyre::install() {
        eprintln!("Warning: plain error reports ({e})");
    }

    match cli::run() {
        Ok(summary) => {
            println!("Wrote {}", summary.output.display());
            ExitCode::SUCCESS
        }
        Err(e @ MlstError::NoMatch { .. }) => {
            println!("No match found");
            ExitCode::from(e.exit_code())
        }
        Err(e @ MlstError::Usage(_)) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            let code = e.exit_code();
            if fetch_mlst::log::to_file() {
                loge!("{e}");
            }
            eprintln!("Error: {:?}", color_eyre::Report::new(e));
            ExitCode::from(code)
        }
    }
}
