//=========================================================================
// Generic Engine — Binary Entry Point
//
// initialize → run → shutdown, with the exit status reflecting how the
// loop ended:
//   quit (code n >= 0)   → n (saturating at 255)
//   quit (code n < 0)    → 1
//   frame failure        → 1
//   initialization error → 1
//
//=========================================================================

use std::process::ExitCode;

use generic_engine::{ApplicationBuilder, StopReason};
use log::{error, info};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app = ApplicationBuilder::new().build();

    let status = match app.initialize() {
        Ok(_) => match app.run() {
            Ok(reason) => {
                if let StopReason::FrameFailed(e) = &reason {
                    error!("{}", e);
                }
                ExitCode::from(reason.exit_status())
            }
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("Could not start: {}", e);
            ExitCode::FAILURE
        }
    };

    app.shutdown();
    info!("Exiting");

    status
}
