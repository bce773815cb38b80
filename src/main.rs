use crate::core::system::{Startup, System};
use colored::Colorize;
use std::process::ExitCode;

mod core;
mod interface;
mod model;
mod platform;
mod ui;
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let system = match System::initialize() {
        Ok(Startup::Ready(system)) => system,
        Ok(Startup::Relaunched(code)) => return ExitCode::from(code),
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            return ExitCode::FAILURE;
        }
    };

    let outcome = system.run().await;
    system.terminate();
    outcome.exit_code()
}
