mod cli;
mod commands;
mod render;

use cvss_v3::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
