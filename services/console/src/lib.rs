mod cli;
mod commands;

use vetting_dash::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
