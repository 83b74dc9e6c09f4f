mod cli;
mod flow;

use apply_assist::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
