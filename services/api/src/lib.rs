mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use seller_profile::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
