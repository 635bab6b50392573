mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use investor_type::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
