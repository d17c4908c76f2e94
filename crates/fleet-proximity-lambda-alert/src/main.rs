//! Lambda bootstrap binary for the proximity alert function.

use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    fleet_proximity_lambda_alert::run().await
}
