//! Lambda runtime initialization: configuration plus long-lived AWS clients.
//!
//! The runtime is built once at cold start and reused across every
//! invocation served by the same execution environment. Only client handles
//! and configuration live here; no per-record state survives an invocation.
//!
//! # Cold-Start Logging
//!
//! Initialization logs `config_ms` (AWS shared config resolution) and
//! `total_init_ms`, to help identify cold-start bottlenecks.

use std::sync::OnceLock;
use std::time::Instant;

use aws_config::BehaviorVersion;
use tracing::{error, info};

use fleet_proximity_lib::{Config, Error as LibError, Pipeline};

use crate::dynamo::{DynamoMappingStore, DynamoVehicleStore};
use crate::sns::SnsAlertPublisher;

/// Pipeline wired to the production collaborators.
pub type AwsPipeline = Pipeline<DynamoMappingStore, DynamoVehicleStore, SnsAlertPublisher>;

/// Process-wide runtime, set once by [`init_runtime`].
static RUNTIME: OnceLock<LambdaRuntime> = OnceLock::new();

/// Error during runtime initialization.
#[derive(Debug, Clone)]
pub struct InitError {
    pub message: String,
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lambda initialization failed: {}", self.message)
    }
}

impl std::error::Error for InitError {}

impl From<LibError> for InitError {
    fn from(err: LibError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Initialized Lambda runtime holding the configuration and wired pipeline.
pub struct LambdaRuntime {
    config: Config,
    pipeline: AwsPipeline,
}

impl LambdaRuntime {
    /// Wire the AWS adapters for `config` from an already-loaded SDK config.
    pub fn from_sdk_config(config: Config, sdk_config: &aws_config::SdkConfig) -> Self {
        let dynamo = aws_sdk_dynamodb::Client::new(sdk_config);
        let sns = aws_sdk_sns::Client::new(sdk_config);

        let pipeline = Pipeline::new(
            DynamoMappingStore::new(dynamo.clone(), config.mapping_table.clone()),
            DynamoVehicleStore::new(dynamo, config.vehicle_table.clone()),
            SnsAlertPublisher::new(sns, config.topic_arn.clone()),
        );

        Self { config, pipeline }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pipeline(&self) -> &AwsPipeline {
        &self.pipeline
    }
}

/// Resolve configuration from the environment and load the AWS default
/// credential/region chain.
pub async fn build_runtime() -> Result<LambdaRuntime, InitError> {
    let total_start = Instant::now();

    let config = Config::from_env().inspect_err(|e| {
        error!(error = %e, "configuration is incomplete");
    })?;

    info!(
        mapping_table = %config.mapping_table,
        vehicle_table = %config.vehicle_table,
        device_table = %config.device_table,
        topic = %config.topic_arn,
        "configuration resolved"
    );

    let config_start = Instant::now();
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let config_ms = config_start.elapsed().as_millis();

    let runtime = LambdaRuntime::from_sdk_config(config, &sdk_config);

    info!(
        config_ms = config_ms,
        total_init_ms = total_start.elapsed().as_millis(),
        region = ?sdk_config.region(),
        "Lambda runtime initialization complete"
    );

    Ok(runtime)
}

/// Build the runtime on first call and return the shared instance.
///
/// Later calls return the instance built by the first successful call.
pub async fn init_runtime() -> Result<&'static LambdaRuntime, InitError> {
    if let Some(runtime) = RUNTIME.get() {
        return Ok(runtime);
    }

    let runtime = build_runtime().await.inspect_err(|e| {
        error!(error = %e, "Lambda runtime initialization failed");
    })?;

    Ok(RUNTIME.get_or_init(|| runtime))
}

/// Get the initialized runtime.
pub fn get_runtime() -> Result<&'static LambdaRuntime, InitError> {
    RUNTIME.get().ok_or_else(|| InitError {
        message: "runtime not initialized; call init_runtime() first".to_string(),
    })
}
