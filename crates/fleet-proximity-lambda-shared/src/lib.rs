//! Shared infrastructure for fleet proximity AWS Lambda functions.
//!
//! - [`LambdaRuntime`]: configuration and long-lived AWS clients built once at cold start
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//! - [`DynamoMappingStore`] / [`DynamoVehicleStore`]: `GetItem` lookups
//! - [`SnsAlertPublisher`]: alert delivery to an SNS topic

#![deny(warnings)]

mod dynamo;
mod runtime;
mod sns;
mod tracing_init;

pub use dynamo::{attributes_from_sdk, DynamoMappingStore, DynamoVehicleStore};
pub use runtime::{build_runtime, get_runtime, init_runtime, AwsPipeline, InitError, LambdaRuntime};
pub use sns::SnsAlertPublisher;
pub use tracing_init::{init_tracing, LOG_LEVEL_VAR};
