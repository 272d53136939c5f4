// Gateway trait for backend access
use crate::domain::instruction::Instruction;
use crate::domain::mapping::PolarSample;
use crate::domain::status::{BatteryLevel, StatusMessage};
use async_trait::async_trait;

/// Port to the rover backend, consumed by the input reducer and the poll
/// loops. Poll methods convert every transport failure to a sentinel at this
/// boundary (`None` / empty vec) and log it; callers treat all failures
/// uniformly as "no data this tick". Sending is fire-and-forget: the caller
/// logs a failure and moves on, there is no retry.
#[async_trait]
pub trait RoverGateway: Send + Sync {
    /// POST one instruction to the backend.
    async fn send_instruction(&self, instruction: Instruction) -> anyhow::Result<()>;

    /// Most recent battery level, if the backend has one.
    async fn latest_battery(&self) -> Option<BatteryLevel>;

    /// Most recent monitor message, if the backend has one.
    async fn latest_message(&self) -> Option<StatusMessage>;

    /// Most recent mapping sample, if the backend has one.
    async fn latest_mapping_value(&self) -> Option<PolarSample>;

    /// All pending mapping samples; empty on error or when none exist.
    async fn mapping_values(&self) -> Vec<PolarSample>;
}
