mod anomaly_sync;
mod execution;
mod order_generation;
mod programming;
mod reference;
mod reservation;
mod unit_of_work;

pub use anomaly_sync::AnomalySynchronizer;
pub use execution::OrderServiceImpl;
pub use programming::ProgrammingServiceImpl;
pub use unit_of_work::WorkflowSettings;
