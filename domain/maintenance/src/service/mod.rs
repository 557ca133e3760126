mod anomaly;
mod asset;
mod order;
mod programming;

#[rustfmt::skip]
pub use {
    anomaly::AnomalyService,
    asset::AssetLookupService,
    order::OrderService,
    programming::ProgrammingService,
};
