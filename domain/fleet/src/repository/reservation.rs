use architecture::DBRepository;
use async_trait::async_trait;

use crate::model::entity::{ReservationOwner, VehicleReservation};

#[async_trait]
pub trait ReservationRepo: DBRepository<VehicleReservation> + Send + Sync {
    /// Reservations currently pointing at the owner, in creation order.
    async fn get_by_owner(&self, owner: ReservationOwner)
        -> anyhow::Result<Vec<VehicleReservation>>;
}
