use architecture::{MutableRepository, ReadOnlyRepository};
use chrono::{DateTime, Utc};
use domain_fleet::{
    model::{
        entity::{ReservationOwner, VehicleReservation},
        vo::VehicleRequest,
    },
    repository::ReservationRepo,
};
use domain_maintenance::exception::MaintenanceResult;
use uuid::Uuid;

pub(crate) async fn open(
    repo: &dyn ReservationRepo,
    owner: ReservationOwner,
    request: &VehicleRequest,
    now: DateTime<Utc>,
) -> MaintenanceResult<Uuid> {
    let reservation = VehicleReservation::open(owner, request, now)?;
    repo.insert(&reservation).await?;
    tracing::info!(
        "Reserved vehicle {} for {owner:?} as {}",
        reservation.vehicle_id,
        reservation.id
    );
    Ok(reservation.id)
}

async fn active(
    repo: &dyn ReservationRepo,
    id: Option<Uuid>,
) -> MaintenanceResult<Option<VehicleReservation>> {
    let Some(id) = id else {
        return Ok(None);
    };
    Ok(repo.get_by_id(id).await?.filter(VehicleReservation::is_active))
}

/// Makes the owner's reservation follow its vehicle request: reschedules or
/// opens one when a vehicle is wanted, cancels it otherwise. Returns the
/// reservation id the owner should keep.
pub(crate) async fn reconcile(
    repo: &dyn ReservationRepo,
    owner: ReservationOwner,
    current: Option<Uuid>,
    wanted: Option<&VehicleRequest>,
    now: DateTime<Utc>,
) -> MaintenanceResult<Option<Uuid>> {
    let existing = active(repo, current).await?;
    match (existing, wanted) {
        (Some(mut reservation), Some(request)) => {
            reservation.reschedule(request, now)?;
            repo.update(&reservation).await?;
            Ok(Some(reservation.id))
        }
        (None, Some(request)) => Ok(Some(open(repo, owner, request, now).await?)),
        (Some(mut reservation), None) => {
            reservation.cancel(Some("Veículo não é mais necessário".to_string()), now)?;
            repo.update(&reservation).await?;
            Ok(None)
        }
        (None, None) => Ok(None),
    }
}

/// Cancels the reservation if it is still active.
pub(crate) async fn cancel_active(
    repo: &dyn ReservationRepo,
    id: Option<Uuid>,
    reason: &str,
    now: DateTime<Utc>,
) -> MaintenanceResult<()> {
    if let Some(mut reservation) = active(repo, id).await? {
        reservation.cancel(Some(reason.to_string()), now)?;
        repo.update(&reservation).await?;
    }
    Ok(())
}

/// The active reservation a finishing order returns, with the return
/// reading already checked against it.
pub(crate) async fn returning(
    repo: &dyn ReservationRepo,
    id: Option<Uuid>,
    odometer_end: Option<f64>,
) -> MaintenanceResult<Option<VehicleReservation>> {
    let reservation = active(repo, id).await?;
    if let Some(reservation) = &reservation {
        reservation.check_return(odometer_end)?;
    }
    Ok(reservation)
}

pub(crate) async fn finalize(
    repo: &dyn ReservationRepo,
    reservation: Option<VehicleReservation>,
    odometer_end: Option<f64>,
    now: DateTime<Utc>,
) -> MaintenanceResult<()> {
    if let Some(mut reservation) = reservation {
        reservation.finalize(odometer_end, now)?;
        repo.update(&reservation).await?;
    }
    Ok(())
}

/// Re-points an active reservation to `owner`. Returns its id when moved.
pub(crate) async fn transfer(
    repo: &dyn ReservationRepo,
    id: Option<Uuid>,
    owner: ReservationOwner,
    now: DateTime<Utc>,
) -> MaintenanceResult<Option<Uuid>> {
    let Some(mut reservation) = active(repo, id).await? else {
        return Ok(None);
    };
    reservation.transfer_to(owner, now);
    repo.update(&reservation).await?;
    Ok(Some(reservation.id))
}
