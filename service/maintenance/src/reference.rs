use domain_maintenance::{
    exception::{MaintenanceException, MaintenanceResult},
    model::vo::AssetRef,
    service::AssetLookupService,
};

/// Fails with not-found on the first reference the registries do not know.
pub(crate) async fn ensure_exist(
    lookup: &dyn AssetLookupService,
    references: &[AssetRef],
) -> MaintenanceResult<()> {
    for reference in references {
        if !lookup.exists(*reference).await? {
            return Err(MaintenanceException::ReferenceNotFound {
                reference: *reference,
            });
        }
    }
    Ok(())
}
