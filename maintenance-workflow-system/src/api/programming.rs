use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, post};
use architecture::PaginationResult;
use domain_maintenance::{
    model::{
        entity::{HistoryEntry, Programming},
        vo::{
            Approval, ApprovalOutcome, NewProgramming, ProgrammingFilter, ProgrammingPatch,
            Reason, Rejection,
        },
    },
    service::ProgrammingService,
};

use super::{extract_uuid, ok, Actor, ApiResult};

#[post("programming/Create")]
pub async fn create(
    service: Data<dyn ProgrammingService>,
    actor: Actor,
    input: Json<NewProgramming>,
) -> ApiResult<Programming> {
    ok(service.create(input.into_inner(), actor.0).await?)
}

#[get("programming/List")]
pub async fn list(
    service: Data<dyn ProgrammingService>,
    filter: Query<ProgrammingFilter>,
) -> ApiResult<PaginationResult<Programming>> {
    ok(service.list(filter.into_inner()).await?)
}

#[get("programming/Get/{id}")]
pub async fn get(service: Data<dyn ProgrammingService>, id: Path<String>) -> ApiResult<Programming> {
    let id = extract_uuid(&id)?;
    ok(service.get(id).await?)
}

#[post("programming/Update/{id}")]
pub async fn update(
    service: Data<dyn ProgrammingService>,
    actor: Actor,
    id: Path<String>,
    patch: Json<ProgrammingPatch>,
) -> ApiResult<Programming> {
    let id = extract_uuid(&id)?;
    ok(service.update(id, patch.into_inner(), actor.0).await?)
}

#[post("programming/Submit/{id}")]
pub async fn submit(
    service: Data<dyn ProgrammingService>,
    actor: Actor,
    id: Path<String>,
) -> ApiResult<Programming> {
    let id = extract_uuid(&id)?;
    ok(service.submit(id, actor.0).await?)
}

#[post("programming/Analyze/{id}")]
pub async fn analyze(
    service: Data<dyn ProgrammingService>,
    actor: Actor,
    id: Path<String>,
) -> ApiResult<Programming> {
    let id = extract_uuid(&id)?;
    ok(service.analyze(id, actor.0).await?)
}

#[post("programming/Approve/{id}")]
pub async fn approve(
    service: Data<dyn ProgrammingService>,
    actor: Actor,
    id: Path<String>,
    approval: Json<Approval>,
) -> ApiResult<ApprovalOutcome> {
    let id = extract_uuid(&id)?;
    ok(service.approve(id, approval.into_inner(), actor.0).await?)
}

#[post("programming/Reject/{id}")]
pub async fn reject(
    service: Data<dyn ProgrammingService>,
    actor: Actor,
    id: Path<String>,
    rejection: Json<Rejection>,
) -> ApiResult<Programming> {
    let id = extract_uuid(&id)?;
    ok(service.reject(id, rejection.into_inner(), actor.0).await?)
}

#[post("programming/Cancel/{id}")]
pub async fn cancel(
    service: Data<dyn ProgrammingService>,
    actor: Actor,
    id: Path<String>,
    reason: Json<Reason>,
) -> ApiResult<Programming> {
    let id = extract_uuid(&id)?;
    ok(service.cancel(id, reason.into_inner().reason, actor.0).await?)
}

#[delete("programming/Delete/{id}")]
pub async fn delete(
    service: Data<dyn ProgrammingService>,
    actor: Actor,
    id: Path<String>,
) -> ApiResult<()> {
    let id = extract_uuid(&id)?;
    ok(service.delete(id, actor.0).await?)
}

#[get("programming/History/{id}")]
pub async fn history(
    service: Data<dyn ProgrammingService>,
    id: Path<String>,
) -> ApiResult<Vec<HistoryEntry>> {
    let id = extract_uuid(&id)?;
    ok(service.history(id).await?)
}
