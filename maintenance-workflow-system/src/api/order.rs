use actix_web::web::{Data, Json, Path, Query};
use actix_web::{get, post};
use architecture::PaginationResult;
use domain_maintenance::{
    model::{
        entity::{HistoryEntry, Order},
        vo::{
            ChecklistUpdate, FinishOrder, MaterialUpdate, OrderFilter, Reason, ScheduleOrder,
            StartOrder, TaskResolution, ToolUpdate,
        },
    },
    service::OrderService,
};

use super::{extract_uuid, ok, Actor, ApiResult};

#[get("order/List")]
pub async fn list(
    service: Data<dyn OrderService>,
    filter: Query<OrderFilter>,
) -> ApiResult<PaginationResult<Order>> {
    ok(service.list(filter.into_inner()).await?)
}

#[get("order/Get/{id}")]
pub async fn get(service: Data<dyn OrderService>, id: Path<String>) -> ApiResult<Order> {
    let id = extract_uuid(&id)?;
    ok(service.get(id).await?)
}

#[post("order/Schedule/{id}")]
pub async fn schedule(
    service: Data<dyn OrderService>,
    actor: Actor,
    id: Path<String>,
    plan: Json<ScheduleOrder>,
) -> ApiResult<Order> {
    let id = extract_uuid(&id)?;
    ok(service.schedule(id, plan.into_inner(), actor.0).await?)
}

#[post("order/Start/{id}")]
pub async fn start(
    service: Data<dyn OrderService>,
    actor: Actor,
    id: Path<String>,
    crew: Json<StartOrder>,
) -> ApiResult<Order> {
    let id = extract_uuid(&id)?;
    ok(service.start(id, crew.into_inner(), actor.0).await?)
}

#[post("order/StartFromProgramming/{programming_id}")]
pub async fn start_from_programming(
    service: Data<dyn OrderService>,
    actor: Actor,
    programming_id: Path<String>,
    crew: Json<StartOrder>,
) -> ApiResult<Order> {
    let programming_id = extract_uuid(&programming_id)?;
    ok(service.start_from_programming(programming_id, crew.into_inner(), actor.0).await?)
}

#[post("order/Pause/{id}")]
pub async fn pause(
    service: Data<dyn OrderService>,
    actor: Actor,
    id: Path<String>,
    reason: Json<Reason>,
) -> ApiResult<Order> {
    let id = extract_uuid(&id)?;
    ok(service.pause(id, reason.into_inner().reason, actor.0).await?)
}

#[post("order/Resume/{id}")]
pub async fn resume(
    service: Data<dyn OrderService>,
    actor: Actor,
    id: Path<String>,
    reason: Json<Reason>,
) -> ApiResult<Order> {
    let id = extract_uuid(&id)?;
    ok(service.resume(id, reason.into_inner().reason, actor.0).await?)
}

#[post("order/Checklist/{id}")]
pub async fn checklist(
    service: Data<dyn OrderService>,
    actor: Actor,
    id: Path<String>,
    update: Json<ChecklistUpdate>,
) -> ApiResult<Order> {
    let id = extract_uuid(&id)?;
    ok(service.update_checklist(id, update.into_inner(), actor.0).await?)
}

#[post("order/Materials/{id}")]
pub async fn materials(
    service: Data<dyn OrderService>,
    actor: Actor,
    id: Path<String>,
    update: Json<MaterialUpdate>,
) -> ApiResult<Order> {
    let id = extract_uuid(&id)?;
    ok(service.register_materials(id, update.into_inner(), actor.0).await?)
}

#[post("order/Tools/{id}")]
pub async fn tools(
    service: Data<dyn OrderService>,
    actor: Actor,
    id: Path<String>,
    update: Json<ToolUpdate>,
) -> ApiResult<Order> {
    let id = extract_uuid(&id)?;
    ok(service.register_tools(id, update.into_inner(), actor.0).await?)
}

#[post("order/CompleteTask/{id}/{task_id}")]
pub async fn complete_task(
    service: Data<dyn OrderService>,
    actor: Actor,
    path: Path<(String, String)>,
    resolution: Json<TaskResolution>,
) -> ApiResult<Order> {
    let (id, task_id) = path.into_inner();
    let (id, task_id) = (extract_uuid(&id)?, extract_uuid(&task_id)?);
    ok(service.complete_task(id, task_id, resolution.into_inner().note, actor.0).await?)
}

#[post("order/CancelTask/{id}/{task_id}")]
pub async fn cancel_task(
    service: Data<dyn OrderService>,
    actor: Actor,
    path: Path<(String, String)>,
    resolution: Json<TaskResolution>,
) -> ApiResult<Order> {
    let (id, task_id) = path.into_inner();
    let (id, task_id) = (extract_uuid(&id)?, extract_uuid(&task_id)?);
    ok(service.cancel_task(id, task_id, resolution.into_inner().note, actor.0).await?)
}

#[post("order/Finish/{id}")]
pub async fn finish(
    service: Data<dyn OrderService>,
    actor: Actor,
    id: Path<String>,
    result: Json<FinishOrder>,
) -> ApiResult<Order> {
    let id = extract_uuid(&id)?;
    ok(service.finish(id, result.into_inner(), actor.0).await?)
}

#[post("order/Cancel/{id}")]
pub async fn cancel(
    service: Data<dyn OrderService>,
    actor: Actor,
    id: Path<String>,
    reason: Json<Reason>,
) -> ApiResult<Order> {
    let id = extract_uuid(&id)?;
    ok(service.cancel(id, reason.into_inner().reason, actor.0).await?)
}

#[get("order/History/{id}")]
pub async fn history(
    service: Data<dyn OrderService>,
    id: Path<String>,
) -> ApiResult<Vec<HistoryEntry>> {
    let id = extract_uuid(&id)?;
    ok(service.history(id).await?)
}
