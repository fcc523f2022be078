//! HTTP handlers for Orders API

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{
    JsonBody, QueryParams, ValidatedJson,
    errors::{
        handlers::not_found,
        responses::{
            BadRequestQueryResponse, BadRequestValidationResponse, InternalServerErrorResponse,
            NotFoundResponse,
        },
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{
    CreateOrder, DeleteOrderResponse, Order, OrderFilter, OrderStatus, UpdateOrder,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

#[derive(OpenApi)]
#[openapi(
    paths(list_orders, create_order, get_order, update_order, delete_order),
    components(
        schemas(Order, OrderStatus, CreateOrder, UpdateOrder, OrderFilter, DeleteOrderResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestQueryResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Orders", description = "Order management endpoints")
    )
)]
pub struct ApiDoc;

pub fn router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .with_state(Arc::new(service))
}

/// List orders in ascending `_id` order
#[utoipa::path(
    get,
    path = "",
    tag = "Orders",
    params(OrderFilter),
    responses(
        (status = 200, description = "Page of orders", body = Vec<Order>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    QueryParams(filter): QueryParams<OrderFilter>,
) -> OrderResult<Json<Vec<Order>>> {
    Ok(Json(service.list_orders(filter).await?))
}

/// Place an order
#[utoipa::path(
    post,
    path = "",
    tag = "Orders",
    request_body = CreateOrder,
    responses(
        (status = 200, description = "Order created", body = Order),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, description = "An order with this _id already exists"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<Json<Order>> {
    let order = service.create_order(input).await?;
    Ok(Json(order))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Orders",
    params(
        ("id" = String, Path, description = "Order _id")
    ),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<String>,
) -> OrderResult<Response> {
    match service.get_order(&id).await? {
        Some(order) => Ok(Json(order).into_response()),
        None => Ok(not_found().await),
    }
}

/// Edit an order
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Orders",
    params(
        ("id" = String, Path, description = "Order _id")
    ),
    request_body = UpdateOrder,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<String>,
    JsonBody(change): JsonBody<UpdateOrder>,
) -> OrderResult<Json<Order>> {
    Ok(Json(service.update_order(&id, change).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Orders",
    params(
        ("id" = String, Path, description = "Order _id")
    ),
    responses(
        (status = 200, description = "Order deleted", body = DeleteOrderResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<String>,
) -> OrderResult<Json<DeleteOrderResponse>> {
    Ok(Json(service.delete_order(&id).await?))
}
