use crate::{diagnostics, error::ApiError, AppState};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use line_rpc::transport::Transport;
use sensor_bridge_protocol::{MeasurementKind, Reading};
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::debug;

pub type SharedState<T> = Arc<AppState<T>>;

/// Builds the full HTTP API.
///
/// Every measurement kind gets the same four endpoints under
/// `/api/{segment}/`, e.g. `/api/temp/` and `/api/temp/{index}`.
pub fn router<T: Transport + 'static>(state: SharedState<T>) -> Router {
    let mut router = Router::new();
    for kind in MeasurementKind::iter() {
        router = kind_routes(router, kind);
    }

    router
        .merge(diagnostics::routes::<SharedState<T>>())
        .fallback(diagnostics::not_found)
        .with_state(state)
}

fn kind_routes<T: Transport + 'static>(
    router: Router<SharedState<T>>,
    kind: MeasurementKind,
) -> Router<SharedState<T>> {
    let collection = format!("/api/{}/", kind.path_segment());
    let item = format!("/api/{}/{{index}}", kind.path_segment());

    router
        .route(
            &collection,
            get(move |State(state): State<SharedState<T>>| list_readings(state, kind)).post(
                move |State(state): State<SharedState<T>>| create_reading(state, kind),
            ),
        )
        .route(
            &item,
            get(
                move |State(state): State<SharedState<T>>, Path(index): Path<i64>| {
                    get_reading(state, kind, index)
                },
            )
            .delete(
                move |State(state): State<SharedState<T>>, Path(index): Path<i64>| {
                    delete_reading(state, kind, index)
                },
            ),
        )
}

async fn list_readings<T: Transport>(
    state: SharedState<T>,
    kind: MeasurementKind,
) -> Json<Vec<Reading>> {
    Json(state.readings.for_kind(kind).get_all().await)
}

async fn create_reading<T: Transport + 'static>(
    state: SharedState<T>,
    kind: MeasurementKind,
) -> Result<impl IntoResponse, ApiError> {
    let measurement = state.measurements.measure(kind).await?;
    let location = format!("/api/{}/{}", kind.path_segment(), measurement.index);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(measurement.reading),
    ))
}

async fn get_reading<T: Transport>(
    state: SharedState<T>,
    kind: MeasurementKind,
    index: i64,
) -> Result<Json<Reading>, ApiError> {
    let index = store_index(index)?;
    Ok(Json(state.readings.for_kind(kind).get(index).await?))
}

async fn delete_reading<T: Transport>(
    state: SharedState<T>,
    kind: MeasurementKind,
    index: i64,
) -> Result<Json<String>, ApiError> {
    let index = store_index(index)?;
    let reading = state.readings.for_kind(kind).remove(index).await?;
    debug!("Removed {kind} reading {reading:?} from index {index}");

    Ok(Json(format!("The value {reading} has been removed")))
}

/// Negative indices never address a reading.
fn store_index(index: i64) -> Result<usize, ApiError> {
    usize::try_from(index).map_err(|_| ApiError::IndexOutOfRange)
}
