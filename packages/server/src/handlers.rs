//! HTTP handler functions for the crime nearby API.

use actix_web::{HttpResponse, web};
use crime_nearby_markers::{build_markers, to_feature_collection};
use crime_nearby_query_models::{FilterRequest, decode_body};
use crime_nearby_server_models::{ApiHealth, MarkerRequest};
use crime_nearby_source::lookup::lookup_nearby;

use crate::AppState;
use crate::error::ApiError;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /api/crimes`
///
/// Returns the street incidents inside the requested box that happened
/// around the current Chicago time of day, as the dataset's own JSON rows.
/// The body may be the request object or a JSON string wrapping it, and is
/// read regardless of content type.
pub async fn crimes(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, ApiError> {
    let request = FilterRequest::from_body(&body).inspect_err(|e| {
        log::warn!("Rejected crimes request: {e}");
    })?;

    let records = lookup_nearby(state.source.as_ref(), &request, (state.now)(), &state.lookup)
        .await
        .inspect_err(|e| log::error!("Failed to query incidents: {e}"))?;

    Ok(HttpResponse::Ok().json(records))
}

/// `POST /api/crimes/markers`
///
/// Same lookup as [`crimes`], returned as a GeoJSON `FeatureCollection` of
/// labelled points. A "You Are Here" point is included only when the body
/// carries `youAreHere`.
pub async fn crime_markers(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let request: MarkerRequest = decode_body(&body).inspect_err(|e| {
        log::warn!("Rejected markers request: {e}");
    })?;

    let records = lookup_nearby(
        state.source.as_ref(),
        &request.filter,
        (state.now)(),
        &state.lookup,
    )
    .await
    .inspect_err(|e| log::error!("Failed to query incidents: {e}"))?;

    let you_are_here = request.you_are_here.map(|[lon, lat]| (lon, lat));
    let markers = build_markers(&records, you_are_here);

    Ok(HttpResponse::Ok().json(to_feature_collection(&markers)))
}
