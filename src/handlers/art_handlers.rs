use axum::{
    extract::{rejection::PathRejection, Path},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::{debug, instrument};

use crate::art::{self, ArtDocument, ArtMetadata};
use crate::errors::ApiError;

/// Handler for a token's generated art metadata
///
/// This function handles GET requests to `/api/art/{token_id}`.
///
/// ### Arguments
///
/// * `token_id` - The token id, extracted from the URL path
///
/// ### Returns
///
/// The metadata document, pointing at `/api/art/{token_id}/image.png`
#[instrument(skip_all)]
pub async fn art_metadata_handler(
    path: Result<Path<u32>, PathRejection>,
) -> Result<Json<ArtDocument>, ApiError> {
    let Path(token_id) = path?;
    debug!("Describing art for token {}", token_id);

    let document = ArtMetadata::generate(token_id)
        .to_document(format!("/api/art/{}/image.png", token_id));

    Ok(Json(document))
}

/// Handler for a token's rendered PNG
///
/// This function handles GET requests to `/api/art/{token_id}/image.png`.
/// Rendering runs on the blocking pool.
///
/// ### Returns
///
/// A 512x512 `image/png` body
#[instrument(skip_all)]
pub async fn art_image_handler(
    path: Result<Path<u32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(token_id) = path?;
    debug!("Rendering art for token {}", token_id);

    let png = tokio::task::spawn_blocking(move || art::token_png(token_id))
        .await
        .map_err(|err| ApiError::Render(err.to_string()))?
        .map_err(|err| ApiError::Render(format!("{:#}", err)))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}
