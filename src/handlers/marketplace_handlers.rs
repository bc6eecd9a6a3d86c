use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use axum_extra::extract::{Query, QueryRejection};
use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{
    self, Activity, Collection, CollectionSummary, LaunchpadProject, NftDetail, NftListing,
    TrendingCollection,
};
use crate::dto::{
    CollectionNftsQuery, CollectionTraitsResponse, NftDetailQuery, SearchQuery, SearchResponse,
};
use crate::errors::ApiError;
use crate::metadata::HyperScanClient;
use crate::state::AppState;

/// Resolves an optional collection key, falling back to the default collection
fn resolve_collection(key: Option<&str>) -> Result<&'static Collection, ApiError> {
    match key {
        None => Ok(catalog::default_collection()),
        Some(key) => catalog::find_collection(key)
            .ok_or_else(|| ApiError::NotFound(format!("Collection '{}'", key))),
    }
}

/// Overlays HyperScan names and images onto a page of listings
///
/// Lookups run concurrently. Tokens whose lookup fails keep their fixture data.
async fn apply_remote_metadata(client: &HyperScanClient, listings: &mut [NftListing]) {
    let mut tasks = JoinSet::new();
    for (index, listing) in listings.iter().enumerate() {
        let client = client.clone();
        let contract = listing.contract.clone();
        let token_id = listing.token_id;
        tasks.spawn(async move { (index, client.fetch(&contract, token_id).await) });
    }

    let mut applied = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Some(remote))) => {
                listings[index].apply_remote(remote);
                applied += 1;
            }
            Ok((_, None)) => {}
            Err(err) => warn!("Metadata lookup task failed: {}", err),
        }
    }

    debug!("Applied remote metadata to {} of {} listings", applied, listings.len());
}

/// Handler for the trending collections
///
/// This function handles GET requests to `/api/trending-collections`.
///
/// ### Returns
///
/// One entry per fixture collection, with preview NFTs and marketplace links
#[instrument]
pub async fn trending_collections_handler() -> Json<Vec<TrendingCollection>> {
    debug!("Listing trending collections");
    Json(catalog::trending_collections())
}

/// Handler for the collection summaries
///
/// This function handles GET requests to `/api/collections`.
#[instrument]
pub async fn list_collections_handler() -> Json<Vec<CollectionSummary>> {
    debug!("Listing collections");
    Json(catalog::collections())
}

/// Handler for retrieving one collection
///
/// This function handles GET requests to `/api/collections/{id}`.
///
/// ### Arguments
///
/// * `collection_id` - The collection id or slug, extracted from the URL path
///
/// ### Returns
///
/// The collection's trending entry, or 404 when no collection matches
#[instrument(skip_all)]
pub async fn get_collection_handler(
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TrendingCollection>, ApiError> {
    let Path(collection_id) = path?;
    debug!("Retrieving collection {}", collection_id);

    let collection = catalog::collection(&collection_id)
        .ok_or_else(|| ApiError::NotFound(format!("Collection '{}'", collection_id)))?;

    Ok(Json(collection))
}

/// Handler for a page of NFT listings
///
/// This function handles GET requests to `/api/collection-nfts`.
///
/// ### Arguments
///
/// * `state` - The application state, for the optional HyperScan client
/// * `query` - `collection`, `count` and `start` query parameters
///
/// ### Returns
///
/// The listings, with remote names and images applied when enabled
#[instrument(skip_all)]
pub async fn collection_nfts_handler(
    State(state): State<AppState>,
    query: Result<Query<CollectionNftsQuery>, QueryRejection>,
) -> Result<Json<Vec<NftListing>>, ApiError> {
    let Query(query) = query?;
    let collection = resolve_collection(query.collection.as_deref())?;

    let mut listings = {
        let mut rng = rand::rng();
        catalog::collection_nfts(collection, query.count, query.start, &mut rng)
    };

    if let Some(client) = &state.metadata {
        apply_remote_metadata(client, &mut listings).await;
    }

    info!("Serving {} listings from {}", listings.len(), collection.id);

    Ok(Json(listings))
}

/// Handler for a single NFT
///
/// This function handles GET requests to `/api/nft/{token_id}`.
///
/// ### Arguments
///
/// * `token_id` - The token id, extracted from the URL path
/// * `query` - Optional `collection` query parameter
///
/// ### Returns
///
/// The token's detail view, or 404 when the id is outside the collection
#[instrument(skip_all)]
pub async fn nft_detail_handler(
    path: Result<Path<u32>, PathRejection>,
    query: Result<Query<NftDetailQuery>, QueryRejection>,
) -> Result<Json<NftDetail>, ApiError> {
    let Path(token_id) = path?;
    let Query(query) = query?;
    let collection = resolve_collection(query.collection.as_deref())?;

    debug!("Retrieving token {} from {}", token_id, collection.id);

    let detail = catalog::nft_detail(collection, token_id)
        .ok_or_else(|| ApiError::NotFound(format!("Token {}", token_id)))?;

    Ok(Json(detail))
}

/// Handler for searching a collection
///
/// This function handles GET requests to `/api/nfts/search`.
///
/// ### Arguments
///
/// * `query` - `q`, repeated `trait=Type:Value` filters, `limit` and `collection`
///
/// ### Returns
///
/// Matching listings in token id order, or 400 when neither text nor a
/// filter was given or a filter is malformed
#[instrument(skip_all)]
pub async fn search_nfts_handler(
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(query) = query?;
    let collection = resolve_collection(query.collection.as_deref())?;
    let (text, filters) = query.criteria().map_err(ApiError::Validation)?;

    let results = catalog::search_nfts(collection, &text, &filters, query.limit);
    debug!("Search '{}' with {} filters matched {} tokens", text, filters.len(), results.len());

    Ok(Json(SearchResponse {
        collection: collection.id.to_string(),
        query: text,
        count: results.len(),
        results,
    }))
}

/// Handler for a collection's trait index
///
/// This function handles GET requests to `/api/collections/{id}/traits`.
#[instrument(skip_all)]
pub async fn collection_traits_handler(
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<CollectionTraitsResponse>, ApiError> {
    let Path(collection_id) = path?;
    let collection = resolve_collection(Some(&collection_id))?;

    Ok(Json(CollectionTraitsResponse {
        collection: collection.id.to_string(),
        traits: catalog::collection_traits(collection),
    }))
}

/// Handler for the launchpad
///
/// This function handles GET requests to `/api/launchpad`.
#[instrument]
pub async fn launchpad_handler() -> Json<Vec<LaunchpadProject>> {
    Json(catalog::launchpad(Utc::now()))
}

/// Handler for the simulated activity feed
///
/// This function handles GET requests to `/api/activities`.
#[instrument]
pub async fn activities_handler() -> Json<Vec<Activity>> {
    let mut rng = rand::rng();
    Json(catalog::activities(&mut rng, Utc::now()))
}
