use tracing::{error, info};

use crate::catalog::{CatalogApi, CatalogError, DetailsRequest};

/// Send the listing request for `filter` and return the raw response body.
///
/// Failures are logged here and handed back unchanged; there is no retry.
pub async fn fetch_listing<A>(api: &A, filter: &str) -> Result<Vec<u8>, CatalogError>
where
    A: CatalogApi + ?Sized,
{
    info!("Requesting catalog listing with filter: {}", filter);

    let request = DetailsRequest::for_filter(filter);
    match api.get_details(&request).await {
        Ok(body) => {
            info!("Received catalog listing ({} bytes)", body.len());
            Ok(body)
        }
        Err(e) => {
            error!("Catalog listing request failed: {}", e);
            Err(e)
        }
    }
}
