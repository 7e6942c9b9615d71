use futures::stream::{self, Stream, TryStreamExt};

use super::client::UnitSource;
use super::error::TrackError;
use super::models::Unit;

/// Lazy stream of every unit across pages, in upstream order.
///
/// Pages are requested one at a time starting at 1. The stream ends on an
/// empty page, on the upstream's invalid-page signal, or once `max_pages`
/// pages have been read (`0` disables the ceiling). Any other error ends the
/// stream with that error.
pub fn unit_stream<'a, S>(
    source: &'a S,
    page_size: u32,
    max_pages: u32,
) -> impl Stream<Item = Result<Unit, TrackError>> + Send + 'a
where
    S: UnitSource + ?Sized,
{
    stream::try_unfold(1u32, move |page| next_page(source, page, page_size, max_pages))
        .map_ok(|units| stream::iter(units.into_iter().map(Ok::<_, TrackError>)))
        .try_flatten()
}

/// Collect [`unit_stream`] into memory
pub async fn fetch_all_units<S>(source: &S, page_size: u32, max_pages: u32) -> Result<Vec<Unit>, TrackError>
where
    S: UnitSource + ?Sized,
{
    unit_stream(source, page_size, max_pages).try_collect().await
}

async fn next_page<S>(
    source: &S,
    page: u32,
    page_size: u32,
    max_pages: u32,
) -> Result<Option<(Vec<Unit>, u32)>, TrackError>
where
    S: UnitSource + ?Sized,
{
    if max_pages > 0 && page > max_pages {
        tracing::warn!(max_pages, "Page ceiling reached, stopping pagination");
        return Ok(None);
    }

    tracing::debug!(page, page_size, "Fetching units page");
    match source.fetch_units_page(page, page_size).await? {
        None => {
            tracing::debug!(page, "Invalid page, pagination complete");
            Ok(None)
        }
        Some(units) if units.is_empty() => {
            tracing::debug!(page, "Empty page, pagination complete");
            Ok(None)
        }
        Some(units) => Ok(Some((units, page + 1))),
    }
}
