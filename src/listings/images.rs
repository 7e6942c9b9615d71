use futures::stream::{self, StreamExt};

use crate::track::{Unit, UnitSource};

/// Pair every unit with its cover image URL.
///
/// At most `concurrency` lookups are in flight (1 = strictly sequential) and
/// output order always matches input order. A failed lookup is logged and
/// yields `None` for that unit only.
pub async fn resolve_pictures<S>(
    source: &S,
    units: Vec<Unit>,
    concurrency: usize,
) -> Vec<(Unit, Option<String>)>
where
    S: UnitSource + ?Sized,
{
    stream::iter(units)
        .map(move |unit| async move {
            let picture = cover_image(source, &unit).await;
            (unit, picture)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

async fn cover_image<S>(source: &S, unit: &Unit) -> Option<String>
where
    S: UnitSource + ?Sized,
{
    let Some(unit_id) = unit.id_segment() else {
        tracing::warn!(id = %unit.id, "Unit has no usable id, skipping image lookup");
        return None;
    };

    match source.fetch_cover_image(&unit_id).await {
        Ok(picture) => picture,
        Err(e) => {
            tracing::warn!(unit_id = %unit_id, error = %e, "Image fetch failed");
            None
        }
    }
}
