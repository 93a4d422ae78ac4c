use crate::domain::model::{Category, CategoryMaps, PivotGrid, ZoneMap};
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;

/// Pivots one zone map into columns headed by their zone ID.
///
/// Columns are first laid out in whatever order the map yields its zones,
/// then sorted by ascending zone ID. Names below the header row are sorted
/// by ordinal string comparison.
pub fn build_grid(map: &ZoneMap) -> PivotGrid {
    let mut positions: HashMap<i16, usize> = HashMap::with_capacity(map.zone_count());
    let mut columns: Vec<(i16, Vec<String>)> = Vec::with_capacity(map.zone_count());

    for (zone, name) in map.entries() {
        let position = *positions.entry(zone).or_insert_with(|| {
            columns.push((zone, vec![zone.to_string()]));
            columns.len() - 1
        });
        columns[position].1.push(name.to_string());
    }

    columns.sort_by_key(|(zone, _)| *zone);
    for (_, column) in &mut columns {
        // row 0 是區域代碼，不參與排序
        column[1..].sort();
    }

    PivotGrid::new(columns.into_iter().map(|(_, column)| column).collect())
}

/// Builds the three category grids on separate blocking tasks.
///
/// Each task owns its map, so nothing is shared between them. All tasks are
/// awaited before the first failure (in category order) is reported.
pub async fn pivot_categories(maps: CategoryMaps) -> Result<Vec<(Category, PivotGrid)>> {
    pivot_categories_with(maps, build_grid).await
}

async fn pivot_categories_with(
    maps: CategoryMaps,
    build: fn(&ZoneMap) -> PivotGrid,
) -> Result<Vec<(Category, PivotGrid)>> {
    let [express, standard, expedited] = maps.into_parts().map(|(category, map)| {
        let handle = tokio::task::spawn_blocking(move || {
            tracing::debug!("Pivoting {} zones for {}", map.zone_count(), category);
            build(&map)
        });
        (category, handle)
    });

    let (express_grid, standard_grid, expedited_grid) =
        tokio::join!(express.1, standard.1, expedited.1);

    let mut grids = Vec::with_capacity(Category::ALL.len());
    let mut first_error = None;

    for (category, joined) in [
        (express.0, express_grid),
        (standard.0, standard_grid),
        (expedited.0, expedited_grid),
    ] {
        match joined {
            Ok(grid) => grids.push((category, grid)),
            Err(e) => {
                tracing::error!("❌ Pivot task for {} failed: {}", category, e);
                if first_error.is_none() {
                    first_error = Some(EtlError::PivotTaskError {
                        category,
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(grids),
    }
}
