//! Inventory allocation: turn per-category forecast quantities into a
//! percentage split.

use crate::domain::{InventoryShare, InventorySplit};

/// Split `quantities` into shares of the total.
///
/// Negative quantities count as zero. Returns `None` when there is nothing to
/// split: no categories, or a total of zero.
pub fn allocate(quantities: &[(String, f64)], decimals: u32) -> Option<InventorySplit> {
    let cleaned: Vec<(String, f64)> = quantities
        .iter()
        .map(|(c, q)| (c.clone(), q.max(0.0)))
        .collect();

    let total: f64 = cleaned.iter().map(|(_, q)| q).sum();
    if cleaned.is_empty() || total <= 0.0 {
        return None;
    }

    let mut shares: Vec<InventoryShare> = cleaned
        .into_iter()
        .map(|(category, q)| InventoryShare {
            category,
            forecast_quantity: q,
            percent: round_to(100.0 * q / total, decimals),
        })
        .collect();

    shares.sort_by(|a, b| {
        b.forecast_quantity
            .total_cmp(&a.forecast_quantity)
            .then_with(|| a.category.cmp(&b.category))
    });

    Some(InventorySplit {
        shares,
        total_quantity: total,
        decimals,
    })
}

fn round_to(v: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (v * scale).round() / scale
}
