use crate::rules::schema::BandDef;
use rust_decimal::Decimal;

/// Select the band whose `[lower, upper)` interval contains `key_value`.
/// A value exactly on a boundary belongs to the higher band; the last band
/// is unbounded when its `upper` is unset. Returns `None` when the value
/// falls outside every band — the caller reports that, never coerces.
pub fn resolve(bands: &[BandDef], key_value: Decimal) -> Option<&BandDef> {
    bands.iter().find(|band| {
        key_value >= band.lower
            && match band.upper {
                Some(upper) => key_value < upper,
                None => true,
            }
    })
}
