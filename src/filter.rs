use crate::config::FilterConfig;
use crate::model::Record;

/// True when `record` passes every predicate in `config`.
pub fn is_valid_record(record: &Record, config: &FilterConfig) -> bool {
    // missing position never matches the box
    let (lat, lon) = match (record.lat, record.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return false,
    };

    // outside ROI range.
    if !config.bounding_box.contains(lat, lon) {
        return false;
    }

    if config
        .exclusion_regions
        .iter()
        .any(|region| region.contains(lat, lon))
    {
        return false;
    }

    // exclude moored | anchor | aground status
    if config.excluded_statuses.contains(&record.status) {
        return false;
    }

    if !config.included_mobile_types.is_empty()
        && !config.included_mobile_types.contains(&record.mobile_type)
    {
        return false;
    }

    if config.excluded_ship_types.contains(&record.ship_type) {
        return false;
    }

    true
}
