use crate::error::{CalcError, Result};
use crate::normalize::normalize;
use crate::types::GeoLookupRow;
use tracing::debug;

/// Normalized key of the only province that is split by city.
pub const BUENOS_AIRES: &str = "buenos_aires";

/// City value the geo table uses for province-wide rows.
pub const WHOLE_PROVINCE: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitySelection {
    WholeProvince,
    City(String),
}

impl CitySelection {
    /// Empty input and `-` both mean "no specific city".
    pub fn from_input(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == WHOLE_PROVINCE {
            CitySelection::WholeProvince
        } else {
            CitySelection::City(s.to_string())
        }
    }
}

/// Map a province/city choice to the region its statistics are published under.
///
/// Buenos Aires is resolved at city level only: a province-wide search over
/// its rows would return whichever city happens to be listed first.
pub fn resolve_region(
    province: &str,
    city: &CitySelection,
    geo: &[GeoLookupRow],
) -> Result<String> {
    let province_key = normalize(province);

    let found = if province_key == BUENOS_AIRES {
        let CitySelection::City(name) = city else {
            return Err(CalcError::RegionNotFound {
                what: "a city in Buenos Aires (none selected)".to_string(),
            });
        };
        let city_key = normalize(name);
        geo.iter()
            .find(|row| normalize(&row.provincia) == BUENOS_AIRES && normalize(&row.ciudad) == city_key)
            .ok_or_else(|| CalcError::RegionNotFound {
                what: format!("city \"{}\" in Buenos Aires", name),
            })?
    } else {
        let city_key = match city {
            CitySelection::WholeProvince => None,
            CitySelection::City(name) => Some(normalize(name)),
        };
        geo.iter()
            .find(|row| {
                normalize(&row.provincia) == province_key
                    && city_key
                        .as_deref()
                        .map_or(true, |c| normalize(&row.ciudad) == c)
            })
            .ok_or_else(|| CalcError::RegionNotFound {
                what: format!("province \"{}\"", province),
            })?
    };

    debug!(province, region = %found.region, "region resolved");
    Ok(found.region.clone())
}

/// Display names of the cities the geo table lists for a province, in table
/// order, without the province-wide sentinel.
pub fn cities_for(province: &str, geo: &[GeoLookupRow]) -> Vec<String> {
    let province_key = normalize(province);
    geo.iter()
        .filter(|row| normalize(&row.provincia) == province_key)
        .filter(|row| row.ciudad.trim() != WHOLE_PROVINCE)
        .map(|row| row.ciudad.clone())
        .collect()
}
