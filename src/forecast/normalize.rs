use super::bmkg::BmkgError;
use super::types::*;
use crate::utils::{area_key, split_timestamp};
use std::collections::HashMap;

pub type ForecastMap = HashMap<String, ForecastRecord>;

/// Build the area-keyed forecast map from an upstream document.
///
/// Areas whose derived keys collide overwrite each other in document order.
/// Parameters with unknown codes are skipped.
pub fn normalize(doc: &BmkgDocument) -> Result<ForecastMap, BmkgError> {
    let mut areas = HashMap::with_capacity(doc.forecast.areas.len());

    for area in &doc.forecast.areas {
        let mut record = ForecastRecord {
            territory: Territory {
                name: area.description.clone(),
                latitude: area.latitude.clone(),
                longitude: area.longitude.clone(),
                coordinate: area.coordinate.clone(),
            },
            ..Default::default()
        };

        for parameter in &area.parameters {
            match ParameterKind::from_code(&parameter.id) {
                Some(kind) => *record.series_mut(kind) = parameter_entries(parameter)?,
                None => tracing::trace!(code = %parameter.id, "Skipping unknown parameter"),
            }
        }

        if areas.insert(area_key(&area.description), record).is_some() {
            tracing::debug!(area = %area.description, "Duplicate area key, keeping the later area");
        }
    }

    Ok(areas)
}

/// Flatten the forecast map. Order follows map iteration and is unspecified.
pub fn to_sequence(areas: ForecastMap) -> Vec<ForecastRecord> {
    areas.into_values().collect()
}

fn parameter_entries(parameter: &BmkgParameter) -> Result<Vec<ParameterEntry>, BmkgError> {
    parameter
        .timeranges
        .iter()
        .map(|range| {
            let parts = split_timestamp(&range.datetime)
                .ok_or_else(|| BmkgError::InvalidTimestamp(range.datetime.clone()))?;

            Ok(ParameterEntry {
                parameter_type: parameter.parameter_type.clone(),
                description: parameter.description.clone(),
                hour: parts.hour,
                date: parts.date,
                time: parts.time,
                scheme: range
                    .values
                    .iter()
                    .map(|v| Scheme {
                        label: v.unit.clone(),
                        value: v.value.clone(),
                    })
                    .collect(),
            })
        })
        .collect()
}
