/// Derive the area identifier from a display name: lowercase, spaces to hyphens.
///
/// The normalized forecast map and the area listing both key on this value,
/// so it must be the only place the derivation happens.
pub fn area_key(name: &str) -> String {
    name.replace(' ', "-").to_lowercase()
}

/// Date, hour and time pieces sliced out of an upstream `YYYYMMDDhhmm` timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampParts {
    pub date: String,
    pub hour: String,
    pub time: String,
}

/// Split an upstream timestamp by fixed byte offsets (0-4, 4-6, 6-8, 8-10, 10-12).
///
/// Anything after byte 12 is ignored. Returns `None` when the input is too
/// short or an offset falls inside a multi-byte character.
pub fn split_timestamp(datetime: &str) -> Option<TimestampParts> {
    let year = datetime.get(0..4)?;
    let month = datetime.get(4..6)?;
    let day = datetime.get(6..8)?;
    let hour = datetime.get(8..10)?;
    let minute = datetime.get(10..12)?;

    Some(TimestampParts {
        date: format!("{}-{}-{}", year, month, day),
        hour: hour.to_string(),
        time: format!("{}:{}", hour, minute),
    })
}
