use serde::{Deserialize, Serialize};

// Upstream DigitalForecast XML document. Attributes are `@name`, element
// text is `$text`; anything upstream leaves out defaults to empty.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BmkgDocument {
    pub forecast: BmkgForecast,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BmkgForecast {
    #[serde(rename = "@domain", default)]
    pub domain: String,
    #[serde(default)]
    pub issue: BmkgIssue,
    #[serde(rename = "area", default)]
    pub areas: Vec<BmkgArea>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BmkgIssue {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub hour: String,
    #[serde(default)]
    pub minute: String,
    #[serde(default)]
    pub second: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BmkgArea {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@latitude", default)]
    pub latitude: String,
    #[serde(rename = "@longitude", default)]
    pub longitude: String,
    #[serde(rename = "@coordinate", default)]
    pub coordinate: String,
    #[serde(rename = "@type", default)]
    pub area_type: String,
    #[serde(rename = "@region", default)]
    pub region: String,
    #[serde(rename = "@level", default)]
    pub level: String,
    #[serde(rename = "@description", default)]
    pub description: String,
    #[serde(rename = "@domain", default)]
    pub domain: String,
    #[serde(rename = "@tags", default)]
    pub tags: String,
    #[serde(rename = "name", default)]
    pub names: Vec<BmkgName>,
    #[serde(rename = "parameter", default)]
    pub parameters: Vec<BmkgParameter>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BmkgName {
    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BmkgParameter {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@description", default)]
    pub description: String,
    #[serde(rename = "@type", default)]
    pub parameter_type: String,
    #[serde(rename = "timerange", default)]
    pub timeranges: Vec<BmkgTimerange>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BmkgTimerange {
    #[serde(rename = "@type", default)]
    pub range_type: String,
    #[serde(rename = "@h", default)]
    pub hour: String,
    #[serde(rename = "@datetime", default)]
    pub datetime: String,
    #[serde(rename = "value", default)]
    pub values: Vec<BmkgValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BmkgValue {
    #[serde(rename = "@unit", default)]
    pub unit: String,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// Measurement series codes the upstream feed uses in `parameter/@id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Humidity,
    Temperature,
    WindSpeed,
    MinTemperature,
    MaxTemperature,
    MinHumidity,
    MaxHumidity,
    Weather,
    WindDirection,
}

impl ParameterKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "hu" => Some(Self::Humidity),
            "t" => Some(Self::Temperature),
            "ws" => Some(Self::WindSpeed),
            "tmin" => Some(Self::MinTemperature),
            "tmax" => Some(Self::MaxTemperature),
            "humin" => Some(Self::MinHumidity),
            "humax" => Some(Self::MaxHumidity),
            "weather" => Some(Self::Weather),
            "wd" => Some(Self::WindDirection),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub coordinate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub label: String,
    pub value: String,
}

/// One timerange of a measurement series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    #[serde(rename = "type")]
    pub parameter_type: String,
    pub description: String,
    pub hour: String,
    pub date: String,
    pub time: String,
    pub scheme: Vec<Scheme>,
}

/// Normalized forecast for a single area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    pub territory: Territory,
    pub humidity: Vec<ParameterEntry>,
    pub temperature: Vec<ParameterEntry>,
    pub wind_speed: Vec<ParameterEntry>,
    pub min_temperature: Vec<ParameterEntry>,
    pub max_temperature: Vec<ParameterEntry>,
    pub min_humidity: Vec<ParameterEntry>,
    pub max_humidity: Vec<ParameterEntry>,
    pub weather: Vec<ParameterEntry>,
    pub wind_direction: Vec<ParameterEntry>,
}

impl ForecastRecord {
    pub fn series_mut(&mut self, kind: ParameterKind) -> &mut Vec<ParameterEntry> {
        match kind {
            ParameterKind::Humidity => &mut self.humidity,
            ParameterKind::Temperature => &mut self.temperature,
            ParameterKind::WindSpeed => &mut self.wind_speed,
            ParameterKind::MinTemperature => &mut self.min_temperature,
            ParameterKind::MaxTemperature => &mut self.max_temperature,
            ParameterKind::MinHumidity => &mut self.min_humidity,
            ParameterKind::MaxHumidity => &mut self.max_humidity,
            ParameterKind::Weather => &mut self.weather,
            ParameterKind::WindDirection => &mut self.wind_direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Province {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
}
