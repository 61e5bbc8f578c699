use serde::Serialize;

/// Fields extracted from one successful current-weather response.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub cloudiness: u8,
    pub country: String,
    pub observed_at: i64,
    pub humidity: u8,
    pub latitude: f64,
    pub longitude: f64,
    pub max_temp: f64,
    pub wind_speed: f64,
}

/// One row of the survey table, keyed by city name.
///
/// All weather fields start unset; a successful fetch populates every
/// one of them, a failed fetch leaves the row empty. The serde renames
/// fix the CSV header and column order.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherRecord {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Cloudiness")]
    pub cloudiness: Option<u8>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Date")]
    pub observed_at: Option<i64>,
    #[serde(rename = "Humidity")]
    pub humidity: Option<u8>,
    #[serde(rename = "Lat")]
    pub latitude: Option<f64>,
    #[serde(rename = "Lng")]
    pub longitude: Option<f64>,
    #[serde(rename = "Max Temp")]
    pub max_temp: Option<f64>,
    #[serde(rename = "Wind Speed")]
    pub wind_speed: Option<f64>,
}

impl WeatherRecord {
    /// Row for a city whose fetch failed (or has not happened yet).
    pub fn unfetched(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            cloudiness: None,
            country: None,
            observed_at: None,
            humidity: None,
            latitude: None,
            longitude: None,
            max_temp: None,
            wind_speed: None,
        }
    }

    /// Row populated from a successful fetch.
    pub fn fetched(city: impl Into<String>, obs: WeatherObservation) -> Self {
        Self {
            city: city.into(),
            cloudiness: Some(obs.cloudiness),
            country: Some(obs.country),
            observed_at: Some(obs.observed_at),
            humidity: Some(obs.humidity),
            latitude: Some(obs.latitude),
            longitude: Some(obs.longitude),
            max_temp: Some(obs.max_temp),
            wind_speed: Some(obs.wind_speed),
        }
    }

    /// A record makes it into the final dataset iff the observation
    /// timestamp was parsed.
    pub fn is_usable(&self) -> bool {
        self.observed_at.is_some()
    }
}
