use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::WeatherObservation;

use super::{FetchError, WeatherProvider};

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// OpenWeather current-weather API, queried by city name.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    units: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, units: String) -> Self {
        Self {
            api_key,
            units,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    humidity: u8,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

/// The exact field paths the survey extracts; anything else in the body
/// is ignored, and a body missing any of these fails deserialization.
#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    clouds: OwClouds,
    sys: OwSys,
    dt: i64,
    main: OwMain,
    coord: OwCoord,
    wind: OwWind,
}

impl From<OwCurrentResponse> for WeatherObservation {
    fn from(r: OwCurrentResponse) -> Self {
        WeatherObservation {
            cloudiness: r.clouds.all,
            country: r.sys.country,
            observed_at: r.dt,
            humidity: r.main.humidity,
            latitude: r.coord.lat,
            longitude: r.coord.lon,
            max_temp: r.main.temp_max,
            wind_speed: r.wind.speed,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_by_city(&self, city: &str) -> Result<WeatherObservation, FetchError> {
        let res = self
            .http
            .get(BASE_URL)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            // "city not found" arrives here as a 404; it gets no special
            // treatment relative to any other failure.
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Back up to a char boundary; localized error bodies are not ASCII.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "coord": {"lon": 168.86, "lat": -46.19},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds"}],
        "main": {"temp": 52.0, "temp_min": 50.0, "temp_max": 55.4, "humidity": 81},
        "wind": {"speed": 12.66, "deg": 250},
        "clouds": {"all": 75},
        "dt": 1700000000,
        "sys": {"country": "NZ", "sunrise": 1699990000, "sunset": 1700040000},
        "name": "Mataura"
    }"#;

    #[test]
    fn parses_the_eight_extracted_fields() {
        let parsed: OwCurrentResponse = serde_json::from_str(SAMPLE).unwrap();
        let obs = WeatherObservation::from(parsed);

        assert_eq!(obs.cloudiness, 75);
        assert_eq!(obs.country, "NZ");
        assert_eq!(obs.observed_at, 1_700_000_000);
        assert_eq!(obs.humidity, 81);
        assert_eq!(obs.latitude, -46.19);
        assert_eq!(obs.longitude, 168.86);
        assert_eq!(obs.max_temp, 55.4);
        assert_eq!(obs.wind_speed, 12.66);
    }

    #[test]
    fn missing_temp_max_fails_deserialization() {
        let body = r#"{
            "coord": {"lon": 0.0, "lat": 0.0},
            "main": {"temp": 52.0, "humidity": 81},
            "wind": {"speed": 1.0},
            "clouds": {"all": 0},
            "dt": 1700000000,
            "sys": {"country": "XX"}
        }"#;

        assert!(serde_json::from_str::<OwCurrentResponse>(body).is_err());
    }

    #[test]
    fn not_found_body_fails_deserialization() {
        let body = r#"{"cod": "404", "message": "city not found"}"#;
        assert!(serde_json::from_str::<OwCurrentResponse>(body).is_err());
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(500);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncation_respects_multibyte_char_boundaries() {
        // Byte 200 lands inside the two-byte 'é'; truncation must back
        // up instead of slicing through it.
        let body = format!("{}é{}", "x".repeat(199), "y".repeat(100));
        let truncated = truncate_body(&body);
        assert_eq!(truncated, format!("{}...", "x".repeat(199)));
    }
}
