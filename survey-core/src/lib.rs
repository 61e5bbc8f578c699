//! Core library for the `citysurvey` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Uniform coordinate sampling and offline nearest-city resolution
//! - The sequential weather fetch loop and dataset assembly
//! - CSV persistence and latitude scatter-chart rendering
//!
//! It is used by `survey-cli`, but can also be reused by other binaries or services.

pub mod chart;
pub mod cities;
pub mod config;
pub mod model;
pub mod provider;
pub mod report;
pub mod sample;
pub mod survey;

pub use cities::{CityIndex, resolve_cities};
pub use config::Config;
pub use model::{WeatherObservation, WeatherRecord};
pub use provider::{FetchError, WeatherProvider, openweather::OpenWeatherProvider};
pub use sample::{Coordinate, sample_coordinates};
