//! Weather lookup module.
//!
//! Provides a blocking HTTP client for the Open-Meteo forecast API, used to
//! annotate a note with the current temperature at a coordinate. The call is
//! best-effort: a failure surfaces as an error value for the UI to display
//! and never touches note state.

mod client;

pub use client::{WeatherClient, WeatherClientBuilder, WeatherError, WeatherProvider};
