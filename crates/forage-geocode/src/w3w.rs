//! [`W3wClient`] — async client for the what3words v3 API.

use std::time::Duration;

use forage_core::{
  geocode::Geocoder,
  spot::{Coordinates, GeoAddress},
};
use reqwest::Client;
use serde::Deserialize;

use crate::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://api.what3words.com";

/// Async what3words v3 client.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. Failures
/// are surfaced as-is; there is no retry.
#[derive(Clone)]
pub struct W3wClient {
  client:   Client,
  base_url: String,
  api_key:  String,
}

impl W3wClient {
  pub fn new(api_key: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self {
      client,
      base_url: DEFAULT_BASE_URL.to_owned(),
      api_key: api_key.into(),
    })
  }

  /// Point the client at a different endpoint (self-hosted gateway, test
  /// server).
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.base_url.trim_end_matches('/'))
  }

  async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    if resp.status().is_success() {
      return Ok(resp);
    }
    let status = resp.status();
    match resp.json::<ErrorEnvelope>().await {
      Ok(env) => Err(Error::Api {
        code:    env.error.code,
        message: env.error.message,
      }),
      Err(_) => Err(Error::Api {
        code:    status.to_string(),
        message: "malformed error body".to_owned(),
      }),
    }
  }
}

impl Geocoder for W3wClient {
  type Error = Error;

  /// `GET /v3/convert-to-coordinates?words=<addr>&key=<key>`
  async fn address_to_coordinates(
    &self,
    address: &GeoAddress,
  ) -> Result<Coordinates> {
    let resp = self
      .client
      .get(self.url("/v3/convert-to-coordinates"))
      .query(&[("words", address.as_str()), ("key", self.api_key.as_str())])
      .send()
      .await?;

    let body: ConvertResponse = Self::check(resp).await?.json().await?;
    Ok(Coordinates {
      lat: body.coordinates.lat,
      lng: body.coordinates.lng,
    })
  }

  /// `GET /v3/convert-to-3wa?coordinates=<lat>,<lng>&key=<key>`
  async fn coordinates_to_address(
    &self,
    coords: Coordinates,
  ) -> Result<GeoAddress> {
    let pair = format!("{},{}", coords.lat, coords.lng);
    let resp = self
      .client
      .get(self.url("/v3/convert-to-3wa"))
      .query(&[("coordinates", pair.as_str()), ("key", self.api_key.as_str())])
      .send()
      .await?;

    let body: ConvertResponse = Self::check(resp).await?.json().await?;
    Ok(GeoAddress::parse(&body.words)?)
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

/// The fields of the conversion responses we consume; everything else
/// (country, square, nearestPlace, map) is ignored.
#[derive(Debug, Deserialize)]
struct ConvertResponse {
  coordinates: ApiCoordinates,
  words:       String,
}

#[derive(Debug, Deserialize)]
struct ApiCoordinates {
  lat: f64,
  lng: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
  error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
  code:    String,
  message: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_convert_payload() {
    let body = r#"{
      "country": "GB",
      "square": {
        "southwest": { "lng": -0.195543, "lat": 51.520833 },
        "northeast": { "lng": -0.195499, "lat": 51.520860 }
      },
      "nearestPlace": "Bayswater, London",
      "coordinates": { "lng": -0.195521, "lat": 51.520847 },
      "words": "filled.count.soap",
      "language": "en",
      "map": "https://w3w.co/filled.count.soap"
    }"#;

    let parsed: ConvertResponse = serde_json::from_str(body).unwrap();
    assert_eq!(parsed.words, "filled.count.soap");
    assert_eq!(parsed.coordinates.lat, 51.520847);
    assert_eq!(parsed.coordinates.lng, -0.195521);
  }

  #[test]
  fn parses_error_envelope() {
    let body = r#"{
      "error": { "code": "BadWords", "message": "words not found" }
    }"#;

    let parsed: ErrorEnvelope = serde_json::from_str(body).unwrap();
    assert_eq!(parsed.error.code, "BadWords");
    assert_eq!(parsed.error.message, "words not found");
  }
}
