use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout the inventory service uses for flight times
const BACKEND_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

mod backend_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::BACKEND_TIME_FORMAT;

    pub fn serialize<S: Serializer>(value: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => s.serialize_str(&dt.format(BACKEND_TIME_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw {
            Some(s) if !s.is_empty() => NaiveDateTime::parse_from_str(&s, BACKEND_TIME_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    Scheduled,
    Delayed,
    Cancelled,
    Departed,
    Arrived,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "SCHEDULED",
            FlightStatus::Delayed => "DELAYED",
            FlightStatus::Cancelled => "CANCELLED",
            FlightStatus::Departed => "DEPARTED",
            FlightStatus::Arrived => "ARRIVED",
        }
    }

    /// Parse case-insensitively, e.g. from a command-line flag
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SCHEDULED" => Some(FlightStatus::Scheduled),
            "DELAYED" => Some(FlightStatus::Delayed),
            "CANCELLED" => Some(FlightStatus::Cancelled),
            "DEPARTED" => Some(FlightStatus::Departed),
            "ARRIVED" => Some(FlightStatus::Arrived),
            _ => None,
        }
    }
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FlightStatus::Scheduled => "Scheduled",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Cancelled => "Cancelled",
            FlightStatus::Departed => "Departed",
            FlightStatus::Arrived => "Arrived",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: Option<i64>,
    pub flight_number: String,
    pub airline: Option<String>,
    pub departure_city: Option<String>,
    pub arrival_city: Option<String>,
    #[serde(default, with = "backend_time")]
    pub departure_time: Option<NaiveDateTime>,
    #[serde(default, with = "backend_time")]
    pub arrival_time: Option<NaiveDateTime>,
    pub base_price: Option<f64>,
    pub status: Option<String>,
    pub status_description: Option<String>,
    pub total_seats: Option<i64>,
    pub available_seats: Option<i64>,
    pub economy_seats: Option<i64>,
    pub business_seats: Option<i64>,
    pub first_seats: Option<i64>,
}

impl Flight {
    /// "Beijing → Shanghai", with `?` for unknown cities
    pub fn route_display(&self) -> String {
        format!(
            "{} → {}",
            self.departure_city.as_deref().unwrap_or("?"),
            self.arrival_city.as_deref().unwrap_or("?")
        )
    }

    pub fn is_bookable(&self) -> bool {
        let open = matches!(
            self.status.as_deref().and_then(FlightStatus::parse),
            None | Some(FlightStatus::Scheduled) | Some(FlightStatus::Delayed)
        );
        open && self.available_seats.map(|n| n > 0).unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPage {
    #[serde(default)]
    pub flight_list: Vec<Flight>,
    pub total_elements: Option<i64>,
    pub total_pages: Option<i32>,
    pub current_page: Option<i32>,
    pub page_size: Option<i32>,
    pub has_next: Option<bool>,
    pub has_previous: Option<bool>,
    pub is_first: Option<bool>,
    pub is_last: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlightSortKey {
    DepartureTime,
    ArrivalTime,
    FlightNumber,
    Airline,
    BasePrice,
}

/// Filters for `GET /flights`. Unset fields are left out of the query
/// string so the backend applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FlightStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<FlightSortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

impl FlightQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.departure_city = Some(from.into());
        self.arrival_city = Some(to.into());
        self
    }

    pub fn departure_city(mut self, city: impl Into<String>) -> Self {
        self.departure_city = Some(city.into());
        self
    }

    pub fn arrival_city(mut self, city: impl Into<String>) -> Self {
        self.arrival_city = Some(city.into());
        self
    }

    pub fn airline(mut self, airline: impl Into<String>) -> Self {
        self.airline = Some(airline.into());
        self
    }

    pub fn flight_number(mut self, number: impl Into<String>) -> Self {
        self.flight_number = Some(number.into());
        self
    }

    pub fn between(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    pub fn status(mut self, status: FlightStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn page(mut self, page: u32, size: u32) -> Self {
        self.page = Some(page);
        self.size = Some(size);
        self
    }

    pub fn sort(mut self, key: FlightSortKey, direction: SortDirection) -> Self {
        self.sort_by = Some(key);
        self.sort_direction = Some(direction);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flight() {
        let json = r#"{"id": 3, "flightNumber": "CA123", "airline": "Air China",
            "departureCity": "Beijing", "arrivalCity": "Shanghai",
            "departureTime": "2025-03-05 14:30:00", "arrivalTime": "2025-03-05 16:45:00",
            "basePrice": 880.50, "status": "SCHEDULED", "statusDescription": "已安排",
            "createdTime": "2025-01-01 00:00:00", "totalSeats": 180, "availableSeats": 12}"#;

        let flight: Flight = serde_json::from_str(json).unwrap();
        assert_eq!(flight.flight_number, "CA123");
        assert_eq!(flight.route_display(), "Beijing → Shanghai");
        assert_eq!(
            flight.departure_time.unwrap().format("%H:%M").to_string(),
            "14:30"
        );
        assert_eq!(flight.base_price, Some(880.5));
        assert!(flight.is_bookable());
    }

    #[test]
    fn test_flight_missing_times() {
        let flight: Flight =
            serde_json::from_str(r#"{"flightNumber": "MU5101", "departureTime": null}"#).unwrap();
        assert!(flight.departure_time.is_none());
        assert!(flight.arrival_time.is_none());
        assert_eq!(flight.route_display(), "? → ?");
    }

    #[test]
    fn test_cancelled_or_full_flights_are_not_bookable() {
        let cancelled: Flight =
            serde_json::from_str(r#"{"flightNumber": "X1", "status": "CANCELLED"}"#).unwrap();
        assert!(!cancelled.is_bookable());

        let full: Flight =
            serde_json::from_str(r#"{"flightNumber": "X2", "availableSeats": 0}"#).unwrap();
        assert!(!full.is_bookable());
    }

    #[test]
    fn test_flight_page_defaults_empty_list() {
        let page: FlightPage = serde_json::from_str(r#"{"totalElements": 0}"#).unwrap();
        assert!(page.flight_list.is_empty());
        assert_eq!(page.total_elements, Some(0));
    }

    #[test]
    fn test_query_omits_unset_fields() {
        let query = FlightQuery::new()
            .route("Beijing", "Shanghai")
            .status(FlightStatus::Scheduled)
            .sort(FlightSortKey::BasePrice, SortDirection::Desc);
        let value = serde_json::to_value(&query).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "departureCity": "Beijing",
                "arrivalCity": "Shanghai",
                "status": "SCHEDULED",
                "sortBy": "basePrice",
                "sortDirection": "DESC"
            })
        );
        assert_eq!(serde_json::to_value(FlightQuery::new()).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!(FlightStatus::parse("delayed"), Some(FlightStatus::Delayed));
        assert_eq!(FlightStatus::parse("late"), None);
        assert_eq!(FlightStatus::Arrived.as_str(), "ARRIVED");
        assert_eq!(FlightStatus::Arrived.to_string(), "Arrived");
    }
}
