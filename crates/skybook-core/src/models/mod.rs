//! Typed payloads for the booking API.
//!
//! The API layer never decodes into these on its own; callers opt in by
//! choosing them as the result type of an `api` function.
//!
//! - `ApiResponse<T>`: the `{success, message, data}` envelope
//! - `Flight`, `FlightPage`, `FlightQuery`: inventory search
//! - `Order`, `OrderPage` and the two order creation bodies
//! - `User`, `Credentials`, `LoginResult`, `RegisterResult`

pub mod flight;
pub mod order;
pub mod response;
pub mod user;

pub use flight::{Flight, FlightPage, FlightQuery, FlightSortKey, FlightStatus, SortDirection};
pub use order::{CreateOrderRequest, Order, OrderPage, SeatAllocationRequest};
pub use response::ApiResponse;
pub use user::{Credentials, LoginResult, RegisterResult, User};
