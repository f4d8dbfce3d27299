//! Backend interaction for RTMS.
//!
//! Everything that talks to the outside world over HTTP lives here: the
//! request envelope, the auth endpoints, the domain endpoints, the event
//! stream and the simulated social sign-in.

pub mod auth_api;
pub mod client;
pub mod endpoints;
pub mod realtime;
pub mod social_login;

pub use auth_api::RemoteAuthApi;
pub use client::{ApiClient, RequestBody};
pub use endpoints::RtmsApi;
pub use realtime::{RealtimeStream, SseDecoder};
pub use social_login::SimulatedSocialLogin;
