//! Client identification utilities
//!
//! Derives the key the rate limiter counts against.

use axum::extract::ConnectInfo;
use axum::http::Request;
use kernel::error::app_error::AppError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Client identity: host portion of the immediate connection address
///
/// Behind a reverse proxy every request shares the proxy's address.
/// Forwarding headers are not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientIdentity(IpAddr);

impl ClientIdentity {
    /// IPv4-mapped IPv6 addresses collapse to their IPv4 form so one client
    /// never gets two budgets.
    pub fn new(ip: IpAddr) -> Self {
        Self(ip.to_canonical())
    }

    pub fn ip(&self) -> IpAddr {
        self.0
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error when deriving the client identity
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientIdentityError {
    #[error("Connection address unavailable")]
    MissingConnectInfo,
}

impl From<ClientIdentityError> for AppError {
    fn from(err: ClientIdentityError) -> Self {
        AppError::bad_request("Invalid address").with_source(err)
    }
}

/// Extract the client identity from the connection info axum attaches
/// when served with `into_make_service_with_connect_info::<SocketAddr>()`
pub fn client_identity<B>(req: &Request<B>) -> Result<ClientIdentity, ClientIdentityError> {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| ClientIdentity::new(info.0.ip()))
        .ok_or(ClientIdentityError::MissingConnectInfo)
}
