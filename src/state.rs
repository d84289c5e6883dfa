use crate::clients::{PistonClient, PistonError};
use crate::config::Config;
use crate::relay::Relay;
use crate::websocket::WsTransport;

/// Process-wide state shared by every route
pub struct AppState {
    pub config: Config,
    pub relay: Relay<WsTransport>,
    pub piston: PistonClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, PistonError> {
        let piston = PistonClient::new(
            &config.piston_url,
            config.piston_timeout(),
            config.piston_runtime_cache_ttl(),
        )?;
        Ok(Self {
            config,
            relay: Relay::new(),
            piston,
        })
    }
}
