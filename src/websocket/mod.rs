pub mod handler;
pub mod msg_change_handler;
pub mod msg_join_handler;
pub mod msg_ping_handler;
pub mod transport;

pub use handler::{websocket_handler, websocket_session_handler};
pub use transport::WsTransport;
