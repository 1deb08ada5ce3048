//! Supporting hooks around the player: flash auto-dismiss, ping display,
//! and the connection-status indicator.

mod flash;
mod ping;
mod status;

pub use flash::{Flash, FLASH_HIDE_MS};
pub use ping::Ping;
pub use status::ConnectionStatus;
