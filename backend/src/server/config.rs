//! HTTP server configuration.

use std::net::SocketAddr;

use backend::inbound::http::auth::TokenVerifier;
use backend::outbound::persistence::DbPool;

/// Everything `create_server` needs: where to bind, how to verify bearer
/// tokens, and the database pool backing the adapters.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) verifier: TokenVerifier,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, verifier: TokenVerifier, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            verifier,
            db_pool,
        }
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
