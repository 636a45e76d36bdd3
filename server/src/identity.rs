//! Player identity assignment.
//!
//! Game logic only ever sees a [`PlayerId`]; how one is derived from an accepted
//! connection is decided here and nowhere else.

use clap::ValueEnum;
use shared::PlayerId;
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IdentityScheme {
    /// `ip:port` of the remote peer, unique per TCP session
    #[default]
    Endpoint,
    /// Remote port only; compact, but can collide across hosts
    Port,
}

impl IdentityScheme {
    pub fn assign(&self, peer: SocketAddr) -> PlayerId {
        match self {
            Self::Endpoint => PlayerId::new(peer.to_string()),
            Self::Port => PlayerId::new(peer.port().to_string()),
        }
    }
}
