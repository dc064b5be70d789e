/// Address handling.
///
/// P2PKH addresses in legacy Base58Check form, with mainnet/testnet
/// discrimination and SHA-256d checksums.

use std::fmt;

use memo_primitives::hash::{hash160, sha256d};

use crate::ScriptError;

/// Mainnet P2PKH address version byte.
const MAINNET_P2PKH: u8 = 0x00;
/// Testnet P2PKH address version byte.
const TESTNET_P2PKH: u8 = 0x6f;

/// Network type for address prefix selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Network {
    /// Mainnet (address prefix 0x00, starts with '1').
    Mainnet,
    /// Testnet (address prefix 0x6f, starts with 'm' or 'n').
    Testnet,
}

/// A P2PKH address.
///
/// Holds the 20-byte public key hash and the network it belongs to, plus
/// the Base58Check string form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The human-readable Base58Check address string.
    pub address_string: String,
    /// The 20-byte RIPEMD-160(SHA-256(pubkey)) hash.
    pub public_key_hash: [u8; 20],
    /// The network this address belongs to.
    pub network: Network,
}

impl Address {
    /// Parse a Base58Check-encoded address string.
    ///
    /// Validates the checksum and detects the network from the version
    /// byte (0x00 = mainnet, 0x6f = testnet).
    ///
    /// # Arguments
    /// * `addr` - The Base58Check address string.
    ///
    /// # Returns
    /// An `Address`, or an error if the string is invalid.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let decoded = bs58::decode(addr)
            .into_vec()
            .map_err(|_| ScriptError::InvalidAddress(format!("bad char for '{}'", addr)))?;

        if decoded.len() != 25 {
            return Err(ScriptError::InvalidAddressLength(addr.to_string()));
        }

        let checksum = sha256d(&decoded[..21]);
        if decoded[21..25] != checksum[..4] {
            return Err(ScriptError::ChecksumFailed);
        }

        let network = match decoded[0] {
            MAINNET_P2PKH => Network::Mainnet,
            TESTNET_P2PKH => Network::Testnet,
            _ => return Err(ScriptError::UnsupportedAddress(addr.to_string())),
        };

        let mut pkh = [0u8; 20];
        pkh.copy_from_slice(&decoded[1..21]);

        Ok(Address {
            address_string: addr.to_string(),
            public_key_hash: pkh,
            network,
        })
    }

    /// Create an address from a 20-byte public key hash.
    ///
    /// # Arguments
    /// * `hash` - The Hash160 of the public key.
    /// * `network` - The target network.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        let version = match network {
            Network::Mainnet => MAINNET_P2PKH,
            Network::Testnet => TESTNET_P2PKH,
        };

        let mut payload = Vec::with_capacity(25);
        payload.push(version);
        payload.extend_from_slice(hash);
        let checksum = sha256d(&payload);
        payload.extend_from_slice(&checksum[..4]);

        Address {
            address_string: bs58::encode(&payload).into_string(),
            public_key_hash: *hash,
            network,
        }
    }

    /// Create an address from SEC1 public key bytes.
    ///
    /// Computes Hash160 of the key bytes and encodes for the given network.
    ///
    /// # Arguments
    /// * `pub_key` - SEC1-encoded public key bytes (compressed or not).
    /// * `network` - The target network.
    pub fn from_public_key(pub_key: &[u8], network: Network) -> Self {
        let h = hash160(pub_key);
        Self::from_public_key_hash(&h, network)
    }
}

impl fmt::Display for Address {
    /// Display the address as its Base58Check string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}
