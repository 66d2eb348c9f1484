//! Token identity derivation
//!
//! A token id is computed, never chosen, so every chain can predict the id a
//! remote chain will use before any message arrives:
//!
//! ```solidity
//! // origin tokens
//! keccak256(abi.encode(originChainName, originTokenAddress))
//! // gateway-native tokens
//! keccak256(abi.encode("gateway", symbol))
//! ```
//!
//! # abi.encode layout for (string, string)
//! - Bytes 0-31:   offset to first string (0x40)
//! - Bytes 32-63:  offset to second string
//! - Then each string as: length word, data right-padded to 32 bytes

use cosmwasm_std::Binary;
use tiny_keccak::{Hasher, Keccak};

use crate::error::ContractError;

/// 32-byte token identifier, identical on every chain
pub type TokenId = [u8; 32];

/// Namespace for gateway token ids; refused as a chain name
pub const GATEWAY_NAMESPACE: &str = "gateway";

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Id of a token whose canonical contract lives on `origin_chain`.
pub fn derive_origin_id(origin_chain: &str, origin_token_address: &str) -> TokenId {
    keccak256(&abi_encode_two_strings(origin_chain, origin_token_address))
}

/// Id of a token natively issued by the gateway on every supported chain.
pub fn derive_gateway_id(symbol: &str) -> TokenId {
    keccak256(&abi_encode_two_strings(GATEWAY_NAMESPACE, symbol))
}

/// Salt for `deployInterchainToken`, scoped to the deployer so one caller
/// cannot occupy another caller's address.
pub fn interchain_token_salt(sender: &str, salt: &[u8]) -> [u8; 32] {
    let mut data = Vec::with_capacity(sender.len() + salt.len());
    data.extend_from_slice(sender.as_bytes());
    data.extend_from_slice(salt);
    keccak256(&data)
}

/// Parse a 32-byte token id from Binary input.
pub fn parse_token_id(token_id: &Binary) -> Result<TokenId, ContractError> {
    token_id
        .to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidTokenId { got: token_id.len() })
}

/// Convert a token id to a hex string (for attributes and error messages)
pub fn token_id_to_hex(token_id: &TokenId) -> String {
    format!("0x{}", hex::encode(token_id))
}

pub(crate) fn padded_len(len: usize) -> usize {
    ((len + 31) / 32) * 32
}

fn abi_encode_two_strings(first: &str, second: &str) -> Vec<u8> {
    let first = first.as_bytes();
    let second = second.as_bytes();

    let first_offset = 64usize;
    let second_offset = first_offset + 32 + padded_len(first.len());
    let total = second_offset + 32 + padded_len(second.len());
    let mut data = vec![0u8; total];

    data[24..32].copy_from_slice(&(first_offset as u64).to_be_bytes());
    data[56..64].copy_from_slice(&(second_offset as u64).to_be_bytes());

    data[first_offset + 24..first_offset + 32].copy_from_slice(&(first.len() as u64).to_be_bytes());
    data[first_offset + 32..first_offset + 32 + first.len()].copy_from_slice(first);

    data[second_offset + 24..second_offset + 32]
        .copy_from_slice(&(second.len() as u64).to_be_bytes());
    data[second_offset + 32..second_offset + 32 + second.len()].copy_from_slice(second);

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_abi_layout_short_strings() {
        let encoded = abi_encode_two_strings("A", "token");

        // head: two offsets, first string at 0x40, second at 0x80
        assert_eq!(encoded.len(), 192);
        assert_eq!(encoded[31], 0x40);
        assert_eq!(encoded[63], 0x80);
        assert_eq!(encoded[95], 1);
        assert_eq!(encoded[96], b'A');
        assert_eq!(encoded[159], 5);
        assert_eq!(&encoded[160..165], b"token");
        assert!(encoded[165..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_abi_layout_long_string_moves_second_offset() {
        let long = "x".repeat(33);
        let encoded = abi_encode_two_strings(&long, "b");

        // 33 bytes pad to 64, so the second string starts at 0x40 + 0x20 + 0x40
        assert_eq!(encoded[63], 0xa0);
        assert_eq!(encoded.len(), 0xa0 + 64);
    }

    #[test]
    fn test_origin_id_is_deterministic() {
        let a = derive_origin_id("chain-a", "wasm1token");
        let b = derive_origin_id("chain-a", "wasm1token");
        assert_eq!(a, b);
        assert_eq!(a, keccak256(&abi_encode_two_strings("chain-a", "wasm1token")));
    }

    #[test]
    fn test_origin_id_separates_chain_and_address() {
        assert_ne!(
            derive_origin_id("chain-a", "wasm1token"),
            derive_origin_id("chain-b", "wasm1token")
        );
        assert_ne!(
            derive_origin_id("chain-a", "wasm1token"),
            derive_origin_id("chain-a", "wasm1other")
        );
        // moving bytes across the boundary changes the encoding
        assert_ne!(derive_origin_id("ab", "c"), derive_origin_id("a", "bc"));
    }

    #[test]
    fn test_gateway_id_uses_namespace() {
        assert_eq!(
            derive_gateway_id("GTK"),
            derive_origin_id(GATEWAY_NAMESPACE, "GTK")
        );
        assert_ne!(derive_gateway_id("GTK"), derive_gateway_id("AXL"));
    }

    #[test]
    fn test_interchain_salt_scoped_by_sender() {
        let salt = [7u8; 32];
        assert_ne!(
            interchain_token_salt("wasm1alice", &salt),
            interchain_token_salt("wasm1bob", &salt)
        );
    }

    #[test]
    fn test_parse_token_id() {
        let id = derive_gateway_id("GTK");
        assert_eq!(parse_token_id(&Binary::from(id.to_vec())).unwrap(), id);
        assert_eq!(
            parse_token_id(&Binary::from(vec![1u8; 31])).unwrap_err(),
            ContractError::InvalidTokenId { got: 31 }
        );
    }

    #[test]
    fn test_token_id_to_hex() {
        let hex = token_id_to_hex(&[0xab; 32]);
        assert_eq!(hex.len(), 66);
        assert!(hex.starts_with("0xabab"));
    }
}
