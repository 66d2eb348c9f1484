//! Linker message payloads
//!
//! Payloads use the Solidity `abi.encode` layout so that linkers on EVM
//! chains and CosmWasm chains speak the same wire format:
//!
//! - Head: one 32-byte word per field. Static fields (`bytes32`, `uint256`,
//!   `uint8`) sit in the head; dynamic fields (`string`, `bytes`) put their
//!   tail offset there.
//! - Tail: per dynamic field, a length word followed by the data right-padded
//!   to a multiple of 32 bytes.
//!
//! The first head word is the message type tag.
//!
//! | Tag | Message          | Fields after the tag                                   |
//! |-----|------------------|--------------------------------------------------------|
//! | 0   | Deploy           | bytes32 id, string name, string symbol, uint8 decimals |
//! | 1   | Transfer         | bytes32 id, string recipient, uint256 amount           |
//! | 2   | TransferWithData | bytes32 id, string recipient, uint256 amount, string target, bytes data |
//! | 3   | SelfGiveToken    | bytes32 id, string recipient, uint256 amount           |
//! | 4   | ForwardToken     | bytes32 id, string destination chain, string recipient, uint256 amount |
//!
//! Decoding is strict: only the canonical encoding of a message is accepted.

use cosmwasm_std::{Binary, Uint128};

use crate::error::ContractError;
use crate::identity::{padded_len, TokenId};

const WORD: usize = 32;

const TAG_DEPLOY: u128 = 0;
const TAG_TRANSFER: u128 = 1;
const TAG_TRANSFER_WITH_DATA: u128 = 2;
const TAG_SELF_GIVE_TOKEN: u128 = 3;
const TAG_FORWARD_TOKEN: u128 = 4;

/// A message exchanged between linkers
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkerMessage {
    /// Materialise the token on the destination chain
    Deploy {
        token_id: TokenId,
        name: String,
        symbol: String,
        decimals: u8,
    },
    /// Credit `amount` to `recipient`
    Transfer {
        token_id: TokenId,
        recipient: String,
        amount: Uint128,
    },
    /// Credit `amount` to `recipient`, then call `target` with `data`
    TransferWithData {
        token_id: TokenId,
        recipient: String,
        amount: Uint128,
        target: String,
        data: Binary,
    },
    /// Gateway tokens already moved by the gateway; pass them to `recipient`
    SelfGiveToken {
        token_id: TokenId,
        recipient: String,
        amount: Uint128,
    },
    /// Value now held by the origin; re-send it to `destination_chain`
    ForwardToken {
        token_id: TokenId,
        destination_chain: String,
        recipient: String,
        amount: Uint128,
    },
}

enum Field<'a> {
    Word([u8; 32]),
    Bytes(&'a [u8]),
}

impl LinkerMessage {
    pub fn token_id(&self) -> &TokenId {
        match self {
            LinkerMessage::Deploy { token_id, .. }
            | LinkerMessage::Transfer { token_id, .. }
            | LinkerMessage::TransferWithData { token_id, .. }
            | LinkerMessage::SelfGiveToken { token_id, .. }
            | LinkerMessage::ForwardToken { token_id, .. } => token_id,
        }
    }

    /// Name used in event attributes
    pub fn kind(&self) -> &'static str {
        match self {
            LinkerMessage::Deploy { .. } => "deploy",
            LinkerMessage::Transfer { .. } => "transfer",
            LinkerMessage::TransferWithData { .. } => "transfer_with_data",
            LinkerMessage::SelfGiveToken { .. } => "self_give_token",
            LinkerMessage::ForwardToken { .. } => "forward_token",
        }
    }

    pub fn encode(&self) -> Binary {
        let fields = match self {
            LinkerMessage::Deploy {
                token_id,
                name,
                symbol,
                decimals,
            } => vec![
                Field::Word(uint_word(TAG_DEPLOY)),
                Field::Word(*token_id),
                Field::Bytes(name.as_bytes()),
                Field::Bytes(symbol.as_bytes()),
                Field::Word(uint_word(*decimals as u128)),
            ],
            LinkerMessage::Transfer {
                token_id,
                recipient,
                amount,
            } => vec![
                Field::Word(uint_word(TAG_TRANSFER)),
                Field::Word(*token_id),
                Field::Bytes(recipient.as_bytes()),
                Field::Word(uint_word(amount.u128())),
            ],
            LinkerMessage::TransferWithData {
                token_id,
                recipient,
                amount,
                target,
                data,
            } => vec![
                Field::Word(uint_word(TAG_TRANSFER_WITH_DATA)),
                Field::Word(*token_id),
                Field::Bytes(recipient.as_bytes()),
                Field::Word(uint_word(amount.u128())),
                Field::Bytes(target.as_bytes()),
                Field::Bytes(data.as_slice()),
            ],
            LinkerMessage::SelfGiveToken {
                token_id,
                recipient,
                amount,
            } => vec![
                Field::Word(uint_word(TAG_SELF_GIVE_TOKEN)),
                Field::Word(*token_id),
                Field::Bytes(recipient.as_bytes()),
                Field::Word(uint_word(amount.u128())),
            ],
            LinkerMessage::ForwardToken {
                token_id,
                destination_chain,
                recipient,
                amount,
            } => vec![
                Field::Word(uint_word(TAG_FORWARD_TOKEN)),
                Field::Word(*token_id),
                Field::Bytes(destination_chain.as_bytes()),
                Field::Bytes(recipient.as_bytes()),
                Field::Word(uint_word(amount.u128())),
            ],
        };
        Binary::from(encode_fields(&fields))
    }

    pub fn decode(payload: &[u8]) -> Result<Self, ContractError> {
        let reader = Reader::new(payload);
        let tag = reader.uint(0)?;

        let message = match tag {
            TAG_DEPLOY => LinkerMessage::Deploy {
                token_id: reader.word(1)?,
                name: reader.string(2, 5)?,
                symbol: reader.string(3, 5)?,
                decimals: u8::try_from(reader.uint(4)?)
                    .map_err(|_| ContractError::invalid_payload("decimals exceed 255"))?,
            },
            TAG_TRANSFER => LinkerMessage::Transfer {
                token_id: reader.word(1)?,
                recipient: reader.string(2, 4)?,
                amount: Uint128::new(reader.uint(3)?),
            },
            TAG_TRANSFER_WITH_DATA => LinkerMessage::TransferWithData {
                token_id: reader.word(1)?,
                recipient: reader.string(2, 6)?,
                amount: Uint128::new(reader.uint(3)?),
                target: reader.string(4, 6)?,
                data: Binary::from(reader.bytes(5, 6)?),
            },
            TAG_SELF_GIVE_TOKEN => LinkerMessage::SelfGiveToken {
                token_id: reader.word(1)?,
                recipient: reader.string(2, 4)?,
                amount: Uint128::new(reader.uint(3)?),
            },
            TAG_FORWARD_TOKEN => LinkerMessage::ForwardToken {
                token_id: reader.word(1)?,
                destination_chain: reader.string(2, 5)?,
                recipient: reader.string(3, 5)?,
                amount: Uint128::new(reader.uint(4)?),
            },
            other => {
                return Err(ContractError::invalid_payload(format!(
                    "unknown message type {}",
                    other
                )))
            }
        };

        // Offsets may point anywhere in range; re-encoding pins the layout
        // and rejects trailing or overlapping bytes.
        if message.encode().as_slice() != payload {
            return Err(ContractError::invalid_payload("non-canonical encoding"));
        }
        Ok(message)
    }
}

fn uint_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn encode_fields(fields: &[Field]) -> Vec<u8> {
    let head_len = fields.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for field in fields {
        match field {
            Field::Word(word) => head.extend_from_slice(word),
            Field::Bytes(bytes) => {
                head.extend_from_slice(&uint_word((head_len + tail.len()) as u128));
                tail.extend_from_slice(&uint_word(bytes.len() as u128));
                tail.extend_from_slice(bytes);
                tail.resize(tail.len() + padded_len(bytes.len()) - bytes.len(), 0);
            }
        }
    }

    head.extend(tail);
    head
}

struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn word_at(&self, offset: usize) -> Result<[u8; 32], ContractError> {
        let end = offset
            .checked_add(WORD)
            .ok_or_else(|| ContractError::invalid_payload("offset overflow"))?;
        let slice = self
            .data
            .get(offset..end)
            .ok_or_else(|| ContractError::invalid_payload("truncated payload"))?;
        let mut word = [0u8; 32];
        word.copy_from_slice(slice);
        Ok(word)
    }

    fn word(&self, index: usize) -> Result<[u8; 32], ContractError> {
        self.word_at(index * WORD)
    }

    fn uint_at(&self, offset: usize) -> Result<u128, ContractError> {
        let word = self.word_at(offset)?;
        if word[..16].iter().any(|b| *b != 0) {
            return Err(ContractError::invalid_payload("integer exceeds 128 bits"));
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&word[16..]);
        Ok(u128::from_be_bytes(low))
    }

    fn uint(&self, index: usize) -> Result<u128, ContractError> {
        self.uint_at(index * WORD)
    }

    /// Dynamic field at head `index`; `head_words` bounds where tails may start
    fn bytes(&self, index: usize, head_words: usize) -> Result<Vec<u8>, ContractError> {
        let offset = usize::try_from(self.uint(index)?)
            .map_err(|_| ContractError::invalid_payload("offset out of range"))?;
        if offset < head_words * WORD || offset >= self.data.len() {
            return Err(ContractError::invalid_payload("offset out of range"));
        }
        let len = usize::try_from(self.uint_at(offset)?)
            .map_err(|_| ContractError::invalid_payload("length out of range"))?;
        let start = offset + WORD;
        let end = start
            .checked_add(len)
            .ok_or_else(|| ContractError::invalid_payload("length out of range"))?;
        self.data
            .get(start..end)
            .map(|slice| slice.to_vec())
            .ok_or_else(|| ContractError::invalid_payload("truncated payload"))
    }

    fn string(&self, index: usize, head_words: usize) -> Result<String, ContractError> {
        String::from_utf8(self.bytes(index, head_words)?)
            .map_err(|_| ContractError::invalid_payload("string is not valid UTF-8"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer() -> LinkerMessage {
        LinkerMessage::Transfer {
            token_id: [0x11; 32],
            recipient: "wasm1recipient".to_string(),
            amount: Uint128::new(1_000_000),
        }
    }

    fn assert_invalid(payload: &[u8]) {
        match LinkerMessage::decode(payload) {
            Err(ContractError::InvalidPayload { .. }) => {}
            other => panic!("expected InvalidPayload, got {:?}", other),
        }
    }

    #[test]
    fn test_transfer_layout() {
        let encoded = transfer().encode();
        let bytes = encoded.as_slice();

        // tag, id, offset, amount | length, padded recipient
        assert_eq!(bytes.len(), 4 * 32 + 32 + 32);
        assert_eq!(bytes[31] as u128, TAG_TRANSFER);
        assert_eq!(&bytes[32..64], &[0x11; 32]);
        assert_eq!(bytes[95], 0x80);
        assert_eq!(&bytes[112..128], &1_000_000u128.to_be_bytes());
        assert_eq!(bytes[159], 14);
        assert_eq!(&bytes[160..174], b"wasm1recipient");
        assert!(bytes[174..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_every_message_decodes_to_itself() {
        let messages = vec![
            LinkerMessage::Deploy {
                token_id: [1; 32],
                name: "Test Token".to_string(),
                symbol: "TTK".to_string(),
                decimals: 6,
            },
            transfer(),
            LinkerMessage::TransferWithData {
                token_id: [2; 32],
                recipient: "wasm1target".to_string(),
                amount: Uint128::new(u128::MAX),
                target: "wasm1target".to_string(),
                data: Binary::from(vec![0xde; 40]),
            },
            LinkerMessage::SelfGiveToken {
                token_id: [3; 32],
                recipient: "wasm1user".to_string(),
                amount: Uint128::new(5),
            },
            LinkerMessage::ForwardToken {
                token_id: [4; 32],
                destination_chain: "chain-c".to_string(),
                recipient: "wasm1user".to_string(),
                amount: Uint128::new(7),
            },
        ];

        for message in messages {
            let decoded = LinkerMessage::decode(message.encode().as_slice()).unwrap();
            assert_eq!(decoded, message);
        }
    }

    #[test]
    fn test_empty_strings_and_data() {
        let message = LinkerMessage::TransferWithData {
            token_id: [9; 32],
            recipient: String::new(),
            amount: Uint128::zero(),
            target: String::new(),
            data: Binary::default(),
        };
        let encoded = message.encode();
        // six head words plus three length words, no data
        assert_eq!(encoded.len(), 9 * 32);
        assert_eq!(LinkerMessage::decode(encoded.as_slice()).unwrap(), message);
    }

    #[test]
    fn test_rejects_empty_and_truncated() {
        assert_invalid(&[]);
        assert_invalid(&[0u8; 31]);

        let encoded = transfer().encode();
        assert_invalid(&encoded.as_slice()[..encoded.len() - 1]);
        assert_invalid(&encoded.as_slice()[..4 * 32]);
    }

    #[test]
    fn test_rejects_unknown_tag() {
        let mut bytes = transfer().encode().to_vec();
        bytes[31] = 9;
        assert_invalid(&bytes);
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let mut bytes = transfer().encode().to_vec();
        bytes.extend_from_slice(&[0u8; 32]);
        assert_invalid(&bytes);
    }

    #[test]
    fn test_rejects_amount_above_u128() {
        let mut bytes = transfer().encode().to_vec();
        bytes[96] = 1;
        assert_invalid(&bytes);
    }

    #[test]
    fn test_rejects_offset_out_of_range() {
        let mut bytes = transfer().encode().to_vec();
        bytes[94] = 0xff;
        assert_invalid(&bytes);

        // offset pointing into the head
        let mut bytes = transfer().encode().to_vec();
        bytes[95] = 0x20;
        assert_invalid(&bytes);
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let mut bytes = transfer().encode().to_vec();
        bytes[160] = 0xff;
        assert_invalid(&bytes);
    }

    #[test]
    fn test_rejects_decimals_above_255() {
        let message = LinkerMessage::Deploy {
            token_id: [1; 32],
            name: "Test Token".to_string(),
            symbol: "TTK".to_string(),
            decimals: 18,
        };
        let mut bytes = message.encode().to_vec();
        // decimals word is head index 4
        bytes[4 * 32 + 30] = 1;
        assert_invalid(&bytes);
    }

    #[test]
    fn test_rejects_dirty_padding() {
        let mut bytes = transfer().encode().to_vec();
        let last = bytes.len() - 1;
        bytes[last] = 1;
        assert_invalid(&bytes);
    }
}
