//! Token registry
//!
//! Binds token ids to local cw20 contracts. A binding is permanent: the same
//! binding may be registered again as a no-op, any other binding for a taken
//! id or address is refused.

use cosmwasm_std::{Addr, Storage};

use crate::error::ContractError;
use crate::identity::{token_id_to_hex, TokenId};
use crate::state::{TokenRecord, TOKENS, TOKEN_IDS};

/// Register `record` under `token_id`.
///
/// Returns `true` when the record was created and `false` when the same
/// binding already existed.
pub fn register(
    storage: &mut dyn Storage,
    token_id: &TokenId,
    record: &TokenRecord,
) -> Result<bool, ContractError> {
    if let Some(existing) = TOKENS.may_load(storage, token_id.as_slice())? {
        if existing.token_address == record.token_address {
            return Ok(false);
        }
        return Err(ContractError::AlreadyRegistered {
            token_id: token_id_to_hex(token_id),
            token_address: existing.token_address.to_string(),
        });
    }

    // One contract backs at most one identity
    if let Some(bound_id) = TOKEN_IDS.may_load(storage, &record.token_address)? {
        return Err(ContractError::AlreadyRegistered {
            token_id: token_id_to_hex(&bound_id),
            token_address: record.token_address.to_string(),
        });
    }

    TOKENS.save(storage, token_id.as_slice(), record)?;
    TOKEN_IDS.save(storage, &record.token_address, token_id)?;
    Ok(true)
}

pub fn lookup(storage: &dyn Storage, token_id: &TokenId) -> Result<TokenRecord, ContractError> {
    TOKENS
        .may_load(storage, token_id.as_slice())?
        .ok_or_else(|| ContractError::NotRegistered {
            token_id: token_id_to_hex(token_id),
        })
}

pub fn lookup_reverse(storage: &dyn Storage, token_address: &Addr) -> Result<TokenId, ContractError> {
    TOKEN_IDS
        .may_load(storage, token_address)?
        .ok_or_else(|| ContractError::UnknownToken {
            token_address: token_address.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TransferMode;
    use cosmwasm_std::testing::MockStorage;

    fn record(address: &str) -> TokenRecord {
        TokenRecord {
            token_address: Addr::unchecked(address),
            transfer_mode: TransferMode::LockRelease,
            origin_chain: None,
            gateway_symbol: None,
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut storage = MockStorage::new();
        let id = [1u8; 32];

        assert!(register(&mut storage, &id, &record("token")).unwrap());
        assert_eq!(lookup(&storage, &id).unwrap(), record("token"));
        assert_eq!(
            lookup_reverse(&storage, &Addr::unchecked("token")).unwrap(),
            id
        );
    }

    #[test]
    fn test_register_same_binding_is_noop() {
        let mut storage = MockStorage::new();
        let id = [1u8; 32];

        assert!(register(&mut storage, &id, &record("token")).unwrap());
        assert!(!register(&mut storage, &id, &record("token")).unwrap());
        assert_eq!(lookup(&storage, &id).unwrap(), record("token"));
    }

    #[test]
    fn test_register_conflicting_address_fails() {
        let mut storage = MockStorage::new();
        let id = [1u8; 32];
        register(&mut storage, &id, &record("token")).unwrap();

        let err = register(&mut storage, &id, &record("other")).unwrap_err();
        assert!(matches!(err, ContractError::AlreadyRegistered { .. }));
        assert_eq!(lookup(&storage, &id).unwrap().token_address, "token");
        assert!(lookup_reverse(&storage, &Addr::unchecked("other")).is_err());
    }

    #[test]
    fn test_address_cannot_back_two_ids() {
        let mut storage = MockStorage::new();
        register(&mut storage, &[1u8; 32], &record("token")).unwrap();

        let err = register(&mut storage, &[2u8; 32], &record("token")).unwrap_err();
        assert!(matches!(err, ContractError::AlreadyRegistered { .. }));
        assert!(lookup(&storage, &[2u8; 32]).is_err());
    }

    #[test]
    fn test_lookup_missing() {
        let storage = MockStorage::new();
        assert!(matches!(
            lookup(&storage, &[9u8; 32]).unwrap_err(),
            ContractError::NotRegistered { .. }
        ));
        assert!(matches!(
            lookup_reverse(&storage, &Addr::unchecked("nobody")).unwrap_err(),
            ContractError::UnknownToken { .. }
        ));
    }
}
