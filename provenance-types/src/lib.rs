pub mod error;
pub mod genesis;
pub mod primitives;

#[cfg(test)]
mod tests {
    use borsh::{BorshDeserialize, BorshSerialize};

    /// Helper: borsh round-trip test.
    fn borsh_roundtrip<T: BorshSerialize + BorshDeserialize + PartialEq + std::fmt::Debug>(
        value: &T,
    ) {
        let encoded = borsh::to_vec(value).expect("borsh serialize failed");
        let decoded = T::try_from_slice(&encoded).expect("borsh deserialize failed");
        assert_eq!(*value, decoded);
    }

    #[test]
    fn test_principal_roundtrip() {
        use crate::primitives::Principal;
        borsh_roundtrip(&Principal::new("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7"));
    }

    #[test]
    fn test_content_id_roundtrip() {
        use crate::primitives::ContentId;
        borsh_roundtrip(&ContentId::new("content-123"));
    }

    #[test]
    fn test_genesis_config_roundtrip() {
        use crate::genesis::GenesisConfig;
        use crate::primitives::Principal;
        borsh_roundtrip(&GenesisConfig {
            admin: Principal::new("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7"),
        });
    }
}
