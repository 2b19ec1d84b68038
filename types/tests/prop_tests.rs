use proptest::prelude::*;

use vouch_types::{Identity, VouchParams};

proptest! {
    /// Display output always parses back to the same identity.
    #[test]
    fn identity_display_parses_back(bytes in prop::array::uniform20(0u8..)) {
        let id = Identity::new(bytes);
        let parsed: Identity = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    /// Identity::is_zero is true only for all-zero bytes.
    #[test]
    fn identity_is_zero_correct(bytes in prop::array::uniform20(0u8..)) {
        let id = Identity::new(bytes);
        prop_assert_eq!(id.is_zero(), bytes == [0u8; 20]);
    }

    /// Distinct low integers produce distinct identities.
    #[test]
    fn low_u64_identities_are_injective(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(a == b, Identity::from_low_u64(a) == Identity::from_low_u64(b));
    }

    /// The effective rank is never the unset sentinel.
    #[test]
    fn effective_rank_never_zero(stored in any::<u64>()) {
        let params = VouchParams::default();
        prop_assert!(params.effective_rank(stored) > 0);
    }
}
