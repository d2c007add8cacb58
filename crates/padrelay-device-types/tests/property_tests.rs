//! Property-based tests for canonical input helpers.

use padrelay_device_types::{Buttons, CanonicalInputState, Dpad, Hat, Stick};
use proptest::prelude::*;

fn state() -> impl Strategy<Value = CanonicalInputState> {
    (
        any::<u32>(),
        0u8..16,
        any::<(i16, i16, i16, i16)>(),
        any::<(u16, u16)>(),
    )
        .prop_map(|(buttons, hat, (lx, ly, rx, ry), (lt, rt))| {
            CanonicalInputState::neutral()
                .with_buttons(Buttons::from_bits_truncate(buttons))
                .with_hat(Hat::from_nibble(hat))
                .with_sticks(Stick::new(lx, ly), Stick::new(rx, ry))
                .with_triggers(lt, rt)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Merging a neutral controller never changes a state.
    #[test]
    fn prop_merge_with_neutral_is_identity(s in state()) {
        let mut merged = s;
        merged.merge(&CanonicalInputState::neutral());
        prop_assert_eq!(merged, s);
    }

    /// Merging into a neutral state adopts the other state.
    #[test]
    fn prop_neutral_merge_adopts_other(s in state()) {
        let mut merged = CanonicalInputState::neutral();
        merged.merge(&s);
        prop_assert_eq!(merged, s);
    }

    /// Merged buttons always include both inputs.
    #[test]
    fn prop_merge_buttons_are_union(a in state(), b in state()) {
        let mut merged = a;
        merged.merge(&b);
        prop_assert!(merged.buttons.contains(a.buttons));
        prop_assert!(merged.buttons.contains(b.buttons));
    }

    /// Any nibble maps to a hat whose nibble maps back to the same hat.
    #[test]
    fn prop_hat_nibble_is_stable(n in any::<u8>()) {
        let hat = Hat::from_nibble(n);
        prop_assert_eq!(Hat::from_nibble(hat.to_nibble()), hat);
    }

    /// Any switch combination yields a hat whose switches yield the same hat.
    #[test]
    fn prop_dpad_is_stable(up in any::<bool>(), down in any::<bool>(), left in any::<bool>(), right in any::<bool>()) {
        let hat = Hat::from_dpad(Dpad { up, down, left, right });
        prop_assert_eq!(Hat::from_dpad(hat.dpad()), hat);
    }
}
