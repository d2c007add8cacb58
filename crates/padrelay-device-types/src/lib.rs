//! Device types for controller translation
//!
//! This crate provides the protocol-agnostic input snapshot every codec
//! decodes into and encodes from, plus the identity types the registry
//! assigns to attached devices.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod identity;
pub mod input;

pub use identity::*;
pub use input::*;

#[cfg(feature = "proptest")]
mod proptest_shrinks {
    use super::*;
    use proptest::prelude::*;

    fn stick() -> impl Strategy<Value = Stick> {
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Stick { x, y })
    }

    fn touch() -> impl Strategy<Value = TouchPoint> {
        (any::<bool>(), 0u8..0x80, 0u16..0x1000, 0u16..0x1000)
            .prop_map(|(active, id, x, y)| TouchPoint { active, id, x, y })
    }

    impl Arbitrary for Hat {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            (0u8..9).prop_map(Hat::from_nibble).boxed()
        }
    }

    impl Arbitrary for ConsoleType {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            proptest::sample::select(ConsoleType::ALL.to_vec()).boxed()
        }
    }

    impl Arbitrary for AddressSlot {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            prop_oneof![
                (1u8..128, 0u8..4).prop_map(|(dev_addr, instance)| AddressSlot::Usb {
                    dev_addr,
                    instance
                }),
                any::<u16>().prop_map(|handle| AddressSlot::Bluetooth { handle }),
            ]
            .boxed()
        }
    }

    impl Arbitrary for CanonicalInputState {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            (
                (
                    any::<u32>(),
                    any::<Hat>(),
                    stick(),
                    stick(),
                    any::<u16>(),
                    any::<u16>(),
                ),
                (
                    any::<[u8; 10]>(),
                    any::<[i16; 3]>(),
                    any::<[i16; 3]>(),
                    [touch(), touch()],
                    any::<u8>(),
                    any::<[u8; 6]>(),
                ),
                (any::<[i8; 4]>(), any::<u8>(), any::<u8>()),
            )
                .prop_map(
                    |(
                        (buttons, hat, left_stick, right_stick, left_trigger, right_trigger),
                        (p, accel, gyro, touch, modifiers, keys),
                        (mouse_axes, mouse_buttons, battery),
                    )| {
                        Self {
                            buttons: Buttons::from_bits_truncate(buttons),
                            hat,
                            left_stick,
                            right_stick,
                            left_trigger,
                            right_trigger,
                            pressure: Pressure {
                                dpad_up: p[0],
                                dpad_right: p[1],
                                dpad_down: p[2],
                                dpad_left: p[3],
                                north: p[4],
                                east: p[5],
                                south: p[6],
                                west: p[7],
                                left_shoulder: p[8],
                                right_shoulder: p[9],
                            },
                            motion: Motion { accel, gyro },
                            touch,
                            keyboard: KeyboardState { modifiers, keys },
                            mouse: MouseState {
                                buttons: mouse_buttons,
                                x: mouse_axes[0],
                                y: mouse_axes[1],
                                wheel: mouse_axes[2],
                                pan: mouse_axes[3],
                            },
                            battery,
                        }
                    },
                )
                .boxed()
        }
    }
}
