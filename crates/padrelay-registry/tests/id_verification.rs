//! Cross-reference tests for VID/PID constants against the kernel
//! `hid-ids.h` / `xpad.c` tables they were taken from.
//!
//! If any assertion fails, the constant in `ids.rs` drifted from its source.

use padrelay_device_types::{ConsoleType, ProtocolHint, SubType};
use padrelay_registry::{
    HARMONIX_VENDOR_ID, HORI_VENDOR_ID, MICROSOFT_VENDOR_ID, SONY_RHYTHM_VENDOR_ID,
    SONY_VENDOR_ID, classify, hori, microsoft, sony, sony_rhythm,
};

#[test]
fn sony_vid_is_054c() {
    assert_eq!(SONY_VENDOR_ID, 0x054C, "Sony VID changed; check hid-ids.h");
}

#[test]
fn dualshock3_pid_is_0268() {
    assert_eq!(sony::DUALSHOCK3, 0x0268);
}

#[test]
fn dualshock4_pids() {
    assert_eq!(sony::DUALSHOCK4_V1, 0x05C4);
    assert_eq!(sony::DUALSHOCK4_V2, 0x09CC);
    assert_eq!(sony::DUALSHOCK4_ADAPTER, 0x0BA0);
}

#[test]
fn sony_rhythm_vid_is_12ba() {
    assert_eq!(SONY_RHYTHM_VENDOR_ID, 0x12BA);
    assert_eq!(sony_rhythm::GUITAR_HERO_GUITAR, 0x0100);
}

#[test]
fn microsoft_pids() {
    assert_eq!(MICROSOFT_VENDOR_ID, 0x045E);
    assert_eq!(microsoft::XBOX360_WIRED, 0x028E);
    assert_eq!(microsoft::XBOX_ONE, 0x02D1);
    assert_eq!(microsoft::XBOX_SERIES, 0x0B12);
}

#[test]
fn harmonix_vid_is_1bad() {
    assert_eq!(HARMONIX_VENDOR_ID, 0x1BAD);
}

// ── Every named product classifies into its family ───────────────────────────

#[test]
fn sony_products_classify() {
    for pid in [sony::DUALSHOCK4_V1, sony::DUALSHOCK4_V2, sony::DUALSHOCK4_ADAPTER] {
        assert_eq!(classify(SONY_VENDOR_ID, pid, ProtocolHint::Hid).console_type(), ConsoleType::Ps4);
    }
    let ds3 = classify(SONY_VENDOR_ID, sony::DUALSHOCK3, ProtocolHint::Hid);
    assert_eq!(ds3.console_type(), ConsoleType::Ps3);
    assert_eq!(ds3.sub_type(), SubType::Gamepad);
}

#[test]
fn rhythm_products_classify() {
    let cases = [
        (sony_rhythm::GUITAR_HERO_GUITAR, SubType::Guitar),
        (sony_rhythm::GUITAR_HERO_DRUMS, SubType::Drums),
        (sony_rhythm::DJ_HERO_TURNTABLE, SubType::Turntable),
        (sony_rhythm::ROCK_BAND_GUITAR, SubType::Guitar),
        (sony_rhythm::ROCK_BAND_DRUMS, SubType::Drums),
    ];
    for (pid, sub) in cases {
        let c = classify(SONY_RHYTHM_VENDOR_ID, pid, ProtocolHint::Hid);
        assert_eq!(c.console_type(), ConsoleType::Ps3, "pid {pid:04X}");
        assert_eq!(c.sub_type(), sub, "pid {pid:04X}");
    }
}

#[test]
fn microsoft_products_classify() {
    for pid in [
        microsoft::XBOX360_WIRED,
        microsoft::XBOX360_WIRELESS,
        microsoft::XBOX360_WIRELESS_RECEIVER,
    ] {
        assert_eq!(
            classify(MICROSOFT_VENDOR_ID, pid, ProtocolHint::XInput { subtype: 1 }).console_type(),
            ConsoleType::Xbox360
        );
    }
    for pid in [
        microsoft::XBOX_ONE,
        microsoft::XBOX_ONE_2015,
        microsoft::XBOX_ONE_ELITE,
        microsoft::XBOX_ONE_S,
        microsoft::XBOX_ONE_ELITE_2,
        microsoft::XBOX_SERIES,
    ] {
        assert_eq!(
            classify(MICROSOFT_VENDOR_ID, pid, ProtocolHint::XboxOne).console_type(),
            ConsoleType::XboxOne
        );
    }
}

#[test]
fn hori_fighting_commander_is_ps4_but_xinput_sticks_are_360() {
    assert_eq!(HORI_VENDOR_ID, 0x0F0D);
    let fc = classify(HORI_VENDOR_ID, hori::FIGHTING_COMMANDER_PS4, ProtocolHint::Hid);
    assert_eq!(fc.console_type(), ConsoleType::Ps4);
    assert_eq!(fc.sub_type(), SubType::ArcadePad);

    let stick = classify(HORI_VENDOR_ID, 0x00DC, ProtocolHint::XInput { subtype: 0x03 });
    assert_eq!(stick.console_type(), ConsoleType::Xbox360);
    assert_eq!(stick.sub_type(), SubType::ArcadeStick);
}
