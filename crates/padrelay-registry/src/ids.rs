//! USB vendor and product ID constants for supported controllers.
//!
//! Sources:
//! - **Linux kernel `hid-ids.h`**: `USB_VENDOR_ID_SONY = 0x054c`,
//!   `USB_DEVICE_ID_SONY_PS3_CONTROLLER = 0x0268`,
//!   `USB_DEVICE_ID_SONY_PS4_CONTROLLER = 0x05c4`,
//!   `USB_DEVICE_ID_SONY_PS4_CONTROLLER_2 = 0x09cc`,
//!   `USB_DEVICE_ID_SONY_PS4_CONTROLLER_DONGLE = 0x0ba0`,
//!   `USB_VENDOR_ID_SONY_RHYTHM = 0x12ba`
//! - **Linux kernel `xpad.c`** device table: Microsoft `0x045e` Xbox 360 and
//!   Xbox One pads, and the third-party vendor blocks for Mad Catz `0x0738`,
//!   PDP `0x0e6f`, Hori `0x0f0d` and Harmonix `0x1bad`.
//! - Rhythm-game instrument PIDs under `0x12ba` and `0x1bad` from community
//!   USB captures of the PS3 and Xbox 360 instrument dongles.

#![deny(static_mut_refs)]

/// Sony Interactive Entertainment.
pub const SONY_VENDOR_ID: u16 = 0x054C;

/// Sony-licensed rhythm instruments (RedOctane, Harmonix, Activision PS3 dongles).
pub const SONY_RHYTHM_VENDOR_ID: u16 = 0x12BA;

pub const MICROSOFT_VENDOR_ID: u16 = 0x045E;

pub const MADCATZ_VENDOR_ID: u16 = 0x0738;

pub const PDP_VENDOR_ID: u16 = 0x0E6F;

pub const HORI_VENDOR_ID: u16 = 0x0F0D;

pub const HARMONIX_VENDOR_ID: u16 = 0x1BAD;

pub mod sony {
    /// DualShock 3 / Sixaxis.
    pub const DUALSHOCK3: u16 = 0x0268;
    /// DualShock 4, first revision (CUH-ZCT1).
    pub const DUALSHOCK4_V1: u16 = 0x05C4;
    /// DualShock 4, second revision (CUH-ZCT2).
    pub const DUALSHOCK4_V2: u16 = 0x09CC;
    /// DualShock 4 USB wireless adapter.
    pub const DUALSHOCK4_ADAPTER: u16 = 0x0BA0;
}

pub mod sony_rhythm {
    pub const GUITAR_HERO_GUITAR: u16 = 0x0100;
    pub const GUITAR_HERO_DRUMS: u16 = 0x0120;
    pub const DJ_HERO_TURNTABLE: u16 = 0x0140;
    pub const ROCK_BAND_GUITAR: u16 = 0x0200;
    pub const ROCK_BAND_DRUMS: u16 = 0x0210;
}

pub mod microsoft {
    pub const XBOX360_WIRED: u16 = 0x028E;
    pub const XBOX360_WIRELESS: u16 = 0x028F;
    pub const XBOX360_WIRELESS_RECEIVER: u16 = 0x0719;
    pub const XBOX_ONE: u16 = 0x02D1;
    pub const XBOX_ONE_2015: u16 = 0x02DD;
    pub const XBOX_ONE_ELITE: u16 = 0x02E3;
    pub const XBOX_ONE_S: u16 = 0x02EA;
    pub const XBOX_ONE_ELITE_2: u16 = 0x0B00;
    pub const XBOX_SERIES: u16 = 0x0B12;
}

pub mod hori {
    /// Fighting Commander in PS4 mode.
    pub const FIGHTING_COMMANDER_PS4: u16 = 0x0066;
}

pub mod harmonix {
    pub const ROCK_BAND_GUITAR: u16 = 0x0002;
    pub const ROCK_BAND_DRUMS: u16 = 0x0003;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_ids_are_distinct() {
        let vendors = [
            SONY_VENDOR_ID,
            SONY_RHYTHM_VENDOR_ID,
            MICROSOFT_VENDOR_ID,
            MADCATZ_VENDOR_ID,
            PDP_VENDOR_ID,
            HORI_VENDOR_ID,
            HARMONIX_VENDOR_ID,
        ];
        for (i, a) in vendors.iter().enumerate() {
            for b in vendors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
