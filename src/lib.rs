//! USB string descriptors for the foot_switch_pro MIDI foot controller, for
//! [usb-device](https://crates.io/crates/usb-device).
//!
//! The product (`foot_switch_pro`) and manufacturer (`Beshanoe`) names are encoded
//! into their USB wire format by the compiler and exposed as two statics. A
//! [`StringTable`](string_table::StringTable) serves them to the host when it asks
//! for a string descriptor during enumeration.
//!
//! ```rust
//! use foot_switch_pro_strings::prelude::*;
//!
//! assert_eq!(PRODUCT_NAME.total_length(), 32);
//! assert_eq!(MANUFACTURER_NAME.as_bytes()[..4], [18, 3, b'B', 0]);
//!
//! let table = StringTable::foot_switch_pro().unwrap();
//! assert_eq!(table.get(PRODUCT_STRING_INDEX), Some(&PRODUCT_NAME));
//! ```
//!
//! The table is passed to `UsbDevice::poll` alongside the device's other classes:
//!
//! ```rust, ignore
//! let mut strings = StringTable::foot_switch_pro().unwrap();
//!
//! let mut usb_dev = UsbDeviceBuilder::new(&usb_alloc, UsbVidPid(0x1209, 0x0001))
//!     .manufacturer(MANUFACTURER_TEXT)
//!     .product(PRODUCT_TEXT)
//!     .build();
//!
//! loop {
//!     usb_dev.poll(&mut [&mut midi, &mut strings]);
//! }
//! ```

#![no_std]

//Allow the use of std in tests
#[cfg(test)]
#[macro_use]
extern crate std;

use core::fmt;

pub mod descriptor;
pub mod names;
pub mod prelude;
pub mod string_table;

/// The text does not fit in a string descriptor's 8-bit length field.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorTooLongError {
    /// Character count of the rejected text
    pub length: usize,
}

impl fmt::Display for DescriptorTooLongError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "string of {} characters exceeds the {} a descriptor can hold",
            self.length,
            descriptor::MAX_CHARACTERS
        )
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringDescriptorError {
    TooLong(DescriptorTooLongError),
    /// Needs a surrogate pair, which a descriptor character cannot hold
    UnsupportedCharacter {
        position: usize,
        character: char,
    },
    Truncated,
    InvalidLength {
        length: u8,
    },
    WrongDescriptorType {
        found: u8,
    },
    /// Lone surrogate in received bytes
    InvalidCodeUnit {
        position: usize,
        unit: u16,
    },
}

impl From<DescriptorTooLongError> for StringDescriptorError {
    fn from(e: DescriptorTooLongError) -> Self {
        StringDescriptorError::TooLong(e)
    }
}

impl fmt::Display for StringDescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringDescriptorError::TooLong(e) => fmt::Display::fmt(e, f),
            StringDescriptorError::UnsupportedCharacter {
                position,
                character,
            } => write!(
                f,
                "character {:?} at position {} is outside the Basic Multilingual Plane",
                character, position
            ),
            StringDescriptorError::Truncated => write!(f, "descriptor is truncated"),
            StringDescriptorError::InvalidLength { length } => {
                write!(f, "invalid string descriptor length {}", length)
            }
            StringDescriptorError::WrongDescriptorType { found } => {
                write!(f, "expected a string descriptor, found type {:#04X}", found)
            }
            StringDescriptorError::InvalidCodeUnit { position, unit } => {
                write!(f, "lone surrogate {:#06X} at position {}", unit, position)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn errors_display() {
        assert_eq!(
            StringDescriptorError::from(DescriptorTooLongError { length: 127 }).to_string(),
            "string of 127 characters exceeds the 126 a descriptor can hold"
        );
        assert_eq!(
            StringDescriptorError::WrongDescriptorType { found: 2 }.to_string(),
            "expected a string descriptor, found type 0x02"
        );
        assert_eq!(
            StringDescriptorError::InvalidCodeUnit {
                position: 1,
                unit: 0xD83C
            }
            .to_string(),
            "lone surrogate 0xD83C at position 1"
        );
    }
}
