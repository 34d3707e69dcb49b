//! The foot_switch_pro product and manufacturer names
//!
//! Both descriptors are evaluated by the compiler: an edit that makes either text
//! unencodable fails the build rather than the enumeration.

use crate::descriptor::UsbStringDescriptor;

pub const PRODUCT_TEXT: &str = "foot_switch_pro";
pub const MANUFACTURER_TEXT: &str = "Beshanoe";
pub const FIRMWARE_VERSION: &str = "1.0";

/// What the device reports when the configuration tool asks it to identify itself.
/// Always `{PRODUCT_TEXT}-v{FIRMWARE_VERSION}`.
pub const DEVICE_IDENTITY: &str = "foot_switch_pro-v1.0";

/// `iManufacturer` as written by `usb-device` when a manufacturer is configured
pub const MANUFACTURER_STRING_INDEX: u8 = 1;
/// `iProduct` as written by `usb-device` when a product is configured
pub const PRODUCT_STRING_INDEX: u8 = 2;

pub static PRODUCT_NAME: UsbStringDescriptor = UsbStringDescriptor::from_literal(PRODUCT_TEXT);

pub static MANUFACTURER_NAME: UsbStringDescriptor =
    UsbStringDescriptor::from_literal(MANUFACTURER_TEXT);

#[cfg(test)]
mod tests {
    use std::string::ToString;
    use std::vec::Vec;

    use super::*;
    use crate::descriptor::DescriptorType;

    #[test]
    fn product_name() {
        assert_eq!(PRODUCT_NAME.total_length(), 32);
        assert_eq!(PRODUCT_NAME.descriptor_type(), DescriptorType::String);
        assert_eq!(
            PRODUCT_NAME.characters().collect::<Vec<_>>(),
            [
                'f', 'o', 'o', 't', '_', 's', 'w', 'i', 't', 'c', 'h', '_', 'p', 'r', 'o'
            ]
            .map(|c| c as u16)
        );
        assert_eq!(PRODUCT_NAME.to_string(), PRODUCT_TEXT);
    }

    #[test]
    fn manufacturer_name() {
        assert_eq!(MANUFACTURER_NAME.total_length(), 18);
        assert_eq!(MANUFACTURER_NAME.descriptor_type(), DescriptorType::String);
        assert_eq!(
            MANUFACTURER_NAME.characters().collect::<Vec<_>>(),
            ['B', 'e', 's', 'h', 'a', 'n', 'o', 'e'].map(|c| c as u16)
        );
        assert_eq!(MANUFACTURER_NAME.to_string(), MANUFACTURER_TEXT);
    }

    #[test]
    fn wire_images() {
        assert_eq!(
            MANUFACTURER_NAME.as_bytes(),
            &[
                18, 3, b'B', 0, b'e', 0, b's', 0, b'h', 0, b'a', 0, b'n', 0, b'o', 0, b'e', 0
            ]
        );
        assert_eq!(&PRODUCT_NAME.as_bytes()[..6], &[32, 3, b'f', 0, b'o', 0]);
        assert_eq!(PRODUCT_NAME.as_bytes().len(), 32);
    }

    #[test]
    fn statics_match_a_runtime_build() {
        assert_eq!(
            UsbStringDescriptor::build(PRODUCT_TEXT).unwrap(),
            PRODUCT_NAME
        );
        assert_eq!(
            UsbStringDescriptor::build(MANUFACTURER_TEXT).unwrap(),
            MANUFACTURER_NAME
        );
    }

    #[test]
    fn device_identity_is_product_and_version() {
        assert_eq!(
            DEVICE_IDENTITY,
            std::format!("{}-v{}", PRODUCT_TEXT, FIRMWARE_VERSION)
        );
    }
}
