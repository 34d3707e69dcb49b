//! USB string descriptor constants and encoding
//!
//! A string descriptor is laid out on the wire as:
//!
//! | Offset | Field             | Size  | Value                          |
//! |--------|-------------------|-------|--------------------------------|
//! | 0      | `bLength`         | 1     | `2 + 2 * N`                    |
//! | 1      | `bDescriptorType` | 1     | `0x03`                         |
//! | 2      | `bString`         | 2 * N | N little-endian UTF-16 units   |
use core::fmt::{self, Write};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use packed_struct::prelude::*;

use crate::{DescriptorTooLongError, StringDescriptorError};

/// `bLength` and `bDescriptorType`
pub const HEADER_LENGTH: usize = 2;
/// Largest character count whose encoded length still fits in `bLength`
pub const MAX_CHARACTERS: usize = (u8::MAX as usize - HEADER_LENGTH) / 2;
pub const MAX_DESCRIPTOR_LENGTH: usize = HEADER_LENGTH + 2 * MAX_CHARACTERS;

/// Standard descriptor types, USB 2.0 table 9-5
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum DescriptorType {
    Device = 0x01,
    Configuration = 0x02,
    String = 0x03,
    Interface = 0x04,
    Endpoint = 0x05,
    DeviceQualifier = 0x06,
    OtherSpeedConfiguration = 0x07,
    InterfacePower = 0x08,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PackedStruct)]
#[packed_struct(endian = "lsb", bit_numbering = "msb0", size_bytes = "2")]
pub struct StringDescriptorHeader {
    pub length: u8,
    pub descriptor_type: u8,
}

/// An encoded USB string descriptor.
///
/// Holds the complete wire image, so [`as_bytes`](Self::as_bytes) can be handed
/// straight to a control transfer. Bytes past `bLength` are always zero, which makes
/// two descriptors built from the same text bitwise equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsbStringDescriptor {
    bytes: [u8; MAX_DESCRIPTOR_LENGTH],
}

impl UsbStringDescriptor {
    /// Encodes `text` as a string descriptor.
    ///
    /// Every character of `text` must fit in a single UTF-16 code unit, and `text`
    /// must have at most [`MAX_CHARACTERS`] characters.
    pub const fn build(text: &str) -> Result<Self, StringDescriptorError> {
        let source = text.as_bytes();

        let length = count_characters(source);
        if length > MAX_CHARACTERS {
            return Err(StringDescriptorError::TooLong(DescriptorTooLongError {
                length,
            }));
        }

        let mut bytes = [0_u8; MAX_DESCRIPTOR_LENGTH];
        let mut offset = 0;
        let mut position = 0;
        while offset < source.len() {
            let (unit, width) = match decode_code_unit(source, offset) {
                Ok(decoded) => decoded,
                Err(character) => {
                    return Err(StringDescriptorError::UnsupportedCharacter {
                        position,
                        character,
                    })
                }
            };

            let [low, high] = unit.to_le_bytes();
            bytes[HEADER_LENGTH + 2 * position] = low;
            bytes[HEADER_LENGTH + 2 * position + 1] = high;

            offset += width;
            position += 1;
        }

        bytes[0] = (HEADER_LENGTH + 2 * length) as u8;
        bytes[1] = DescriptorType::String as u8;

        Ok(Self { bytes })
    }

    /// Encodes `text`, panicking if [`build`](Self::build) would fail.
    ///
    /// # Panics
    ///
    /// On the same inputs `build` rejects. Used in a `static` or `const` initializer
    /// this becomes a compile error instead.
    pub const fn from_literal(text: &str) -> Self {
        match Self::build(text) {
            Ok(descriptor) => descriptor,
            Err(StringDescriptorError::TooLong(_)) => {
                panic!("string descriptor text is longer than 126 characters")
            }
            Err(_) => panic!("string descriptor text contains a character outside the BMP"),
        }
    }

    /// Decodes a descriptor received over the wire.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StringDescriptorError> {
        let header: &[u8; HEADER_LENGTH] = bytes
            .get(..HEADER_LENGTH)
            .and_then(|header| header.try_into().ok())
            .ok_or(StringDescriptorError::Truncated)?;
        let header =
            StringDescriptorHeader::unpack(header).map_err(|_| StringDescriptorError::Truncated)?;

        if header.descriptor_type != u8::from(DescriptorType::String) {
            return Err(StringDescriptorError::WrongDescriptorType {
                found: header.descriptor_type,
            });
        }

        let length = usize::from(header.length);
        if length < HEADER_LENGTH || length % 2 != 0 {
            return Err(StringDescriptorError::InvalidLength {
                length: header.length,
            });
        }
        match bytes.len() {
            n if n < length => return Err(StringDescriptorError::Truncated),
            n if n > length => {
                return Err(StringDescriptorError::InvalidLength {
                    length: header.length,
                })
            }
            _ => {}
        }

        let mut descriptor = Self {
            bytes: [0; MAX_DESCRIPTOR_LENGTH],
        };
        descriptor.bytes[..length].copy_from_slice(bytes);

        if let Some((position, unit)) = descriptor
            .characters()
            .enumerate()
            .find(|(_, unit)| is_surrogate(*unit))
        {
            return Err(StringDescriptorError::InvalidCodeUnit { position, unit });
        }

        Ok(descriptor)
    }

    /// `bLength`, header included
    pub const fn total_length(&self) -> u8 {
        self.bytes[0]
    }

    pub const fn descriptor_type(&self) -> DescriptorType {
        DescriptorType::String
    }

    /// Number of characters
    pub const fn len(&self) -> usize {
        (self.bytes[0] as usize - HEADER_LENGTH) / 2
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The UTF-16 code units of the string, in order
    pub fn characters(&self) -> impl Iterator<Item = u16> + '_ {
        self.as_bytes()[HEADER_LENGTH..]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
    }

    /// The descriptor exactly as sent to the host
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.total_length())]
    }
}

impl fmt::Display for UsbStringDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        char::decode_utf16(self.characters())
            .try_for_each(|c| f.write_char(c.unwrap_or(char::REPLACEMENT_CHARACTER)))
    }
}

impl fmt::Debug for UsbStringDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsbStringDescriptor")
            .field("length", &self.total_length())
            .field("descriptor_type", &self.descriptor_type())
            .field("text", &format_args!("\"{}\"", self))
            .finish()
    }
}

impl TryFrom<&str> for UsbStringDescriptor {
    type Error = StringDescriptorError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::build(text)
    }
}

const fn is_surrogate(unit: u16) -> bool {
    unit >= 0xD800 && unit <= 0xDFFF
}

const fn count_characters(source: &[u8]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < source.len() {
        // continuation bytes are 0b10xx_xxxx
        if source[i] & 0xC0 != 0x80 {
            count += 1;
        }
        i += 1;
    }
    count
}

/// Decodes the character starting at `offset` of valid UTF-8.
///
/// Returns the character as a single UTF-16 code unit and its width in bytes, or
/// the character itself if it lies outside the Basic Multilingual Plane.
const fn decode_code_unit(source: &[u8], offset: usize) -> Result<(u16, usize), char> {
    let first = source[offset];
    if first < 0x80 {
        return Ok((first as u16, 1));
    }

    if first & 0xE0 == 0xC0 {
        let unit = ((first & 0x1F) as u16) << 6 | (source[offset + 1] & 0x3F) as u16;
        return Ok((unit, 2));
    }

    if first & 0xF0 == 0xE0 {
        let unit = ((first & 0x0F) as u16) << 12
            | ((source[offset + 1] & 0x3F) as u16) << 6
            | (source[offset + 2] & 0x3F) as u16;
        return Ok((unit, 3));
    }

    let scalar = ((first & 0x07) as u32) << 18
        | ((source[offset + 1] & 0x3F) as u32) << 12
        | ((source[offset + 2] & 0x3F) as u32) << 6
        | (source[offset + 3] & 0x3F) as u32;
    match char::from_u32(scalar) {
        Some(character) => Err(character),
        None => Err(char::REPLACEMENT_CHARACTER),
    }
}
