//! Serves string descriptors to the host through `usb-device`

use core::fmt;

use heapless::Vec;
use log::{error, trace};
use usb_device::class_prelude::*;
use usb_device::control::{Recipient, Request, RequestType};
use usb_device::descriptor::descriptor_type;

use crate::descriptor::UsbStringDescriptor;
use crate::names::{
    MANUFACTURER_NAME, MANUFACTURER_STRING_INDEX, PRODUCT_NAME, PRODUCT_STRING_INDEX,
};


pub const MAX_STRINGS: usize = 8;

/// String index 0 is the supported language list, answered by the USB stack
const LANGUAGE_TABLE_INDEX: u8 = 0;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringTableError {
    IndexReserved,
    DuplicateIndex(u8),
    TableFull,
}

impl fmt::Display for StringTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringTableError::IndexReserved => {
                write!(f, "string index 0 is reserved for the language table")
            }
            StringTableError::DuplicateIndex(index) => {
                write!(f, "string index {} is already in use", index)
            }
            StringTableError::TableFull => {
                write!(f, "string table is limited to {} entries", MAX_STRINGS)
            }
        }
    }
}

type BuilderResult<B> = core::result::Result<B, StringTableError>;

#[must_use = "this `StringTableBuilder` must be assigned or consumed by `::build()`"]
#[derive(Debug, Clone, Default)]
pub struct StringTableBuilder<'a> {
    entries: Vec<(u8, &'a UsbStringDescriptor), MAX_STRINGS>,
}

impl<'a> StringTableBuilder<'a> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(mut self, index: u8, descriptor: &'a UsbStringDescriptor) -> BuilderResult<Self> {
        if index == LANGUAGE_TABLE_INDEX {
            return Err(StringTableError::IndexReserved);
        }
        if self.entries.iter().any(|(i, _)| *i == index) {
            return Err(StringTableError::DuplicateIndex(index));
        }
        self.entries
            .push((index, descriptor))
            .map_err(|_| StringTableError::TableFull)?;
        Ok(self)
    }

    pub fn build(self) -> StringTable<'a> {
        StringTable {
            entries: self.entries,
        }
    }
}

/// Maps string indices to descriptors.
///
/// As a [`UsbClass`] it answers a standard GET_DESCRIPTOR(STRING) request for any
/// index it holds with that descriptor's bytes, and leaves every other request to the
/// USB stack. It claims no interfaces or endpoints.
#[derive(Debug, Clone)]
pub struct StringTable<'a> {
    entries: Vec<(u8, &'a UsbStringDescriptor), MAX_STRINGS>,
}

impl StringTable<'static> {
    /// Manufacturer and product names at the indices `usb-device` advertises for them
    pub fn foot_switch_pro() -> BuilderResult<Self> {
        Ok(StringTableBuilder::new()
            .add(MANUFACTURER_STRING_INDEX, &MANUFACTURER_NAME)?
            .add(PRODUCT_STRING_INDEX, &PRODUCT_NAME)?
            .build())
    }
}

impl<'a> StringTable<'a> {
    pub fn get(&self, index: u8) -> Option<&'a UsbStringDescriptor> {
        self.entries
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, descriptor)| *descriptor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &'a UsbStringDescriptor)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<B: UsbBus> UsbClass<B> for StringTable<'_> {
    fn control_in(&mut self, transfer: ControlIn<B>) {
        let request: &Request = transfer.request();

        if !(request.request_type == RequestType::Standard
            && request.recipient == Recipient::Device
            && request.request == Request::GET_DESCRIPTOR)
        {
            return;
        }

        if (request.value >> 8) as u8 != descriptor_type::STRING {
            return;
        }

        let index = (request.value & 0xFF) as u8;
        let lang_id = request.index;

        let descriptor = match self.get(index) {
            Some(descriptor) => descriptor,
            None => return,
        };

        match transfer.accept_with(descriptor.as_bytes()) {
            Err(e) => error!("Failed to send string descriptor {} - {:?}", index, e),
            Ok(_) => {
                trace!(
                    "Sent string descriptor {}, lang id:{:X}, {} bytes",
                    index,
                    lang_id,
                    descriptor.total_length()
                )
            }
        }
    }
}
