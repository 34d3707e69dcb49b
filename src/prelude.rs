//! The foot_switch_pro strings prelude.
//!
//! The purpose of this module is to alleviate imports of the descriptors, index
//! constants and the table that serves them:
//!
//! ```
//! # #![allow(unused_imports)]
//! use foot_switch_pro_strings::prelude::*;
//! ```

pub use crate::descriptor::{DescriptorType, UsbStringDescriptor};
pub use crate::names::{
    MANUFACTURER_NAME, MANUFACTURER_STRING_INDEX, MANUFACTURER_TEXT, PRODUCT_NAME,
    PRODUCT_STRING_INDEX, PRODUCT_TEXT,
};
pub use crate::string_table::{StringTable, StringTableBuilder, StringTableError};
pub use crate::{DescriptorTooLongError, StringDescriptorError};
