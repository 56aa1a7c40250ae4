use crate::error::CartridgeError;

use super::ROM_BANK_SIZE;

/// Boot logo bitmap every licensed image carries at 0x0104.
pub const NINTENDO_LOGO: [u8; 48] = [
    0xCE, 0xED, 0x66, 0x66, 0xCC, 0x0D, 0x00, 0x0B, 0x03, 0x73, 0x00, 0x83, 0x00, 0x0C, 0x00, 0x0D,
    0x00, 0x08, 0x11, 0x1F, 0x88, 0x89, 0x00, 0x0E, 0xDC, 0xCC, 0x6E, 0xE6, 0xDD, 0xDD, 0xD9, 0x99,
    0xBB, 0xBB, 0x67, 0x63, 0x6E, 0x0E, 0xEC, 0xCC, 0xDD, 0xDC, 0x99, 0x9F, 0xBB, 0xB9, 0x33, 0x3E,
];

const LOGO_START: usize = 0x0104;
const TITLE: std::ops::Range<usize> = 0x0134..0x0144;
const CART_TYPE: usize = 0x0147;
const ROM_SIZE: usize = 0x0148;
const RAM_SIZE: usize = 0x0149;
/// The header ends at 0x014F; anything shorter cannot be a ROM image.
pub const HEADER_END: usize = 0x0150;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartridgeKind {
    RomOnly,
    Mbc1,
    Mbc2,
    Mbc3 { has_rtc: bool },
}

/// The fields of the cartridge header that drive controller selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub cart_type: u8,
    pub kind: CartridgeKind,
    pub rom_banks: usize,
    /// External RAM size in bytes. MBC2's built-in RAM is not counted.
    pub ram_size: usize,
}

impl Header {
    pub fn parse(rom: &[u8]) -> Result<Self, CartridgeError> {
        if rom.len() < HEADER_END {
            return Err(CartridgeError::TooSmall {
                len: rom.len(),
                required: HEADER_END,
            });
        }

        if rom[LOGO_START..LOGO_START + NINTENDO_LOGO.len()] != NINTENDO_LOGO {
            return Err(CartridgeError::InvalidFormat);
        }

        let rom_banks = rom_bank_count(rom[ROM_SIZE]).ok_or(CartridgeError::InvalidFormat)?;
        let required = rom_banks * ROM_BANK_SIZE;
        if rom.len() < required {
            return Err(CartridgeError::TooSmall {
                len: rom.len(),
                required,
            });
        }

        let cart_type = rom[CART_TYPE];
        let kind = match cart_type {
            0x00 | 0x08 | 0x09 => CartridgeKind::RomOnly,
            0x01..=0x03 => CartridgeKind::Mbc1,
            0x05 | 0x06 => CartridgeKind::Mbc2,
            0x0F | 0x10 => CartridgeKind::Mbc3 { has_rtc: true },
            0x11..=0x13 => CartridgeKind::Mbc3 { has_rtc: false },
            other => return Err(CartridgeError::Unsupported(other)),
        };

        let ram_size = match rom[RAM_SIZE] {
            0x01 => 0x800,
            0x02 => 0x2000,
            0x03 => 4 * 0x2000,
            0x04 => 16 * 0x2000,
            0x05 => 8 * 0x2000,
            _ => 0,
        };

        let title = rom[TITLE]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect();

        Ok(Header {
            title,
            cart_type,
            kind,
            rom_banks,
            ram_size,
        })
    }
}

/// Number of 16 KiB banks declared by the ROM size byte (0x0148).
fn rom_bank_count(code: u8) -> Option<usize> {
    match code {
        0x00..=0x08 => Some(2usize << code),
        0x52 => Some(72),
        0x53 => Some(80),
        0x54 => Some(96),
        _ => None,
    }
}
