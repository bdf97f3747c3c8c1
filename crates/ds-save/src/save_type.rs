//! Cartridge save memory types offered for manual reconfiguration

/// DS cartridge save memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NdsSaveType {
    None,
    Eeprom512,
    Eeprom8K,
    Eeprom64K,
    Eeprom128K,
    Fram32K,
    Flash256K,
    Flash512K,
    Flash1M,
    Flash8M,
}

impl NdsSaveType {
    pub const ALL: [NdsSaveType; 10] = [
        Self::None,
        Self::Eeprom512,
        Self::Eeprom8K,
        Self::Eeprom64K,
        Self::Eeprom128K,
        Self::Fram32K,
        Self::Flash256K,
        Self::Flash512K,
        Self::Flash1M,
        Self::Flash8M,
    ];

    /// Save size in bytes
    pub fn size(self) -> usize {
        match self {
            Self::None => 0,
            Self::Eeprom512 => 0x200,
            Self::Eeprom8K => 0x2000,
            Self::Eeprom64K => 0x10000,
            Self::Eeprom128K => 0x20000,
            Self::Fram32K => 0x8000,
            Self::Flash256K => 0x40000,
            Self::Flash512K => 0x80000,
            Self::Flash1M => 0x100000,
            Self::Flash8M => 0x800000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Eeprom512 => "EEPROM 0.5KB",
            Self::Eeprom8K => "EEPROM 8KB",
            Self::Eeprom64K => "EEPROM 64KB",
            Self::Eeprom128K => "EEPROM 128KB",
            Self::Fram32K => "FRAM 32KB",
            Self::Flash256K => "FLASH 256KB",
            Self::Flash512K => "FLASH 512KB",
            Self::Flash1M => "FLASH 1024KB",
            Self::Flash8M => "FLASH 8192KB",
        }
    }
}

/// GBA cartridge save memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GbaSaveType {
    None,
    Eeprom512,
    Eeprom8K,
    Sram32K,
    Flash64K,
    Flash128K,
}

impl GbaSaveType {
    pub const ALL: [GbaSaveType; 6] = [
        Self::None,
        Self::Eeprom512,
        Self::Eeprom8K,
        Self::Sram32K,
        Self::Flash64K,
        Self::Flash128K,
    ];

    /// Save size in bytes
    pub fn size(self) -> usize {
        match self {
            Self::None => 0,
            Self::Eeprom512 => 0x200,
            Self::Eeprom8K => 0x2000,
            Self::Sram32K => 0x8000,
            Self::Flash64K => 0x10000,
            Self::Flash128K => 0x20000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Eeprom512 => "EEPROM 0.5KB",
            Self::Eeprom8K => "EEPROM 8KB",
            Self::Sram32K => "SRAM 32KB",
            Self::Flash64K => "FLASH 64KB",
            Self::Flash128K => "FLASH 128KB",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(NdsSaveType::Flash1M.size(), 1024 * 1024);
        assert_eq!(NdsSaveType::Fram32K.size(), 32 * 1024);
        assert_eq!(GbaSaveType::Sram32K.size(), 32 * 1024);
        assert_eq!(GbaSaveType::ALL[0].size(), 0);
    }
}
