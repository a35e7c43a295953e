//! Capability word decoding.
//!
//! Every board reports a single capability word in its beacon. Each attribute
//! lives in a fixed bitfield; fields are masked to their width before lookup,
//! so decoding is total and never fails.
//!
//! | Field            | Bits  |
//! |------------------|-------|
//! | board type       | 1:0   |
//! | audio            | 2     |
//! | codec            | 5:3   |
//! | precision        | 6     |
//! | frame rate       | 8:7   |
//! | resolution       | 10:9  |
//! | module FPGA      | 13:11 |
//! | channels         | 19:14 |
//! | board name       | 24:20 |

use std::fmt;

use serde::Serialize;

/// Highest channel count with a defined meaning. The 6-bit field can carry 63.
pub const MAX_CHANNELS: u8 = 62;

fn field(word: u32, shift: u32, mask: u32) -> u32 {
    (word >> shift) & mask
}

/// Encoding/decoding role of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoardType {
    Neither,
    Encoder,
    Decoder,
    Both,
}

impl BoardType {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => BoardType::Neither,
            1 => BoardType::Encoder,
            2 => BoardType::Decoder,
            _ => BoardType::Both,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BoardType::Neither => "Neither",
            BoardType::Encoder => "Encoder",
            BoardType::Decoder => "Decoder",
            BoardType::Both => "Both",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Codec {
    #[serde(rename = "MPEG2")]
    Mpeg2,
    #[serde(rename = "H264")]
    H264,
    #[serde(rename = "H265")]
    H265,
    Reserved,
}

impl Codec {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b111 {
            0 => Codec::Mpeg2,
            1 => Codec::H264,
            2 => Codec::H265,
            _ => Codec::Reserved,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Codec::Mpeg2 => "MPEG2",
            Codec::H264 => "H264",
            Codec::H265 => "H265",
            Codec::Reserved => "Reserved",
        }
    }
}

/// Sample bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Precision {
    #[serde(rename = "8 Bits")]
    Bits8,
    #[serde(rename = "10 Bits")]
    Bits10,
}

impl Precision {
    fn from_bits(bits: u32) -> Self {
        if bits & 0b1 == 1 {
            Precision::Bits10
        } else {
            Precision::Bits8
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Precision::Bits8 => "8 Bits",
            Precision::Bits10 => "10 Bits",
        }
    }
}

/// Maximum frame rate class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FpsClass {
    #[serde(rename = "Up to 30")]
    UpTo30,
    #[serde(rename = "Up to 60")]
    UpTo60,
    #[serde(rename = "Up to 120")]
    UpTo120,
    Other,
}

impl FpsClass {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => FpsClass::UpTo30,
            1 => FpsClass::UpTo60,
            2 => FpsClass::UpTo120,
            _ => FpsClass::Other,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FpsClass::UpTo30 => "Up to 30",
            FpsClass::UpTo60 => "Up to 60",
            FpsClass::UpTo120 => "Up to 120",
            FpsClass::Other => "Other",
        }
    }
}

/// Maximum resolution class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolutionClass {
    #[serde(rename = "Up to 1080p")]
    UpTo1080p,
    #[serde(rename = "Up to 4K")]
    UpTo4K,
    #[serde(rename = "Up to 8K")]
    UpTo8K,
    Other,
}

impl ResolutionClass {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => ResolutionClass::UpTo1080p,
            1 => ResolutionClass::UpTo4K,
            2 => ResolutionClass::UpTo8K,
            _ => ResolutionClass::Other,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ResolutionClass::UpTo1080p => "Up to 1080p",
            ResolutionClass::UpTo4K => "Up to 4K",
            ResolutionClass::UpTo8K => "Up to 8K",
            ResolutionClass::Other => "Other",
        }
    }
}

/// FPGA fitted on the board's module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModuleFpga {
    None,
    Artix,
    Zynq,
    Arria10,
    Reserved,
}

impl ModuleFpga {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b111 {
            0 => ModuleFpga::None,
            1 => ModuleFpga::Artix,
            2 => ModuleFpga::Zynq,
            3 => ModuleFpga::Arria10,
            _ => ModuleFpga::Reserved,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleFpga::None => "None",
            ModuleFpga::Artix => "Artix",
            ModuleFpga::Zynq => "Zynq",
            ModuleFpga::Arria10 => "Arria10",
            ModuleFpga::Reserved => "Reserved",
        }
    }
}

/// Product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoardName {
    S1000,
    #[serde(rename = "VTR4000C")]
    Vtr4000C,
    #[serde(rename = "VoIP-X")]
    VoipX,
    #[serde(rename = "VoIP-I")]
    VoipI,
    Reserved,
}

impl BoardName {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b11111 {
            0 => BoardName::S1000,
            1 => BoardName::Vtr4000C,
            2 => BoardName::VoipX,
            3 => BoardName::VoipI,
            _ => BoardName::Reserved,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BoardName::S1000 => "S1000",
            BoardName::Vtr4000C => "VTR4000C",
            BoardName::VoipX => "VoIP-X",
            BoardName::VoipI => "VoIP-I",
            BoardName::Reserved => "Reserved",
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.display_name())
            }
        })*
    };
}

impl_display!(BoardType, Codec, Precision, FpsClass, ResolutionClass, ModuleFpga, BoardName);

/// Hardware attributes decoded from a capability word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardCapabilities {
    /// Raw word the attributes were decoded from
    #[serde(skip)]
    pub word: u32,
    pub board_type: BoardType,
    pub has_audio: bool,
    pub codec: Codec,
    pub precision: Precision,
    #[serde(rename = "fps")]
    pub fps_class: FpsClass,
    #[serde(rename = "resolution")]
    pub resolution_class: ResolutionClass,
    pub module_fpga: ModuleFpga,
    /// 0..=62
    #[serde(rename = "channels")]
    pub channel_count: u8,
    pub board_name: BoardName,
}

impl BoardCapabilities {
    /// Decode a capability word.
    pub fn decode(word: u32) -> Self {
        let channels = field(word, 14, 0b111111) as u8;

        Self {
            word,
            board_type: BoardType::from_bits(field(word, 0, 0b11)),
            has_audio: field(word, 2, 0b1) == 1,
            codec: Codec::from_bits(field(word, 3, 0b111)),
            precision: Precision::from_bits(field(word, 6, 0b1)),
            fps_class: FpsClass::from_bits(field(word, 7, 0b11)),
            resolution_class: ResolutionClass::from_bits(field(word, 9, 0b11)),
            module_fpga: ModuleFpga::from_bits(field(word, 11, 0b111)),
            channel_count: channels.min(MAX_CHANNELS),
            board_name: BoardName::from_bits(field(word, 20, 0b11111)),
        }
    }

    /// Attribute name/value pairs in display order.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("board_type", self.board_type.to_string()),
            ("has_audio", self.has_audio.to_string()),
            ("codec", self.codec.to_string()),
            ("precision", self.precision.to_string()),
            ("fps", self.fps_class.to_string()),
            ("resolution", self.resolution_class.to_string()),
            ("module_fpga", self.module_fpga.to_string()),
            ("channels", self.channel_count.to_string()),
            ("board_name", self.board_name.to_string()),
        ]
    }
}

impl From<u32> for BoardCapabilities {
    fn from(word: u32) -> Self {
        Self::decode(word)
    }
}
