#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
#[repr(u8)]
pub enum ChannelCount {
    #[default]
    L = 1,
    LA = 2,
    Rgb = 3,
    Rgba = 4,
}

#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
#[repr(u8)]
pub enum ChannelSize {
    #[default]
    _8bit = 1,
    _16bit = 2,
    _32bit = 4,
}

#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
#[repr(u8)]
pub enum ChannelType {
    #[default]
    UInt,
    Float,
}

#[derive(Clone, Copy, Debug, Hash, Default, PartialEq, Eq)]
pub struct ColorFormat {
    pub channel_count: ChannelCount,
    pub channel_size: ChannelSize,
    pub channel_type: ChannelType,
}

impl ChannelCount {
    pub fn channel_count(&self) -> u8 {
        *self as u8
    }
    pub fn byte_count(&self, channel_size: ChannelSize) -> u8 {
        self.channel_count() * channel_size.byte_count()
    }
}

impl ChannelSize {
    pub fn byte_count(&self) -> u8 {
        *self as u8
    }
}

impl ColorFormat {
    pub const L_U8: ColorFormat = ColorFormat::new(ChannelCount::L, ChannelSize::_8bit);
    pub const L_U16: ColorFormat = ColorFormat::new(ChannelCount::L, ChannelSize::_16bit);
    pub const LA_U8: ColorFormat = ColorFormat::new(ChannelCount::LA, ChannelSize::_8bit);
    pub const LA_U16: ColorFormat = ColorFormat::new(ChannelCount::LA, ChannelSize::_16bit);
    pub const RGB_U8: ColorFormat = ColorFormat::new(ChannelCount::Rgb, ChannelSize::_8bit);
    pub const RGB_U16: ColorFormat = ColorFormat::new(ChannelCount::Rgb, ChannelSize::_16bit);
    pub const RGBA_U8: ColorFormat = ColorFormat::new(ChannelCount::Rgba, ChannelSize::_8bit);
    pub const RGBA_U16: ColorFormat = ColorFormat::new(ChannelCount::Rgba, ChannelSize::_16bit);
    pub const RGB_F32: ColorFormat = ColorFormat {
        channel_count: ChannelCount::Rgb,
        channel_size: ChannelSize::_32bit,
        channel_type: ChannelType::Float,
    };

    const fn new(channel_count: ChannelCount, channel_size: ChannelSize) -> Self {
        Self {
            channel_count,
            channel_size,
            channel_type: ChannelType::UInt,
        }
    }

    pub fn byte_count(&self) -> u8 {
        self.channel_count.byte_count(self.channel_size)
    }

    /// Returns true for formats the processing stages accept (8/16-bit unsigned).
    pub fn is_processable(&self) -> bool {
        self.channel_type == ChannelType::UInt
            && matches!(self.channel_size, ChannelSize::_8bit | ChannelSize::_16bit)
    }
}

impl From<(ChannelCount, ChannelSize, ChannelType)> for ColorFormat {
    fn from(value: (ChannelCount, ChannelSize, ChannelType)) -> Self {
        ColorFormat {
            channel_count: value.0,
            channel_size: value.1,
            channel_type: value.2,
        }
    }
}

impl std::fmt::Display for ChannelCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelCount::L => write!(f, "L"),
            ChannelCount::LA => write!(f, "LA"),
            ChannelCount::Rgb => write!(f, "RGB"),
            ChannelCount::Rgba => write!(f, "RGBA"),
        }
    }
}

impl std::fmt::Display for ChannelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelSize::_8bit => write!(f, "8"),
            ChannelSize::_16bit => write!(f, "16"),
            ChannelSize::_32bit => write!(f, "32"),
        }
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelType::UInt => write!(f, "u"),
            ChannelType::Float => write!(f, "f"),
        }
    }
}

impl std::fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}{}",
            self.channel_count, self.channel_type, self.channel_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_counts() {
        assert_eq!(ColorFormat::L_U8.byte_count(), 1);
        assert_eq!(ColorFormat::RGB_U8.byte_count(), 3);
        assert_eq!(ColorFormat::RGBA_U16.byte_count(), 8);
        assert_eq!(ColorFormat::RGB_F32.byte_count(), 12);
    }

    #[test]
    fn processable_formats() {
        assert!(ColorFormat::L_U8.is_processable());
        assert!(ColorFormat::RGBA_U16.is_processable());
        assert!(!ColorFormat::RGB_F32.is_processable());
    }

    #[test]
    fn display() {
        assert_eq!(ColorFormat::RGB_U8.to_string(), "RGB u8");
        assert_eq!(ColorFormat::L_U16.to_string(), "L u16");
    }
}
