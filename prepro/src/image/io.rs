use std::path::Path;

use ::image as image_lib;

use super::{Image, ImageDesc};
use crate::common::{ChannelCount, ChannelSize, ChannelType, ColorFormat, Error, Result};

pub(crate) fn load_png_jpeg(filename: &Path) -> Result<Image> {
    let decode_failed = |reason: String| Error::ImageDecodeFailed {
        path: filename.to_path_buf(),
        reason,
    };

    let img = image_lib::open(filename).map_err(|e| decode_failed(e.to_string()))?;

    let (channel_count, channel_size, channel_type) = match img.color() {
        image_lib::ColorType::L8 => (ChannelCount::L, ChannelSize::_8bit, ChannelType::UInt),
        image_lib::ColorType::L16 => (ChannelCount::L, ChannelSize::_16bit, ChannelType::UInt),
        image_lib::ColorType::La8 => (ChannelCount::LA, ChannelSize::_8bit, ChannelType::UInt),
        image_lib::ColorType::La16 => (ChannelCount::LA, ChannelSize::_16bit, ChannelType::UInt),
        image_lib::ColorType::Rgb8 => (ChannelCount::Rgb, ChannelSize::_8bit, ChannelType::UInt),
        image_lib::ColorType::Rgb16 => (ChannelCount::Rgb, ChannelSize::_16bit, ChannelType::UInt),
        image_lib::ColorType::Rgba8 => (ChannelCount::Rgba, ChannelSize::_8bit, ChannelType::UInt),
        image_lib::ColorType::Rgba16 => {
            (ChannelCount::Rgba, ChannelSize::_16bit, ChannelType::UInt)
        }
        image_lib::ColorType::Rgb32F => {
            (ChannelCount::Rgb, ChannelSize::_32bit, ChannelType::Float)
        }
        image_lib::ColorType::Rgba32F => {
            (ChannelCount::Rgba, ChannelSize::_32bit, ChannelType::Float)
        }
        other => return Err(decode_failed(format!("unsupported color type {:?}", other))),
    };

    let color_format = ColorFormat::from((channel_count, channel_size, channel_type));
    let desc = ImageDesc::new(img.width(), img.height(), color_format);

    Image::new_with_data(desc, img.into_bytes()).map_err(|e| decode_failed(e.to_string()))
}

pub(crate) fn save_jpg(image: &Image, filename: &Path) -> Result<()> {
    let color_type = match image.desc.color_format {
        ColorFormat::L_U8 => image_lib::ColorType::L8,
        ColorFormat::RGB_U8 => image_lib::ColorType::Rgb8,

        other => return Err(unsupported_for(filename, "JPEG", other)),
    };

    save_buffer(image, filename, color_type, image_lib::ImageFormat::Jpeg)
}

pub(crate) fn save_png(image: &Image, filename: &Path) -> Result<()> {
    let color_type = match image.desc.color_format {
        ColorFormat::L_U8 => image_lib::ColorType::L8,
        ColorFormat::LA_U8 => image_lib::ColorType::La8,
        ColorFormat::RGB_U8 => image_lib::ColorType::Rgb8,
        ColorFormat::RGBA_U8 => image_lib::ColorType::Rgba8,
        ColorFormat::L_U16 => image_lib::ColorType::L16,
        ColorFormat::LA_U16 => image_lib::ColorType::La16,
        ColorFormat::RGB_U16 => image_lib::ColorType::Rgb16,
        ColorFormat::RGBA_U16 => image_lib::ColorType::Rgba16,

        other => return Err(unsupported_for(filename, "PNG", other)),
    };

    save_buffer(image, filename, color_type, image_lib::ImageFormat::Png)
}

fn save_buffer(
    image: &Image,
    filename: &Path,
    color_type: image_lib::ColorType,
    format: image_lib::ImageFormat,
) -> Result<()> {
    image_lib::save_buffer_with_format(
        filename,
        image.bytes(),
        image.desc.width,
        image.desc.height,
        color_type,
        format,
    )
    .map_err(|e| Error::ImageEncodeFailed {
        path: filename.to_path_buf(),
        reason: e.to_string(),
    })
}

fn unsupported_for(filename: &Path, container: &str, format: ColorFormat) -> Error {
    Error::ImageEncodeFailed {
        path: filename.to_path_buf(),
        reason: format!("{} cannot store {}", container, format),
    }
}
