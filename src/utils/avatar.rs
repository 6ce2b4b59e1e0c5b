use image::imageops::FilterType;

use crate::config::AppConfig;
use crate::errors::{GradeSystemError, Result};

/// 将上传的头像图片缩放到配置上限以内（默认 300x300），保持纵横比。
/// 已在上限内的图片原样返回编码结果。统一输出 PNG。
pub fn resize_avatar(data: &[u8]) -> Result<Vec<u8>> {
    let max_dim = AppConfig::get().upload.avatar_max_dimension;
    resize_avatar_with_limit(data, max_dim)
}

pub fn resize_avatar_with_limit(data: &[u8], max_dim: u32) -> Result<Vec<u8>> {
    let img = image::load_from_memory(data)
        .map_err(|e| GradeSystemError::file_operation(format!("头像解码失败: {e}")))?;

    let resized = if img.width() > max_dim || img.height() > max_dim {
        img.resize(max_dim, max_dim, FilterType::Lanczos3)
    } else {
        img
    };

    let mut out = Vec::new();
    resized
        .write_to(
            &mut std::io::Cursor::new(&mut out),
            image::ImageFormat::Png,
        )
        .map_err(|e| GradeSystemError::file_operation(format!("头像编码失败: {e}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_of_size(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(width, height);
        let mut out = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut out),
            image::ImageFormat::Png,
        )
        .unwrap();
        out
    }

    #[test]
    fn test_large_avatar_is_shrunk_keeping_aspect() {
        let data = png_of_size(600, 400);
        let resized = resize_avatar_with_limit(&data, 300).unwrap();
        let img = image::load_from_memory(&resized).unwrap();
        assert_eq!(img.width(), 300);
        assert_eq!(img.height(), 200);
    }

    #[test]
    fn test_small_avatar_is_untouched() {
        let data = png_of_size(120, 80);
        let resized = resize_avatar_with_limit(&data, 300).unwrap();
        let img = image::load_from_memory(&resized).unwrap();
        assert_eq!(img.width(), 120);
        assert_eq!(img.height(), 80);
    }

    #[test]
    fn test_garbage_input_is_rejected() {
        assert!(resize_avatar_with_limit(b"not an image", 300).is_err());
    }
}
