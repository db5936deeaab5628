use crate::error::{Error, Result};
use image::RgbaImage;
use log::info;
use std::path::Path;

/// Saves an RGBA snapshot; the format follows the file extension.
pub fn save_snapshot<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    image.save(path).map_err(|source| Error::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved snapshot to {:?} ({}x{})", path, image.width(), image.height());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_png_and_reports_bad_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let img = RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 0]));
        save_snapshot(&img, &path).unwrap();
        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.get_pixel(2, 1), &image::Rgba([10, 20, 30, 0]));

        let missing = dir.path().join("no/such/dir/frame.png");
        assert!(matches!(save_snapshot(&img, missing), Err(Error::Snapshot { .. })));
    }
}
