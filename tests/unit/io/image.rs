//! Tests for pixel rendering and PNG export

#[cfg(test)]
mod tests {
    use bitart::BitartError;
    use bitart::expression::parse_equation;
    use bitart::io::image::{export_png, render};
    use bitart::io::palette::{ColorMode, Palette};
    use bitart::spatial::Grid;
    use image::Rgb;
    use tempfile::TempDir;

    fn parity() -> (Grid, Palette) {
        let grid = Grid::evaluated(4, 2, &parse_equation("x % 2").expect("valid"));
        let palette = Palette::new(ColorMode::OneBit, &grid.analysis());
        (grid, palette)
    }

    // Tests each cell becomes a scale-by-scale block
    // Verified by painting only the top-left pixel of each block
    #[test]
    fn test_render_scales_cells() {
        let (grid, palette) = parity();
        let image = render(&grid, &palette, 4);

        assert_eq!(image.dimensions(), (16, 8));
        // Column 0 holds the most common value, column 1 the other one
        assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(3, 7), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(4, 0), Rgb([255, 255, 255]));
        assert_eq!(*image.get_pixel(7, 7), Rgb([255, 255, 255]));
        assert_eq!(*image.get_pixel(8, 3), Rgb([0, 0, 0]));
    }

    // Tests a zero scale renders one pixel per cell
    // Verified by dropping the scale floor of one
    #[test]
    fn test_render_zero_scale() {
        let (grid, palette) = parity();
        assert_eq!(render(&grid, &palette, 0).dimensions(), (4, 2));
    }

    // Tests export creates parent directories and writes a readable PNG
    // Verified by skipping parent directory creation
    #[test]
    fn test_export_png() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("a").join("b").join("out.png");
        let (grid, palette) = parity();

        export_png(&render(&grid, &palette, 2), &path).expect("export succeeds");

        let loaded = image::open(&path).expect("readable png").to_rgb8();
        assert_eq!(loaded.dimensions(), (8, 4));
        assert_eq!(*loaded.get_pixel(2, 0), Rgb([255, 255, 255]));
    }

    // Tests a blocked parent directory reports a file system error
    // Verified by mapping directory errors to image errors
    #[test]
    fn test_export_png_blocked_directory() {
        let dir = TempDir::new().expect("temp dir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").expect("write blocker");
        let (grid, palette) = parity();

        let result = export_png(&render(&grid, &palette, 1), &blocker.join("out.png"));
        assert!(matches!(result, Err(BitartError::FileSystem { .. })));
    }
}
