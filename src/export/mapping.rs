use super::ExportError;
use crate::geometry::Point;

/// Maps overlay coordinates onto the first PDF page.
///
/// The overlay container is stretched to the page independently on each
/// axis; PDF user space has its origin at the bottom-left, so y is flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMapping {
    pub page_width: f64,
    pub page_height: f64,
    pub x_scale: f64,
    pub y_scale: f64,
}

impl PageMapping {
    pub fn new(
        page_width: f64,
        page_height: f64,
        container_width: f64,
        container_height: f64,
    ) -> Result<Self, ExportError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(container_width) || !valid(container_height) {
            return Err(ExportError::InvalidContainer {
                width: container_width,
                height: container_height,
            });
        }
        if !valid(page_width) || !valid(page_height) {
            return Err(ExportError::InvalidPage(format!(
                "page size {page_width}x{page_height} is not usable"
            )));
        }
        Ok(Self {
            page_width,
            page_height,
            x_scale: page_width / container_width,
            y_scale: page_height / container_height,
        })
    }

    pub fn to_pdf(&self, overlay: Point) -> Point {
        Point::new(
            overlay.x * self.x_scale,
            self.page_height - overlay.y * self.y_scale,
        )
    }

    /// Scale applied to lengths that have no axis, such as wall thickness.
    pub fn length_scale(&self) -> f64 {
        (self.x_scale + self.y_scale) / 2.0
    }
}
