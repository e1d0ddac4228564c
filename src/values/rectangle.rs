use serde::{Deserialize, Serialize};

/// Edge offsets, e.g. screen-space bounds or padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Rectangle {
    /// Edges in CSS order: top, right, bottom, left.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_order() {
        let r = Rectangle::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(r.top, 1.0);
        assert_eq!(r.right, 2.0);
        assert_eq!(r.bottom, 3.0);
        assert_eq!(r.left, 4.0);
    }

    #[test]
    fn test_dto() {
        let r: Rectangle = serde_json::from_str(r#"{"top":0,"left":10,"right":110,"bottom":50}"#).unwrap();
        assert_eq!(r, Rectangle::new(0.0, 110.0, 50.0, 10.0));
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
    }
}
