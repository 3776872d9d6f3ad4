use crate::vendor::Vendor;

/// Vertical translation applied to the video by the parallax effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    translate_y: f32,
    three_d: bool,
}

impl Transform {
    pub fn translate_y(translate_y: f32, three_d: bool) -> Self {
        Self {
            translate_y,
            three_d,
        }
    }

    pub fn identity(three_d: bool) -> Self {
        Self::translate_y(0.0, three_d)
    }

    /// Vertical offset in pixels.
    pub fn y(&self) -> f32 {
        self.translate_y
    }

    /// Whether the 3-D form is used, which lets compositors promote the video to its own layer.
    pub fn is_3d(&self) -> bool {
        self.three_d
    }

    /// CSS value, `translate3d(0, Ypx, 0)` or `translate(0, Ypx)`.
    pub fn css(&self) -> String {
        if self.three_d {
            format!("translate3d(0, {}px, 0)", self.translate_y)
        } else {
            format!("translate(0, {}px)", self.translate_y)
        }
    }

    /// Property/value pairs for hosts that apply style declarations: the
    /// vendor-prefixed property first when a vendor is known, then `transform`.
    pub fn declarations(&self, vendor: Option<Vendor>) -> Vec<(String, String)> {
        let value = self.css();
        let mut out = Vec::with_capacity(2);
        if let Some(vendor) = vendor {
            out.push((format!("{}transform", vendor.prefix()), value.clone()));
        }
        out.push(("transform".to_string(), value));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_forms() {
        assert_eq!(Transform::translate_y(12.5, true).css(), "translate3d(0, 12.5px, 0)");
        assert_eq!(Transform::translate_y(40.0, false).css(), "translate(0, 40px)");
        assert_eq!(Transform::identity(false).css(), "translate(0, 0px)");
    }

    #[test]
    fn declarations_include_prefix_only_when_vendor_known() {
        let t = Transform::translate_y(10.0, true);
        assert_eq!(
            t.declarations(Some(Vendor::Firefox)),
            vec![
                ("-moz-transform".to_string(), "translate3d(0, 10px, 0)".to_string()),
                ("transform".to_string(), "translate3d(0, 10px, 0)".to_string()),
            ]
        );
        assert_eq!(t.declarations(None).len(), 1);
    }
}
