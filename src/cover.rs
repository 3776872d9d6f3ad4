use gpui::{Point, Size, point, size};

/// Result of fitting a video over a viewport, like `background-size: cover`
/// combined with `background-position: 50% 50%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverLayout {
    pub scale: f32,
    /// Scaled video size in pixels.
    pub video: Size<f32>,
    /// Container scroll position that centers the video in the viewport.
    pub scroll: Point<f32>,
}

impl CoverLayout {
    /// Fit `intrinsic` over `viewport`, never letting the scaled width drop below `minimum_width`.
    ///
    /// `intrinsic` must have non-zero dimensions.
    pub fn compute(intrinsic: Size<f32>, viewport: Size<f32>, minimum_width: f32) -> Self {
        let height_scale = viewport.width / intrinsic.width;
        let width_scale = viewport.height / intrinsic.height;

        let mut scale = height_scale.max(width_scale);
        if scale * intrinsic.width < minimum_width {
            scale = minimum_width / intrinsic.width;
        }

        let video = size(scale * intrinsic.width, scale * intrinsic.height);
        let scroll = point(
            (video.width - viewport.width) / 2.0,
            (video.height - viewport.height) / 2.0,
        );

        Self {
            scale,
            video,
            scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn landscape_video_in_smaller_window() {
        let layout = CoverLayout::compute(size(1920.0, 1080.0), size(800.0, 600.0), 400.0);
        assert!(close(layout.scale, 600.0 / 1080.0));
        assert!(close(layout.video.width, 1066.667));
        assert!(close(layout.video.height, 600.0));
        assert!(close(layout.scroll.x, 133.333));
        assert!(close(layout.scroll.y, 0.0));
    }

    #[test]
    fn picks_the_larger_ratio() {
        let cases = [
            (size(1920.0, 1080.0), size(400.0, 1000.0)),
            (size(640.0, 480.0), size(2560.0, 600.0)),
            (size(1000.0, 1000.0), size(333.0, 777.0)),
            (size(720.0, 1280.0), size(1280.0, 720.0)),
        ];
        for (intrinsic, viewport) in cases {
            let layout = CoverLayout::compute(intrinsic, viewport, 0.0);
            let expected = (viewport.width / intrinsic.width).max(viewport.height / intrinsic.height);
            assert!(close(layout.scale, expected));
            assert!(layout.video.width + EPS >= viewport.width);
            assert!(layout.video.height + EPS >= viewport.height);
        }
    }

    #[test]
    fn minimum_width_wins_for_tiny_viewports() {
        let layout = CoverLayout::compute(size(1920.0, 1080.0), size(200.0, 100.0), 400.0);
        assert!(close(layout.video.width, 400.0));
        assert!(close(layout.video.height, 225.0));
        assert!(close(layout.scroll.x, 100.0));
        assert!(close(layout.scroll.y, 62.5));
    }

    #[test]
    fn exact_fit_needs_no_scroll() {
        let layout = CoverLayout::compute(size(1280.0, 720.0), size(1280.0, 720.0), 400.0);
        assert!(close(layout.scale, 1.0));
        assert!(close(layout.scroll.x, 0.0));
        assert!(close(layout.scroll.y, 0.0));
    }
}
