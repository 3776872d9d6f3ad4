use crate::transform::Transform;
use crate::vendor::Vendor;
use gpui::{Point, Size};

/// How much media data the video has buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ReadyState {
    #[default]
    HaveNothing,
    HaveMetadata,
    HaveCurrentData,
    HaveFutureData,
    /// Enough data to play through; intrinsic size is known.
    HaveEnoughData,
}

/// Everything [`BackgroundVideo`](crate::BackgroundVideo) reads from and
/// writes to its host: the window, the video wrap and the video itself.
pub trait Surface {
    /// Window viewport size in pixels.
    fn viewport_size(&self) -> Size<f32>;

    /// Size of the outer reference element.
    fn outer_size(&self) -> Size<f32>;

    /// Vertical scroll position of the page.
    fn scroll_top(&self) -> f32;

    fn container_height(&self) -> f32;

    fn set_container_size(&mut self, size: Size<f32>);

    /// Clip the video to the wrap.
    fn set_container_overflow_hidden(&mut self);

    /// Scroll the wrap so the video is offset by `scroll`.
    fn set_container_scroll(&mut self, scroll: Point<f32>);

    fn set_video_size(&mut self, size: Size<f32>);

    /// Apply the parallax translation. `vendor` is passed along for hosts that
    /// write prefixed style properties.
    fn set_video_transform(&mut self, transform: Transform, vendor: Option<Vendor>);

    fn ready_state(&self) -> ReadyState;

    /// Intrinsic video size, available once the video is ready.
    fn intrinsic_size(&self) -> Option<Size<u32>>;

    fn play(&mut self);

    fn pause(&mut self);

    /// User agent used for vendor detection, if the host has one.
    fn user_agent(&self) -> Option<String> {
        None
    }

    /// Whether 3-D transforms are composited by the host.
    fn supports_3d_transforms(&self) -> bool {
        false
    }
}
