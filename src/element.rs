use crate::video::{FrameInfo, Video};
use gpui::{
    Element, ElementId, GlobalElementId, InspectorElementId, IntoElement, LayoutId, Pixels, Window,
};
use image::{ImageBuffer, Rgba};
use smallvec::SmallVec;
use std::sync::Arc;
use yuv::{YuvBiPlanarImage, YuvConversionMode, YuvRange, YuvStandardMatrix, yuv_nv12_to_rgba};

/// Paints the current frame of a [`Video`] stretched over its layout bounds.
///
/// The bounds come from the cover layout, so stretching never distorts the
/// aspect ratio.
pub struct VideoFrameElement {
    video: Video,
    width: Pixels,
    height: Pixels,
}

impl VideoFrameElement {
    pub fn new(video: Video, width: Pixels, height: Pixels) -> Self {
        Self {
            video,
            width,
            height,
        }
    }
}

/// Convert an NV12 frame to RGBA, honoring the plane strides.
pub(crate) fn nv12_to_rgba(data: &[u8], info: &FrameInfo) -> Option<Vec<u8>> {
    let y_len = info.y_stride as usize * info.height as usize;
    let uv_len = info.uv_stride as usize * info.height.div_ceil(2) as usize;
    if data.len() < y_len || data.len() < info.uv_offset + uv_len {
        return None;
    }

    let image = YuvBiPlanarImage {
        y_plane: &data[..y_len],
        y_stride: info.y_stride,
        uv_plane: &data[info.uv_offset..info.uv_offset + uv_len],
        uv_stride: info.uv_stride,
        width: info.width,
        height: info.height,
    };

    let mut rgba = vec![0u8; info.width as usize * info.height as usize * 4];
    // Most background footage is HD, fall back to SD coefficients otherwise.
    for (range, matrix) in [
        (YuvRange::Limited, YuvStandardMatrix::Bt709),
        (YuvRange::Limited, YuvStandardMatrix::Bt601),
    ] {
        if yuv_nv12_to_rgba(
            &image,
            &mut rgba,
            info.width * 4,
            range,
            matrix,
            YuvConversionMode::Balanced,
        )
        .is_ok()
        {
            return Some(rgba);
        }
    }
    None
}

impl Element for VideoFrameElement {
    type RequestLayoutState = ();
    type PrepaintState = ();

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut gpui::App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let style = gpui::Style {
            size: gpui::Size {
                width: gpui::Length::Definite(gpui::DefiniteLength::Absolute(
                    gpui::AbsoluteLength::Pixels(self.width),
                )),
                height: gpui::Length::Definite(gpui::DefiniteLength::Absolute(
                    gpui::AbsoluteLength::Pixels(self.height),
                )),
            },
            ..Default::default()
        };

        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        _bounds: gpui::Bounds<Pixels>,
        _request_layout_state: &mut Self::RequestLayoutState,
        window: &mut Window,
        _cx: &mut gpui::App,
    ) -> Self::PrepaintState {
        let is_playing = !self.video.eos() && !self.video.paused();
        let has_new_frame = self.video.take_frame_ready();
        if is_playing || has_new_frame {
            window.request_animation_frame();
        }
    }

    fn paint(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: gpui::Bounds<Pixels>,
        _request_layout_state: &mut Self::RequestLayoutState,
        _prepaint_state: &mut Self::PrepaintState,
        window: &mut Window,
        _cx: &mut gpui::App,
    ) {
        let Some((nv12, info)) = self.video.current_frame_data() else {
            return;
        };
        let Some(rgba) = nv12_to_rgba(&nv12, &info) else {
            log::error!("dropping malformed {}x{} frame", info.width, info.height);
            return;
        };
        let Some(buffer) = ImageBuffer::<Rgba<u8>, _>::from_raw(info.width, info.height, rgba)
        else {
            return;
        };

        let frames: SmallVec<[image::Frame; 1]> =
            SmallVec::from_elem(image::Frame::new(buffer), 1);
        let render_image = Arc::new(gpui::RenderImage::new(frames));

        if let Err(err) = window.paint_image(
            bounds,
            gpui::Corners::default(),
            render_image,
            0,     // frame index
            false, // grayscale
        ) {
            log::error!("failed to paint video frame: {err}");
        }
    }
}

impl IntoElement for VideoFrameElement {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

/// Helper function to create a video frame element of the given size.
pub fn video_frame(video: Video, width: Pixels, height: Pixels) -> VideoFrameElement {
    VideoFrameElement::new(video, width, height)
}
