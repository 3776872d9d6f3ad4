use gstreamer as gst;
use thiserror::Error;

/// Errors raised while opening media or binding a background video.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Glib(#[from] glib::Error),
    #[error("{0}")]
    Bool(#[from] glib::BoolError),
    #[error("{0}")]
    StateChange(#[from] gst::StateChangeError),
    #[error("failed to get the gstreamer bus")]
    Bus,
    #[error("failed to cast gstreamer element")]
    Cast,
    #[error("failed to get media capabilities")]
    Caps,
    #[error("video reported unusable intrinsic size {width}x{height}")]
    Dimensions { width: u32, height: u32 },
}
