//! # GPUI Background Video
//!
//! A video that behaves like a CSS `background-size: cover` background for
//! GPUI applications, using GStreamer for media playback.
//!
//! ## Features
//!
//! - Cover sizing: the video fills its wrap, keeps its aspect ratio and never
//!   shrinks below a minimum width
//! - Centering like `background-position: 50% 50%`
//! - Scroll-driven parallax translation
//! - Pausing while the wrap is scrolled out of view
//! - A host-agnostic controller ([`BackgroundVideo`] + [`Surface`]) for other UI hosts
//!
//! ## Example
//!
//! ```rust,no_run
//! use gpui::{App, ScrollHandle};
//! use gpui_background_video::{BackgroundVideoOptions, ParallaxOptions, Video, background_video};
//! use gpui_background_video::Url;
//!
//! fn bind(cx: &mut App, page_scroll: ScrollHandle) -> Result<(), gpui_background_video::Error> {
//!     let uri = Url::parse("file:///path/to/loop.mp4").unwrap();
//!     let video = Video::new(&uri)?;
//!     let options = BackgroundVideoOptions::default()
//!         .parallax_options(ParallaxOptions::default().offset(64.0).effect(0.3));
//!     let _view = background_video("hero", video, page_scroll, options, cx)?;
//!     Ok(())
//! }
//! ```

mod controller;
mod cover;
mod element;
mod error;
mod options;
mod registry;
mod surface;
mod transform;
mod vendor;
mod video;
mod view;

pub use controller::{BackgroundVideo, Listeners};
pub use cover::CoverLayout;
pub use element::{VideoFrameElement, video_frame};
pub use error::Error;
pub use options::{BackgroundVideoOptions, OuterWrap, ParallaxOptions};
pub use registry::{BackgroundVideoRegistry, background_video};
pub use surface::{ReadyState, Surface};
pub use transform::Transform;
pub use vendor::Vendor;
pub use video::{FrameInfo, Video};
pub use view::{BackgroundVideoEvent, BackgroundVideoView};

// Re-export commonly used types
pub use url::Url;
pub use gstreamer as gst;
