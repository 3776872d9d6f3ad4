use crate::Error;
use crate::surface::ReadyState;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_app::prelude::*;
use gstreamer_video as gst_video;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

const SINK_NAME: &str = "background_video";

/// Roughly one frame at 60 fps.
const PULL_INTERVAL: Duration = Duration::from_millis(16);

/// How long the decoder thread waits after a pull came back empty. An appsink
/// at end of stream returns immediately instead of waiting out its timeout.
fn pull_backoff(at_eos: bool) -> Option<Duration> {
    at_eos.then_some(PULL_INTERVAL)
}

/// What to do with the pipeline once it reports end of stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EosAction {
    /// Seek back to the start.
    Restart,
    /// Park the pipeline until playback is requested again.
    Pause,
}

impl EosAction {
    pub(crate) fn for_looping(looping: bool) -> Self {
        if looping { EosAction::Restart } else { EosAction::Pause }
    }
}

/// Geometry of the negotiated NV12 frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    pub width: u32,
    pub height: u32,
    pub y_stride: u32,
    pub uv_stride: u32,
    pub uv_offset: usize,
}

impl FrameInfo {
    fn from_caps(caps: &gst::CapsRef) -> Result<Self, Error> {
        let info = gst_video::VideoInfo::from_caps(caps).map_err(|_| Error::Caps)?;
        Ok(Self {
            width: info.width(),
            height: info.height(),
            y_stride: info.stride()[0] as u32,
            uv_stride: info.stride()[1] as u32,
            uv_offset: info.offset()[1],
        })
    }
}

#[derive(Debug)]
pub(crate) struct Internal {
    pub(crate) id: u64,
    pub(crate) bus: gst::Bus,
    pub(crate) source: gst::Pipeline,
    pub(crate) alive: Arc<AtomicBool>,
    pub(crate) worker: Option<std::thread::JoinHandle<()>>,

    pub(crate) info: Arc<Mutex<Option<FrameInfo>>>,
    pub(crate) ready: Arc<AtomicBool>,
    pub(crate) frame: Arc<Mutex<Option<gst::Sample>>>,
    pub(crate) upload_frame: Arc<AtomicBool>,

    pub(crate) looping: bool,
    pub(crate) is_eos: bool,
}

impl Internal {
    pub(crate) fn set_paused(&mut self, paused: bool) -> Result<(), Error> {
        self.source.set_state(if paused {
            gst::State::Paused
        } else {
            gst::State::Playing
        })?;

        if self.is_eos && !paused {
            self.restart()?;
        }
        Ok(())
    }

    pub(crate) fn paused(&self) -> bool {
        // A pending transition counts as its target.
        let (_, current, pending) = self.source.state(gst::ClockTime::ZERO);
        match pending {
            gst::State::VoidPending => current != gst::State::Playing,
            pending => pending != gst::State::Playing,
        }
    }

    pub(crate) fn restart(&mut self) -> Result<(), Error> {
        self.is_eos = false;
        self.source
            .seek_simple(gst::SeekFlags::FLUSH, gst::ClockTime::ZERO)?;
        Ok(())
    }

    /// Drain the bus. Returns the errors seen and whether the stream ended.
    pub(crate) fn drain_bus(&mut self) -> (Vec<String>, bool) {
        let mut errors = Vec::new();
        let mut ended = false;

        while let Some(msg) = self
            .bus
            .pop_filtered(&[gst::MessageType::Error, gst::MessageType::Eos])
        {
            match msg.view() {
                gst::MessageView::Error(err) => {
                    log::error!("GStreamer error in video {}: {}", self.id, err.error());
                    errors.push(err.error().to_string());
                }
                gst::MessageView::Eos(_) => {
                    ended = true;
                    self.is_eos = true;
                }
                _ => {}
            }
        }

        if ended {
            match EosAction::for_looping(self.looping) {
                EosAction::Restart => {
                    if let Err(err) = self.restart() {
                        log::error!("failed to loop video {}: {err}", self.id);
                    }
                }
                EosAction::Pause => {
                    // `set_paused(false)` restarts from the top later on.
                    if let Err(err) = self.source.set_state(gst::State::Paused) {
                        log::error!("failed to park ended video {}: {err}", self.id);
                    }
                }
            }
        }

        (errors, ended)
    }
}

/// A background video loaded from a URI (e.g., a local file path or HTTP stream).
///
/// Opening does not block: the pipeline prerolls in the background and
/// [`ready_state`](Self::ready_state) reports once the first frame has been
/// negotiated. Background videos start paused, muted and looping.
#[derive(Debug, Clone)]
pub struct Video(pub(crate) Arc<RwLock<Internal>>);

impl Drop for Video {
    fn drop(&mut self) {
        // Only cleanup if this is the last reference
        if Arc::strong_count(&self.0) == 1 {
            if let Some(mut inner) = self.0.try_write() {
                if let Err(err) = inner.source.set_state(gst::State::Null) {
                    log::error!("failed to stop video {}: {err}", inner.id);
                }

                inner.alive.store(false, Ordering::SeqCst);
                if let Some(worker) = inner.worker.take() {
                    if let Err(err) = worker.join() {
                        match err.downcast_ref::<String>() {
                            Some(e) => log::error!("Video thread panicked: {e}"),
                            None => log::error!("Video thread panicked with unknown reason"),
                        }
                    }
                }
            }
        }
    }
}

impl Video {
    /// Open the video at `uri`.
    pub fn new(uri: &url::Url) -> Result<Self, Error> {
        gst::init()?;

        let pipeline = format!(
            "playbin uri=\"{}\" video-sink=\"videoconvert ! videoscale ! appsink name={SINK_NAME} drop=true max-buffers=1 caps=video/x-raw,format=NV12,pixel-aspect-ratio=1/1\"",
            uri.as_str()
        );
        let pipeline = gst::parse::launch(pipeline.as_ref())?
            .downcast::<gst::Pipeline>()
            .map_err(|_| Error::Cast)?;

        let video_sink: gst::Element = pipeline.property("video-sink");
        let bin = video_sink.downcast::<gst::Bin>().map_err(|_| Error::Cast)?;
        let video_sink = bin
            .by_name(SINK_NAME)
            .ok_or(Error::Cast)?
            .downcast::<gst_app::AppSink>()
            .map_err(|_| Error::Cast)?;

        let video = Self::from_gst_pipeline(pipeline, video_sink)?;
        video.set_muted(true);
        Ok(video)
    }

    /// Wrap an existing pipeline whose `video_sink` produces NV12 samples.
    pub fn from_gst_pipeline(
        pipeline: gst::Pipeline,
        video_sink: gst_app::AppSink,
    ) -> Result<Self, Error> {
        gst::init()?;
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);

        let bus = pipeline.bus().ok_or(Error::Bus)?;

        // Preroll only; playback starts once the video is in view.
        if let Err(err) = pipeline.set_state(gst::State::Paused) {
            let _ = pipeline.set_state(gst::State::Null);
            return Err(err.into());
        }

        let info = Arc::new(Mutex::new(None));
        let ready = Arc::new(AtomicBool::new(false));
        let frame = Arc::new(Mutex::new(None));
        let upload_frame = Arc::new(AtomicBool::new(false));
        let alive = Arc::new(AtomicBool::new(true));

        let info_ref = Arc::clone(&info);
        let ready_ref = Arc::clone(&ready);
        let frame_ref = Arc::clone(&frame);
        let upload_frame_ref = Arc::clone(&upload_frame);
        let alive_ref = Arc::clone(&alive);
        let pipeline_ref = pipeline.clone();

        let worker = std::thread::spawn(move || {
            let mut last_pts = None;

            while alive_ref.load(Ordering::Acquire) {
                let playing = pipeline_ref.state(gst::ClockTime::ZERO).1 == gst::State::Playing;
                let timeout = gst::ClockTime::from_mseconds(PULL_INTERVAL.as_millis() as u64);
                let sample = if playing {
                    video_sink.try_pull_sample(timeout)
                } else {
                    video_sink.try_pull_preroll(timeout)
                };
                let Some(sample) = sample else {
                    if let Some(backoff) = pull_backoff(video_sink.is_eos()) {
                        std::thread::sleep(backoff);
                    }
                    continue;
                };

                let pts = sample.buffer().and_then(|buffer| buffer.pts());
                // The preroll sample is handed out again on every pull while paused.
                if !playing && pts.is_some() && pts == last_pts {
                    std::thread::sleep(PULL_INTERVAL);
                    continue;
                }
                last_pts = pts;

                if !ready_ref.load(Ordering::Acquire) {
                    match sample.caps().map(FrameInfo::from_caps) {
                        Some(Ok(negotiated)) => {
                            log::debug!(
                                "video {id} negotiated {}x{}",
                                negotiated.width,
                                negotiated.height
                            );
                            *info_ref.lock() = Some(negotiated);
                            ready_ref.store(true, Ordering::Release);
                        }
                        Some(Err(err)) => {
                            log::error!("video {id} produced unusable caps: {err}");
                            continue;
                        }
                        None => continue,
                    }
                }

                *frame_ref.lock() = Some(sample);
                upload_frame_ref.store(true, Ordering::SeqCst);
            }
        });

        Ok(Video(Arc::new(RwLock::new(Internal {
            id,
            bus,
            source: pipeline,
            alive,
            worker: Some(worker),

            info,
            ready,
            frame,
            upload_frame,

            looping: true,
            is_eos: false,
        }))))
    }

    pub(crate) fn read(&self) -> parking_lot::RwLockReadGuard<'_, Internal> {
        self.0.read()
    }

    pub(crate) fn write(&self) -> parking_lot::RwLockWriteGuard<'_, Internal> {
        self.0.write()
    }

    /// How far the video has buffered. Jumps to [`ReadyState::HaveEnoughData`]
    /// once the first frame is decoded.
    pub fn ready_state(&self) -> ReadyState {
        if self.read().ready.load(Ordering::Acquire) {
            ReadyState::HaveEnoughData
        } else {
            ReadyState::HaveNothing
        }
    }

    /// Intrinsic `(width, height)`, once known.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.frame_info().map(|info| (info.width, info.height))
    }

    pub fn frame_info(&self) -> Option<FrameInfo> {
        *self.read().info.lock()
    }

    pub fn play(&self) -> Result<(), Error> {
        self.write().set_paused(false)
    }

    pub fn pause(&self) -> Result<(), Error> {
        self.write().set_paused(true)
    }

    pub fn paused(&self) -> bool {
        self.read().paused()
    }

    pub fn set_muted(&self, muted: bool) {
        self.write().source.set_property("mute", muted);
    }

    pub fn muted(&self) -> bool {
        self.read().source.property("mute")
    }

    pub fn set_looping(&self, looping: bool) {
        self.write().looping = looping;
    }

    pub fn looping(&self) -> bool {
        self.read().looping
    }

    /// Get if the stream ended or not.
    pub fn eos(&self) -> bool {
        self.read().is_eos
    }

    /// Consume the "new frame" flag.
    pub fn take_frame_ready(&self) -> bool {
        self.read().upload_frame.swap(false, Ordering::SeqCst)
    }

    /// Copy of the latest NV12 frame with its geometry.
    pub fn current_frame_data(&self) -> Option<(Vec<u8>, FrameInfo)> {
        let inner = self.read();
        let info = (*inner.info.lock())?;
        let frame = inner.frame.lock();
        let buffer = frame.as_ref()?.buffer()?;
        let map = buffer.map_readable().ok()?;
        let data = map.as_slice().to_vec();
        (!data.is_empty()).then_some((data, info))
    }

    /// Get the underlying GStreamer pipeline.
    pub fn pipeline(&self) -> gst::Pipeline {
        self.read().source.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pull_at_eos_backs_off() {
        assert_eq!(pull_backoff(true), Some(PULL_INTERVAL));
    }

    #[test]
    fn empty_pull_mid_stream_retries_at_once() {
        // The appsink already waited out its timeout.
        assert_eq!(pull_backoff(false), None);
    }

    #[test]
    fn ended_stream_loops_or_parks() {
        assert_eq!(EosAction::for_looping(true), EosAction::Restart);
        assert_eq!(EosAction::for_looping(false), EosAction::Pause);
    }
}
