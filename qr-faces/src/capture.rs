use crate::error::{Error, Result};
use crate::game::FaceCollector;
use crate::store::StorageBackend;
use crate::types::Face;
use rand::RngCore;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// Frame capture and the scan loop. Camera access and QR decoding live outside this crate and
// come in through `FrameSource` and `QrDecoder`; the loop only decides when to poll and what
// to do with a decoded payload.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FramePoll {
    Ready(Frame),
    /// The device has no complete frame yet; try again next tick.
    NotReady,
    /// The source is exhausted and capture should stop.
    Ended,
}

pub trait FrameSource {
    /// Acquire the device. Failure means capture stays off.
    fn open(&mut self) -> Result<()>;
    fn next_frame(&mut self) -> FramePoll;
    /// Release the device. Must be safe to call when already closed.
    fn close(&mut self);
}

pub trait QrDecoder {
    fn decode(&mut self, pixels: &[u8], width: u32, height: u32) -> Option<String>;
}

impl<F> QrDecoder for F
where
    F: FnMut(&[u8], u32, u32) -> Option<String>,
{
    fn decode(&mut self, pixels: &[u8], width: u32, height: u32) -> Option<String> {
        self(pixels, width, height)
    }
}

/// Suspension point of the scan loop: returns when the next frame should be polled.
pub trait FrameTicker {
    fn wait_for_tick(&mut self);
}

pub struct IntervalTicker {
    period: Duration,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl FrameTicker for IntervalTicker {
    fn wait_for_tick(&mut self) {
        thread::sleep(self.period);
    }
}

/// Shared capture-enabled flag. Clones observe and control the same switch, so another
/// thread can stop a running loop; the loop notices at its next tick.
#[derive(Clone, Debug, Default)]
pub struct CaptureSwitch(Arc<AtomicBool>);

impl CaptureSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn set(&self, on: bool) {
        self.0.store(on, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.set(false);
    }
}

/// One frame per input line. Useful with external decoders that print one payload per line,
/// such as `zbarcam --raw`.
pub struct LineSource<R> {
    reader: R,
    open: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            open: false,
        }
    }
}

impl<R: BufRead> FrameSource for LineSource<R> {
    fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    fn next_frame(&mut self) -> FramePoll {
        if !self.open {
            return FramePoll::NotReady;
        }
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => FramePoll::Ended,
            Ok(_) => {
                let pixels = line.trim_end_matches(['\r', '\n']).as_bytes().to_vec();
                FramePoll::Ready(Frame {
                    width: pixels.len() as u32,
                    height: 1,
                    pixels,
                })
            }
            Err(err) => {
                log::warn!("frame source read failed: {}", err);
                FramePoll::Ended
            }
        }
    }

    fn close(&mut self) {
        self.open = false;
    }
}

/// Treats frame bytes as a payload that was already decoded upstream.
#[derive(Default)]
pub struct RawTextDecoder;

impl QrDecoder for RawTextDecoder {
    fn decode(&mut self, pixels: &[u8], _width: u32, _height: u32) -> Option<String> {
        let text = std::str::from_utf8(pixels).ok()?.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub ticks: u64,
    pub frames: u64,
    pub decoded: u64,
    pub collected: u64,
}

/// Polls a frame source once per tick while capture is on.
pub struct CaptureLoop<T> {
    ticker: T,
    auto_collect: bool,
}

impl<T: FrameTicker> CaptureLoop<T> {
    pub fn new(ticker: T) -> Self {
        Self {
            ticker,
            auto_collect: false,
        }
    }

    /// Add each newly seen code to the collection without waiting for the user.
    pub fn auto_collect(mut self, enabled: bool) -> Self {
        self.auto_collect = enabled;
        self
    }

    /// Runs until capture is switched off or the source ends. Capture must already be on.
    /// Every exit, a failed save included, switches capture off and closes the source.
    pub fn run<B, R, S, D>(
        &mut self,
        collector: &mut FaceCollector<B, R>,
        source: &mut S,
        decoder: &mut D,
        mut on_found: impl FnMut(&Face),
    ) -> Result<ScanStats>
    where
        B: StorageBackend,
        R: RngCore,
        S: FrameSource,
        D: QrDecoder,
    {
        if !collector.capture_on() {
            return Err(Error::Camera("capture is not running".into()));
        }
        let mut stats = ScanStats::default();
        log::info!("scan loop started");
        let outcome = self.poll_frames(collector, source, decoder, &mut on_found, &mut stats);

        collector.stop_capture(source);
        log::info!(
            "scan loop stopped after {} frames, {} decoded",
            stats.frames,
            stats.decoded
        );
        if let Err(err) = &outcome {
            log::error!("scan loop failed: {}", err);
        }
        outcome.map(|()| stats)
    }

    fn poll_frames<B, R, S, D>(
        &mut self,
        collector: &mut FaceCollector<B, R>,
        source: &mut S,
        decoder: &mut D,
        on_found: &mut impl FnMut(&Face),
        stats: &mut ScanStats,
    ) -> Result<()>
    where
        B: StorageBackend,
        R: RngCore,
        S: FrameSource,
        D: QrDecoder,
    {
        let switch = collector.capture_switch();
        let mut last_payload: Option<String> = None;
        while switch.is_on() {
            self.ticker.wait_for_tick();
            stats.ticks += 1;
            if !switch.is_on() {
                break;
            }
            let frame = match source.next_frame() {
                FramePoll::Ready(frame) => frame,
                FramePoll::NotReady => continue,
                FramePoll::Ended => break,
            };
            stats.frames += 1;
            match decoder.decode(&frame.pixels, frame.width, frame.height) {
                Some(payload) => {
                    stats.decoded += 1;
                    let face = collector.scan(&payload).clone();
                    on_found(&face);
                    let is_new = last_payload.as_deref() != Some(payload.as_str());
                    if self.auto_collect && is_new && collector.add_found()?.is_some() {
                        stats.collected += 1;
                    }
                    last_payload = Some(payload);
                }
                None => {
                    collector.clear_found();
                    last_payload = None;
                }
            }
        }
        Ok(())
    }
}
