// src/audio/player.rs
//! Looping playback engine using rodio with sample capture for the equalizer.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use ringbuf::{HeapRb, traits::*};
use rodio::{Decoder, OutputStream, Sink, Source};

use super::sample_capture::{SampleBuffer, SampleCapture};

/// Capacity of the shared capture buffer (~370ms of mono audio at 44.1kHz).
const SAMPLE_BUFFER_LEN: usize = 16384;

/// How often the audio thread checks whether a one-shot track has ended.
const END_POLL: Duration = Duration::from_millis(200);

/// Commands sent to the audio playback thread.
enum PlayerCommand {
    Play { path: PathBuf, looping: bool },
    Pause,
    Resume,
    Stop,
}

/// Player that owns a background audio thread. `play()` replaces whatever was
/// playing; a looping track repeats until stopped.
pub struct MusicPlayer {
    /// Sender to the audio thread for commands
    cmd_tx: Sender<PlayerCommand>,
    /// Flags mirrored from the audio thread for quick UI access
    is_playing_flag: Arc<AtomicBool>,
    is_paused_flag: Arc<AtomicBool>,
    /// Recent mono samples, read by the equalizer every frame
    pub sample_buffer: SampleBuffer,
}

impl MusicPlayer {
    /// Create an idle player and start its audio thread.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCommand>();

        let is_playing_flag = Arc::new(AtomicBool::new(false));
        let is_paused_flag = Arc::new(AtomicBool::new(false));
        let sample_buffer: SampleBuffer = Arc::new(Mutex::new(HeapRb::new(SAMPLE_BUFFER_LEN)));

        let playing = is_playing_flag.clone();
        let paused = is_paused_flag.clone();
        let capture_buf = sample_buffer.clone();

        thread::spawn(move || {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::error!("no audio output device: {e}");
                    // Keep draining so senders never block on a dead thread.
                    while rx.recv().is_ok() {}
                    return;
                }
            };
            log::info!("audio output stream opened");

            let mut sink: Option<Sink> = None;

            loop {
                let cmd = match rx.recv_timeout(END_POLL) {
                    Ok(cmd) => cmd,
                    Err(RecvTimeoutError::Timeout) => {
                        if sink.as_ref().is_some_and(Sink::empty) {
                            log::debug!("track finished");
                            sink = None;
                            playing.store(false, Ordering::SeqCst);
                            paused.store(false, Ordering::SeqCst);
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                };

                match cmd {
                    PlayerCommand::Play { path, looping } => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        if let Ok(mut buf) = capture_buf.lock() {
                            buf.clear();
                        }

                        let started = open_source(&path, looping).and_then(|source| {
                            let new_sink = Sink::try_new(&handle)?;
                            new_sink.append(SampleCapture::new(source, capture_buf.clone()));
                            new_sink.play();
                            Ok(new_sink)
                        });

                        match started {
                            Ok(new_sink) => {
                                log::info!("playing {} (looping: {looping})", path.display());
                                sink = Some(new_sink);
                                playing.store(true, Ordering::SeqCst);
                                paused.store(false, Ordering::SeqCst);
                            }
                            Err(e) => {
                                log::error!("cannot play {}: {e:#}", path.display());
                                playing.store(false, Ordering::SeqCst);
                                paused.store(false, Ordering::SeqCst);
                            }
                        }
                    }
                    PlayerCommand::Pause => {
                        if let Some(s) = &sink {
                            s.pause();
                            paused.store(true, Ordering::SeqCst);
                        }
                    }
                    PlayerCommand::Resume => {
                        if let Some(s) = &sink {
                            s.play();
                            paused.store(false, Ordering::SeqCst);
                        }
                    }
                    PlayerCommand::Stop => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        playing.store(false, Ordering::SeqCst);
                        paused.store(false, Ordering::SeqCst);
                    }
                }
            }

            if let Some(s) = sink.take() {
                s.stop();
            }
            // Keep stream alive until thread exits
            drop(stream);
        });

        Self {
            cmd_tx: tx,
            is_playing_flag,
            is_paused_flag,
            sample_buffer,
        }
    }

    /// Stop any existing playback and start playing `path`.
    pub fn play(&mut self, path: &Path, looping: bool) -> Result<()> {
        self.cmd_tx
            .send(PlayerCommand::Play {
                path: path.to_path_buf(),
                looping,
            })
            .context("audio thread has exited")
    }

    /// Pause playback if currently playing.
    pub fn pause(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Pause);
    }

    /// Resume playback if currently paused.
    pub fn resume(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Resume);
    }

    /// Immediately halt playback (if any).
    pub fn stop(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Stop);
    }

    /// Returns true if there's an active sink (i.e. playing or paused).
    pub fn is_playing(&self) -> bool {
        self.is_playing_flag.load(Ordering::SeqCst)
    }

    /// Returns true if playback is currently paused.
    pub fn is_paused(&self) -> bool {
        self.is_paused_flag.load(Ordering::SeqCst)
    }

    /// True while audio is actually coming out of the speakers.
    pub fn is_audible(&self) -> bool {
        self.is_playing() && !self.is_paused()
    }
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Open and decode `path` as an `f32` source, repeating forever when `looping`.
fn open_source(path: &Path, looping: bool) -> Result<Box<dyn Source<Item = f32> + Send>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);

    let source: Box<dyn Source<Item = f32> + Send> = if looping {
        Box::new(Decoder::new_looped(reader)?.convert_samples::<f32>())
    } else {
        Box::new(Decoder::new(reader)?.convert_samples::<f32>())
    };
    Ok(source)
}
