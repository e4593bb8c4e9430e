// src/app/state.rs
//! Application state management.

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
    time::Instant,
};

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::{
    audio::{MusicPlayer, TrackMetadata, Visualizer, load_metadata},
    config::Settings,
    fs::ensure_audio,
    ui::{
        keybindings::{Action, key_to_action},
        layout::{SectionVisibility, compute_layout},
        widgets::{
            player_panel::PlayerView, render_equalizer, render_player_panel,
            render_settings_panel,
        },
    },
};

/// Decay step for one press of `[` or `]`.
const DECAY_STEP: f32 = 0.01;

/// Main application state.
pub struct App {
    /// Current settings, including runtime tweaks; saved on exit
    pub settings: Settings,

    /// Music player instance
    pub player: MusicPlayer,
    /// Elapsed playback time in seconds, wraps when the track loops
    pub elapsed: u64,
    /// Total track duration in seconds
    pub duration: u64,
    /// Metadata of the current track, once the loader has reported back
    pub metadata: Option<TrackMetadata>,
    /// Last playback problem shown in the player strip
    pub status: Option<String>,

    /// Metadata channel sender (background loader -> UI)
    pub meta_tx: Sender<TrackMetadata>,
    /// Metadata channel receiver
    pub meta_rx: Receiver<TrackMetadata>,

    /// Audio-reactive equalizer
    pub visualizer: Visualizer,

    /// Section visibility state
    pub visibility: SectionVisibility,

    /// Start of the app, drives the outline pulse
    started: Instant,
}

impl App {
    /// Create the application and start the configured track.
    pub fn new(settings: Settings) -> Result<Self> {
        let eq = &settings.equalizer;
        let visualizer = Visualizer::new(eq.bands, eq.max_units, eq.decay)?;
        log::info!(
            "equalizer: {} bands, {} units per column, decay {}",
            eq.bands,
            eq.max_units,
            eq.decay
        );

        let (meta_tx, meta_rx) = std::sync::mpsc::channel::<TrackMetadata>();
        let visibility = SectionVisibility {
            settings: settings.display.show_settings,
            ..SectionVisibility::default()
        };

        let mut app = Self {
            settings,
            player: MusicPlayer::new(),
            elapsed: 0,
            duration: 1,
            metadata: None,
            status: None,
            meta_tx,
            meta_rx,
            visualizer,
            visibility,
            started: Instant::now(),
        };
        app.start_track();
        Ok(app)
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(&key) {
            Action::ToggleSection(d) => self.toggle_section(d),
            Action::ToggleSettings => self.toggle_section(3),
            Action::TogglePause => {
                if self.player.is_paused() {
                    self.player.resume();
                } else {
                    self.player.pause();
                }
            }
            Action::Stop => {
                self.player.stop();
                self.elapsed = 0;
            }
            Action::Restart => self.start_track(),
            Action::DecayDown => self.nudge_decay(-DECAY_STEP),
            Action::DecayUp => self.nudge_decay(DECAY_STEP),
            Action::UnitsDown => self.nudge_max_units(-1),
            Action::UnitsUp => self.nudge_max_units(1),
            Action::Quit => {
                self.player.stop();
                return true;
            }
            Action::None => {}
        }
        false
    }

    /// Per-frame update. Must run before `draw` for the same frame.
    pub fn update(&mut self) {
        self.process_metadata();
        self.visualizer
            .update(&self.player.sample_buffer, self.player.is_audible());
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area(), &self.visibility);

        if let Some(area) = layout.equalizer {
            let t = self.started.elapsed().as_secs_f32();
            render_equalizer(f, area, &self.visualizer, t);
        }

        if let Some(area) = layout.settings {
            render_settings_panel(f, area, &self.settings, self.visualizer.spectrum());
        }

        if let Some(area) = layout.player {
            let view = PlayerView {
                metadata: self.metadata.as_ref(),
                track: &self.settings.playback.track,
                elapsed: self.elapsed,
                duration: self.duration,
                is_playing: self.player.is_playing(),
                is_paused: self.player.is_paused(),
                looping: self.settings.playback.looping,
                status: self.status.as_deref(),
            };
            render_player_panel(f, area, &view);
        }
    }

    /// Advance the elapsed-time counter by one second if audio is playing.
    pub fn tick_elapsed(&mut self) {
        if !self.player.is_audible() {
            return;
        }
        self.elapsed += 1;
        if self.elapsed > self.duration {
            self.elapsed = if self.settings.playback.looping {
                0
            } else {
                self.duration
            };
        }
    }

    /// Process any pending metadata from background loader.
    pub fn process_metadata(&mut self) {
        if let Ok(meta) = self.meta_rx.try_recv() {
            self.duration = meta.duration_secs.max(1);
            self.metadata = Some(meta);
        }
    }

    /// Validate and (re)start the configured track, loading its metadata in
    /// the background.
    fn start_track(&mut self) {
        let path: PathBuf = self.settings.playback.track.clone();

        if let Err(e) = ensure_audio(&path) {
            log::warn!("{e:#}");
            self.status = Some(format!("{e:#}"));
            return;
        }

        if let Err(e) = self.player.play(&path, self.settings.playback.looping) {
            log::error!("{e:#}");
            self.status = Some(format!("{e:#}"));
            return;
        }

        self.status = None;
        self.metadata = None;
        self.elapsed = 0;
        self.duration = 1;

        let tx = self.meta_tx.clone();
        thread::spawn(move || match load_metadata(path) {
            Ok(meta) => {
                let _ = tx.send(meta);
            }
            Err(e) => log::warn!("no metadata: {e:#}"),
        });
    }

    /// Toggle a section; the settings panel's visibility is saved with the settings.
    fn toggle_section(&mut self, section: usize) {
        self.visibility.toggle(section);
        self.settings.display.show_settings = self.visibility.settings;
    }

    fn nudge_decay(&mut self, delta: f32) {
        self.settings.nudge_decay(delta);
        let decay = self.settings.equalizer.decay;
        if let Err(e) = self.visualizer.spectrum_mut().set_decay_factor(decay) {
            log::warn!("{e}");
        }
    }

    fn nudge_max_units(&mut self, delta: i32) {
        self.settings.nudge_max_units(delta);
        let units = self.settings.equalizer.max_units;
        if let Err(e) = self.visualizer.spectrum_mut().set_max_units_per_band(units) {
            log::warn!("{e}");
        }
    }
}
