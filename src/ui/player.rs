//! Simulated live-radio player.
//!
//! There is no audio transport. Playing only flips the control between two
//! fixed label/colour states and writes static now-playing text.

use serde::{Deserialize, Serialize};

use crate::config::{PlayerSettings, SiteSettings};

/// Control label while stopped.
pub const PLAY_LABEL: &str = "▶ Play Live";
/// Control label while playing.
pub const STOP_LABEL: &str = "⏸ Stop Playing";
/// Control background while stopped.
pub const IDLE_BACKGROUND: &str = "var(--primary-orange)";
/// Control background while playing.
pub const PLAYING_BACKGROUND: &str = "var(--secondary-blue)";

/// State of the live player widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Whether the simulated stream is "playing".
    pub playing: bool,
    /// Control button label.
    pub label: String,
    /// Control button background colour.
    pub background: String,
    /// Lines of the now-playing panel.
    pub now_playing: Vec<String>,
    station: String,
    frequency: String,
    programme: String,
    host: String,
    stream_quality: String,
}

impl PlayerState {
    /// A stopped player for the configured station.
    pub fn new(site: &SiteSettings, player: &PlayerSettings) -> Self {
        let mut state = Self {
            playing: false,
            label: String::new(),
            background: String::new(),
            now_playing: Vec::new(),
            station: site.station_name.clone(),
            frequency: site.frequency.clone(),
            programme: player.programme.clone(),
            host: player.host.clone(),
            stream_quality: player.stream_quality.clone(),
        };
        state.stop();
        state
    }

    /// Switch between playing and stopped.
    pub fn toggle(&mut self) {
        if self.playing {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Enter the playing state.
    pub fn start(&mut self) {
        self.playing = true;
        self.label = STOP_LABEL.to_owned();
        self.background = PLAYING_BACKGROUND.to_owned();
        self.now_playing = vec![
            format!("🔴 LIVE - {} {}", self.station, self.frequency),
            format!("Now Playing: {}", self.programme),
            format!("Host: {}", self.host),
            format!("Stream quality: {}", self.stream_quality),
        ];
    }

    /// Enter the stopped state.
    pub fn stop(&mut self) {
        self.playing = false;
        self.label = PLAY_LABEL.to_owned();
        self.background = IDLE_BACKGROUND.to_owned();
        self.now_playing = vec![format!(
            "Click the play button to start listening to {} {}",
            self.station, self.frequency
        )];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerState {
        PlayerState::new(&SiteSettings::default(), &PlayerSettings::default())
    }

    #[test]
    fn starts_stopped_with_prompt() {
        let p = player();
        assert!(!p.playing);
        assert_eq!(p.label, PLAY_LABEL);
        assert_eq!(p.background, IDLE_BACKGROUND);
        assert_eq!(
            p.now_playing,
            ["Click the play button to start listening to Etya Radio 100.3 FM"]
        );
    }

    #[test]
    fn toggle_starts_then_stops() {
        let mut p = player();
        p.toggle();
        assert!(p.playing);
        assert_eq!(p.label, STOP_LABEL);
        assert_eq!(p.background, PLAYING_BACKGROUND);
        assert_eq!(p.now_playing[0], "🔴 LIVE - Etya Radio 100.3 FM");
        assert_eq!(
            p.now_playing[1],
            "Now Playing: Eriogi Ria Omogusii - Morning Show"
        );
        assert_eq!(p.now_playing[2], "Host: Radio Presenter");
        assert_eq!(p.now_playing[3], "Stream quality: Good");

        p.toggle();
        assert!(!p.playing);
        assert_eq!(p.label, PLAY_LABEL);
    }

    #[test]
    fn start_is_idempotent() {
        let mut p = player();
        p.start();
        let once = p.clone();
        p.start();
        assert_eq!(p, once);
    }
}
