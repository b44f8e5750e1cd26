//! Match configuration
//!
//! Handed over by the match-setup screen. Serialized as JSON so a host page
//! can pass it straight through.

use serde::{Deserialize, Serialize};

use crate::sim::CoinColor;

/// Who controls the seats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlayMode {
    /// Every seat is a human at the same device
    HumanVsHuman,
    /// Seat 0 is human, every other seat is the computer
    #[default]
    HumanVsComputer,
}

impl PlayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayMode::HumanVsHuman => "Human vs Human",
            PlayMode::HumanVsComputer => "Human vs Computer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pvp" | "hvh" | "human-vs-human" => Some(PlayMode::HumanVsHuman),
            "pve" | "hvc" | "human-vs-computer" => Some(PlayMode::HumanVsComputer),
            _ => None,
        }
    }
}

/// Computer opponent strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Shot power range (min, max) before jitter
    pub fn power_range(&self) -> (f32, f32) {
        match self {
            Difficulty::Easy => (15.0, 25.0),
            Difficulty::Medium => (18.0, 24.0),
            Difficulty::Hard => (25.0, 30.0),
        }
    }

    /// Maximum aim error in radians
    pub fn aim_jitter(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.12,
            Difficulty::Medium => 0.06,
            Difficulty::Hard => 0.02,
        }
    }
}

/// Number of seats around the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Seats {
    /// Bottom (White) vs top (Black)
    #[default]
    Two,
    /// Bottom, left, top, right; teams alternate White/Black
    Four,
}

impl Seats {
    pub fn as_str(&self) -> &'static str {
        match self {
            Seats::Two => "2 players",
            Seats::Four => "4 players",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "2" | "two" => Some(Seats::Two),
            "4" | "four" => Some(Seats::Four),
            _ => None,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Seats::Two => 2,
            Seats::Four => 4,
        }
    }

    /// Seat after `seat`, wrapping around the table
    pub fn next(&self, seat: usize) -> usize {
        (seat + 1) % self.count()
    }

    /// Coin color a seat plays for
    pub fn color_of(&self, seat: usize) -> CoinColor {
        if seat % 2 == 0 {
            CoinColor::White
        } else {
            CoinColor::Black
        }
    }

    /// Label reported when `color` wins
    pub fn winner_label(&self, color: CoinColor) -> &'static str {
        match (self, color) {
            (Seats::Two, CoinColor::White) => "White",
            (Seats::Two, CoinColor::Black) => "Black",
            (Seats::Four, CoinColor::White) => "Team White",
            (Seats::Four, CoinColor::Black) => "Team Black",
        }
    }

    /// Display name for a seat
    pub fn seat_name(&self, seat: usize) -> &'static str {
        match self {
            Seats::Two => match seat % 2 {
                0 => "White",
                _ => "Black",
            },
            Seats::Four => match seat % 4 {
                0 => "P1 (White)",
                1 => "P2 (Black)",
                2 => "P3 (White)",
                _ => "P4 (Black)",
            },
        }
    }
}

/// Options recognized from the match-setup screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub mode: PlayMode,
    pub difficulty: Difficulty,
    pub seats: Seats,
    /// Seed for the computer opponent's RNG
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: PlayMode::HumanVsComputer,
            difficulty: Difficulty::Medium,
            seats: Seats::Two,
            seed: 0,
        }
    }
}

impl MatchConfig {
    /// Whether `seat` is played by the computer
    pub fn is_computer(&self, seat: usize) -> bool {
        self.mode == PlayMode::HumanVsComputer && seat != 0
    }

    /// Parse a config handed over as JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        log::info!(
            "Loaded match config: {}, {}, {}",
            config.mode.as_str(),
            config.difficulty.as_str(),
            config.seats.as_str()
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
