use lumafilter_imgproc::filter::BlurMode;

use crate::error::VideoFilterError;
use crate::params::{BilateralParams, BlurParams, SIGMA_MAX, SIGMA_STEP};
use crate::store::ParamStore;

/// A key that changes the filter parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// The `+` key.
    Plus,
    /// The `-` key.
    Minus,
}

impl Key {
    /// Parse a key name, `None` for keys without a binding.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "+" | "plus" | "KP_Add" => Some(Key::Plus),
            "-" | "minus" | "KP_Subtract" => Some(Key::Minus),
            _ => None,
        }
    }
}

/// The kind of a navigation event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationEventKind {
    /// A key was pressed.
    KeyPress,
    /// A key was released.
    KeyRelease,
    /// The pointer moved.
    MouseMove,
    /// A mouse button was pressed.
    MouseButtonPress,
    /// A mouse button was released.
    MouseButtonRelease,
}

/// An event travelling upstream from the video sink.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationEvent {
    /// What happened.
    pub kind: NavigationEventKind,
    /// The key name of keyboard events.
    pub key: Option<String>,
}

impl NavigationEvent {
    /// A key press event.
    pub fn key_press(key: &str) -> Self {
        Self {
            kind: NavigationEventKind::KeyPress,
            key: Some(key.to_string()),
        }
    }

    /// A key release event.
    pub fn key_release(key: &str) -> Self {
        Self {
            kind: NavigationEventKind::KeyRelease,
            key: Some(key.to_string()),
        }
    }

    /// A pointer event without a key.
    pub fn pointer(kind: NavigationEventKind) -> Self {
        Self { kind, key: None }
    }

    /// The bound key of a key release event.
    ///
    /// Parameters only change when a key is released, so presses and
    /// pointer events yield `None`.
    pub fn released_key(&self) -> Option<Key> {
        match self.kind {
            NavigationEventKind::KeyRelease => self.key.as_deref().and_then(Key::parse),
            _ => None,
        }
    }
}

/// Parameters that react to key presses.
pub trait KeyControl {
    /// Update the parameters for a pressed key.
    fn apply_key_press(&mut self, key: Key);
}

impl KeyControl for BlurParams {
    /// `+` moves toward stronger high-pass, `-` toward stronger low-pass;
    /// stepping down from the smallest sigma of either side turns the filter off.
    fn apply_key_press(&mut self, key: Key) {
        let (sigma, mode) = match (self.mode, key) {
            (BlurMode::Off, Key::Plus) => (SIGMA_STEP, BlurMode::HighPass),
            (BlurMode::Off, Key::Minus) => (SIGMA_STEP, BlurMode::LowPass),
            (BlurMode::HighPass, Key::Plus) | (BlurMode::LowPass, Key::Minus) => {
                ((self.sigma + SIGMA_STEP).min(SIGMA_MAX), self.mode)
            }
            (BlurMode::HighPass, Key::Minus) | (BlurMode::LowPass, Key::Plus) => {
                if self.sigma <= SIGMA_STEP {
                    (0.0, BlurMode::Off)
                } else {
                    (self.sigma - SIGMA_STEP, self.mode)
                }
            }
        };

        self.sigma = sigma;
        self.mode = mode;

        match mode {
            BlurMode::Off => log::info!("Filter off"),
            _ => log::info!("{mode} filtering, sigma {sigma:.1}"),
        }
    }
}

impl KeyControl for BilateralParams {
    fn apply_key_press(&mut self, key: Key) {
        self.filtering = key == Key::Plus;
        log::info!(
            "Bilateral filtering {}",
            if self.filtering { "on" } else { "off" }
        );
    }
}

/// Apply a navigation event to shared parameters.
///
/// Returns `true` if the event carried a bound key release and the
/// parameters were updated.
pub fn handle_navigation_event<P: KeyControl>(
    store: &ParamStore<P>,
    event: &NavigationEvent,
) -> Result<bool, VideoFilterError> {
    let Some(key) = event.released_key() else {
        if let (NavigationEventKind::KeyRelease, Some(name)) = (event.kind, &event.key) {
            log::warn!("Ignoring unbound key {name}");
        }
        return Ok(false);
    };
    store.update(|params| params.apply_key_press(key))?;
    Ok(true)
}
