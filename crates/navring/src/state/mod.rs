use crate::dimens::Dimens;
use crate::parts::{Invalidator, Parts};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::time::Duration;
use strum::{Display, EnumIter, EnumString};

pub mod nearby;
pub mod search;

pub use nearby::NearbyState;
pub use search::SearchState;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    Display,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum StateKind {
    #[default]
    Search,
    Nearby,
}

impl StateKind {
    pub fn create(self) -> Box<dyn NavigationState> {
        match self {
            Self::Search => Box::new(SearchState::default()),
            Self::Nearby => Box::new(NearbyState::default()),
        }
    }
}

/// Everything a state lays out: the parts, the sizes they are laid out
/// with, and the redraw request.
pub struct Scene {
    pub dimens: Dimens,
    pub parts: Parts,
    pub invalidator: Invalidator,
}

impl Scene {
    pub fn invalidate(&self) {
        self.invalidator.invalidate();
    }
}

/// One mode of the widget.
///
/// When the view switches states it calls, in order, `on_exit` on the old
/// state, `init_params` and then `on_enter` on the new one. `on_exit` must
/// cancel every animation the state started, and `init_params` must set the
/// params of every part.
pub trait NavigationState {
    fn kind(&self) -> StateKind;

    fn progress(&self) -> f64;

    fn set_progress(&mut self, scene: &mut Scene, now: Duration, progress: f64);

    fn init_params(&mut self, scene: &mut Scene);

    fn on_enter(&mut self, _scene: &mut Scene, _now: Duration) {}

    fn on_exit(&mut self, scene: &mut Scene);

    /// Advances the state's own animations.
    fn tick(&mut self, _scene: &mut Scene, _now: Duration) {}

    /// Number of transition animation sets still running.
    fn active_transitions(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_state_kind_parsing() {
        let cases = vec![
            ("\"search\"", StateKind::Search),
            ("\"Search\"", StateKind::Search),
            ("\"NEARBY\"", StateKind::Nearby),
            ("\"nearby\"", StateKind::Nearby),
        ];

        for (json, expected) in cases {
            let deserialized: StateKind = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert_eq!(StateKind::Nearby.to_string(), "nearby");
        assert!("parked".parse::<StateKind>().is_err());
    }

    #[test]
    fn test_create_matches_kind() {
        for kind in StateKind::iter() {
            assert_eq!(kind.create().kind(), kind);
        }
    }
}
