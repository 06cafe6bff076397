//! Shared fixtures: a lettered deck and a listener that records everything.

use std::time::{Duration, Instant};

use swipedeck_engine::{
    DeckController, DeckItem, DeckListener, DeckSettings, Outcome, PointerKind, RouteTemplate,
    ThresholdFraction, TutorialSchedule,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Letter(pub &'static str);

impl DeckItem for Letter {
    type Id = &'static str;

    fn id(&self) -> &&'static str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Changed(usize, &'static str),
    Location(String),
    Haptic,
    Tutorial(bool),
    Back,
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn changes(&self) -> Vec<(usize, &'static str)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Changed(index, id) => Some((*index, *id)),
                _ => None,
            })
            .collect()
    }

    pub fn locations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Location(path) => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DeckListener<Letter> for Recorder {
    fn item_changed(&mut self, index: usize, item: &Letter) {
        self.events.push(Event::Changed(index, item.0));
    }

    fn replace_location(&mut self, path: &str) {
        self.events.push(Event::Location(path.to_string()));
    }

    fn haptic_pulse(&mut self) {
        self.events.push(Event::Haptic);
    }

    fn tutorial_visibility_changed(&mut self, visible: bool) {
        self.events.push(Event::Tutorial(visible));
    }

    fn go_back(&mut self) {
        self.events.push(Event::Back);
    }
}

/// Viewport of 400 units with a 0.25 fraction: commits need more than 100.
pub const VIEWPORT: f32 = 400.0;

pub fn settings(tutorial: TutorialSchedule) -> DeckSettings {
    DeckSettings {
        threshold: ThresholdFraction::new(0.25).unwrap(),
        route: Some(RouteTemplate::new("/letters/{id}")),
        tutorial,
        ..DeckSettings::default()
    }
}

pub fn letters(ids: &[&'static str]) -> Vec<Letter> {
    ids.iter().copied().map(Letter).collect()
}

pub fn deck(
    ids: &[&'static str],
    initial: Option<&'static str>,
    now: Instant,
) -> DeckController<Letter, Recorder> {
    let mut deck = DeckController::new(
        settings(TutorialSchedule::disabled()),
        VIEWPORT,
        Recorder::default(),
    );
    deck.initialize(letters(ids), initial.as_ref(), now);
    deck
}

/// Press, move straight sideways by `offset`, release.
pub fn drag(
    deck: &mut DeckController<Letter, Recorder>,
    offset: f32,
    now: Instant,
) -> Option<Outcome> {
    if !deck.pointer_down(200.0, 100.0, PointerKind::Touch, now) {
        return None;
    }
    deck.pointer_move(200.0 + offset, 100.0, now);
    deck.pointer_up(now)
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
