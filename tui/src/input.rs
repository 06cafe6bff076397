//! Terminal input to deck operations.
//!
//! Mouse drags become pointer streams, arrows and `h`/`l` swipe, `q`/`Esc`
//! leave. Column positions are scaled by [`CELL_UNITS`] so the deck's
//! thresholds keep their proportions on a character grid.

use anyhow::{Result, anyhow};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tracing::debug;

use swipedeck_engine::{DeckController, DeckItem, DeckListener, PointerKind};

use crate::CELL_UNITS;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking thread and hands them to the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close first so a send blocked on capacity returns.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain queued input into `deck`.
///
/// Returns true once the user asked to leave the deck.
pub fn handle_events<T, L>(deck: &mut DeckController<T, L>, input: &mut InputPump) -> Result<bool>
where
    T: DeckItem,
    L: DeckListener<T>,
{
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(deck, &ev, Instant::now()) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(false)
}

/// Column/row to pointer coordinates.
#[must_use]
pub fn to_units(column: u16, row: u16) -> (f32, f32) {
    (f32::from(column) * CELL_UNITS, f32::from(row) * CELL_UNITS)
}

/// Feed one terminal event to `deck`. Returns true when it asks to leave.
pub fn apply_event<T, L>(deck: &mut DeckController<T, L>, ev: &Event, now: Instant) -> bool
where
    T: DeckItem,
    L: DeckListener<T>,
{
    match ev {
        Event::Mouse(mouse) => {
            apply_mouse(deck, mouse, now);
            false
        }
        Event::Key(key) => apply_key(deck, *key, now),
        Event::Resize(columns, _) => {
            deck.set_viewport_width(f32::from(*columns) * CELL_UNITS);
            false
        }
        Event::FocusLost => {
            if deck.pointer_leave(now).is_some() {
                debug!("Focus lost mid-drag, releasing");
            }
            false
        }
        _ => false,
    }
}

fn apply_mouse<T, L>(deck: &mut DeckController<T, L>, mouse: &MouseEvent, now: Instant)
where
    T: DeckItem,
    L: DeckListener<T>,
{
    let (x, y) = to_units(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if !deck.pointer_down(x, y, PointerKind::Mouse, now) {
                debug!("Pointer down refused");
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            deck.pointer_move(x, y, now);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            deck.pointer_up(now);
        }
        _ => {}
    }
}

fn apply_key<T, L>(deck: &mut DeckController<T, L>, key: KeyEvent, now: Instant) -> bool
where
    T: DeckItem,
    L: DeckListener<T>,
{
    if key.kind == KeyEventKind::Release {
        return false;
    }
    deck.note_interaction(now);

    let ctrl_c =
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
        deck.go_back();
        return true;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            deck.swipe_previous(now);
            false
        }
        KeyCode::Right | KeyCode::Char('l') => {
            deck.swipe_next(now);
            false
        }
        _ => false,
    }
}
