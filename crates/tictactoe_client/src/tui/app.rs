//! Application state and event handling.

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use crate::board::CellIndex;
use crate::controller::{Applied, Reply, Ticket, TurnController, dispatch};
use crate::render::CellAction;
use crate::resolver::Resolver;

use super::input::{self, Command};
use super::ui::{self, BoardLayout};

/// Main application state.
///
/// Requests run on spawned tasks; their replies come back over a channel
/// and are applied on the UI loop in arrival order.
pub struct App<R: Resolver + 'static> {
    controller: TurnController<R>,
    cursor: CellIndex,
    layout: Option<BoardLayout>,
    replies_tx: mpsc::UnboundedSender<Reply>,
    replies_rx: mpsc::UnboundedReceiver<Reply>,
    should_quit: bool,
}

impl<R: Resolver + 'static> App<R> {
    /// Creates a new application.
    pub fn new(controller: TurnController<R>) -> Self {
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            cursor: CellIndex::ALL[4],
            layout: None,
            replies_tx,
            replies_rx,
            should_quit: false,
        }
    }

    /// Gets the controller.
    pub fn controller(&self) -> &TurnController<R> {
        &self.controller
    }

    /// Cell under the keyboard cursor.
    pub fn cursor(&self) -> CellIndex {
        self.cursor
    }

    /// Cell rectangles from the last draw.
    pub fn layout(&self) -> Option<BoardLayout> {
        self.layout
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draws the current state and remembers the cell layout.
    pub fn draw(&mut self, frame: &mut Frame) {
        let view = self.controller.render();
        let layout = ui::draw(frame, &view, self.controller.state().status(), self.cursor);
        self.layout = Some(layout);
    }

    /// Handles a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) {
        // crossterm fires both press and release on some platforms.
        if key.kind == KeyEventKind::Release {
            return;
        }
        let Some(command) = input::command_for_key(key) else {
            return;
        };
        debug!(?command, "Key command");
        match command {
            Command::Quit => self.should_quit = true,
            Command::NewGame => self.new_game(),
            Command::MoveCursor(code) => self.cursor = input::move_cursor(self.cursor, code),
            Command::ActivateCursor => self.activate(self.cursor),
            Command::Activate(index) => {
                self.cursor = index;
                self.activate(index);
            }
        }
    }

    /// Handles a mouse event; a left click on a cell activates it.
    #[instrument(skip(self))]
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(layout) = self.layout else {
            return;
        };
        if let Some(index) = input::hit_test(&layout, mouse.column, mouse.row) {
            self.cursor = index;
            self.activate(index);
        }
    }

    /// Applies every reply that has already arrived.
    pub fn drain_replies(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(reply) = self.replies_rx.try_recv() {
            self.controller.apply(reply);
            applied += 1;
        }
        applied
    }

    /// Waits for the next reply and applies it.
    pub async fn next_reply(&mut self) -> Option<Applied> {
        let reply = self.replies_rx.recv().await?;
        Some(self.controller.apply(reply))
    }

    fn activate(&mut self, index: CellIndex) {
        let view = self.controller.render();
        let Some(CellAction::SubmitMove(cell)) = view.cell(index).activate() else {
            debug!(cell = %index, "Cell not interactive");
            return;
        };
        match self.controller.begin_move(cell.get()) {
            Ok(Some(ticket)) => self.spawn(ticket),
            Ok(None) => debug!("Move ignored"),
            Err(e) => warn!(error = %e, "Move rejected locally"),
        }
    }

    fn new_game(&mut self) {
        let ticket = self.controller.begin_new_game();
        self.spawn(ticket);
    }

    fn spawn(&self, ticket: Ticket) {
        let resolver = self.controller.resolver();
        let tx = self.replies_tx.clone();
        tokio::spawn(async move {
            let reply = dispatch(resolver.as_ref(), ticket).await;
            if tx.send(reply).is_err() {
                debug!(token = %ticket.token, "App gone, dropping reply");
            }
        });
    }
}
