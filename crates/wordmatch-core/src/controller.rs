//! Game controller: the async driver around [`Game`].
//!
//! A single tokio task owns the game, the word source and the RNG. Commands
//! arrive over a channel and are answered with a snapshot; delayed transitions
//! run as one-shot sleep tasks that post their [`Timer`] back to the owner.
//! Every state change is published on a `watch` channel so a front end can
//! re-render from the latest snapshot.

use rand::Rng;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::deck::deal;
use crate::error::ControllerError;
use crate::game::{Flip, Game, Scheduled, Timer, Timings};
use crate::words::WordSource;

const COMMAND_BUFFER: usize = 32;

enum Request {
    Flip {
        position: usize,
        reply: oneshot::Sender<(Flip, Game)>,
    },
    Restart {
        reply: oneshot::Sender<Game>,
    },
    NextLevel {
        reply: oneshot::Sender<Game>,
    },
}

/// Handle to a running game.
#[derive(Clone)]
pub struct GameController {
    requests: mpsc::Sender<Request>,
    snapshots: watch::Receiver<Game>,
}

impl GameController {
    /// Start the controller task and deal the first round at `level`.
    pub fn spawn<R>(
        source: WordSource,
        level: u32,
        timings: Timings,
        rng: R,
    ) -> (Self, JoinHandle<()>)
    where
        R: Rng + Send + 'static,
    {
        let game = Game::new(level, timings);
        let (snapshot_tx, snapshot_rx) = watch::channel(game.clone());
        let (request_tx, request_rx) = mpsc::channel(COMMAND_BUFFER);
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();

        let actor = Actor {
            game,
            source,
            rng,
            snapshots: snapshot_tx,
            timers: timer_tx,
            pending: Vec::new(),
        };
        let handle = tokio::spawn(actor.run(request_rx, timer_rx));

        (
            Self {
                requests: request_tx,
                snapshots: snapshot_rx,
            },
            handle,
        )
    }

    /// Click the card at `position` (0-based).
    pub async fn flip(&self, position: usize) -> Result<(Flip, Game), ControllerError> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::Flip { position, reply }).await?;
        rx.await.map_err(|_| ControllerError::Closed)
    }

    /// Redeal the current level. Resolves once the new round is playing (or
    /// has failed).
    pub async fn restart(&self) -> Result<Game, ControllerError> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::Restart { reply }).await?;
        rx.await.map_err(|_| ControllerError::Closed)
    }

    /// Advance one level and deal it.
    pub async fn next_level(&self) -> Result<Game, ControllerError> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::NextLevel { reply }).await?;
        rx.await.map_err(|_| ControllerError::Closed)
    }

    /// The latest published state.
    pub fn snapshot(&self) -> Game {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<Game> {
        self.snapshots.clone()
    }

    /// Wait until the published state satisfies `predicate`.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&Game) -> bool,
    ) -> Result<Game, ControllerError> {
        let mut rx = self.snapshots.clone();
        let game = rx
            .wait_for(|game| predicate(game))
            .await
            .map_err(|_| ControllerError::Closed)?;
        Ok(game.clone())
    }

    async fn send(&self, request: Request) -> Result<(), ControllerError> {
        self.requests
            .send(request)
            .await
            .map_err(|_| ControllerError::Closed)
    }
}

struct Actor<R> {
    game: Game,
    source: WordSource,
    rng: R,
    snapshots: watch::Sender<Game>,
    timers: mpsc::UnboundedSender<Timer>,
    pending: Vec<JoinHandle<()>>,
}

impl<R: Rng + Send + 'static> Actor<R> {
    async fn run(
        mut self,
        mut requests: mpsc::Receiver<Request>,
        mut timers: mpsc::UnboundedReceiver<Timer>,
    ) {
        self.start_round().await;

        loop {
            tokio::select! {
                request = requests.recv() => match request {
                    Some(request) => self.handle(request).await,
                    None => break,
                },
                Some(timer) = timers.recv() => self.on_timer(timer),
            }
        }

        self.cancel_timers();
        tracing::debug!("game controller stopped");
    }

    async fn handle(&mut self, request: Request) {
        match request {
            Request::Flip { position, reply } => {
                let flip = self.game.flip(position);
                tracing::debug!(position, outcome = ?flip.outcome, "flip");
                if let Some(scheduled) = flip.scheduled {
                    self.schedule(scheduled);
                }
                self.publish();
                let _ = reply.send((flip, self.game.clone()));
            }
            Request::Restart { reply } => {
                if self.game.can_restart() {
                    self.start_round().await;
                } else {
                    tracing::debug!(phase = ?self.game.phase(), "restart ignored");
                }
                let _ = reply.send(self.game.clone());
            }
            Request::NextLevel { reply } => {
                if self.game.advance_level() {
                    self.start_round().await;
                } else {
                    tracing::debug!(phase = ?self.game.phase(), "next level ignored");
                }
                let _ = reply.send(self.game.clone());
            }
        }
    }

    async fn start_round(&mut self) {
        self.cancel_timers();
        let round = self.game.begin_round();
        let level = self.game.level();
        tracing::info!(level, round, "starting round");
        self.publish();

        match self.source.fetch_word_pairs(level).await {
            Ok(pairs) => {
                let cards = deal(&pairs, &mut self.rng);
                tracing::info!(level, round, pairs = pairs.len(), "dealt");
                self.game.deal(round, cards);
            }
            Err(e) => {
                tracing::error!(level, round, "failed to start round: {e}");
                self.game.fail(round, e.to_string());
            }
        }
        self.publish();
    }

    fn on_timer(&mut self, timer: Timer) {
        if self.game.fire(timer) {
            tracing::debug!(?timer, "timer fired");
            self.publish();
        } else {
            tracing::debug!(?timer, "stale timer dropped");
        }
    }

    fn schedule(&mut self, scheduled: Scheduled) {
        self.pending.retain(|handle| !handle.is_finished());
        let timers = self.timers.clone();
        self.pending.push(tokio::spawn(async move {
            tokio::time::sleep(scheduled.delay).await;
            let _ = timers.send(scheduled.timer);
        }));
    }

    fn cancel_timers(&mut self) {
        for handle in self.pending.drain(..) {
            handle.abort();
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.game.clone());
    }
}
