//! Deferred task runner
//!
//! A worker thread that fires deferred hides once their delay has elapsed.
//! Jobs arrive over a channel; the worker sleeps until the earliest
//! deadline or the next job, whichever comes first.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use eframe::egui;
use overlay::{OverlayEvents, TransitionTicket};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

enum Job {
    Fire {
        at: Instant,
        ticket: TransitionTicket,
        events: OverlayEvents,
    },
    Shutdown,
}

struct Pending {
    at: Instant,
    ticket: TransitionTicket,
    events: OverlayEvents,
}

pub struct Scheduler {
    tx: Sender<Job>,
    handle: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Start the worker. `ctx` is woken after every fired task so the UI
    /// pumps the overlay's events promptly.
    pub fn spawn(ctx: egui::Context) -> Self {
        let (tx, rx) = unbounded();
        let handle = thread::Builder::new()
            .name("deferred-hide".into())
            .spawn(move || worker(rx, ctx))
            .ok();
        if handle.is_none() {
            warn!("Could not start the scheduler thread, deferred hides will not fire");
        }
        Self { tx, handle }
    }

    pub fn schedule(&self, delay: Duration, ticket: TransitionTicket, events: OverlayEvents) {
        let job = Job::Fire {
            at: Instant::now() + delay,
            ticket,
            events,
        };
        if self.tx.send(job).is_err() {
            debug!(epoch = ticket.epoch, "Scheduler gone, dropping deferred hide");
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        let _ = self.tx.send(Job::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn worker(rx: Receiver<Job>, ctx: egui::Context) {
    let mut pending: Vec<Pending> = Vec::new();

    loop {
        let now = Instant::now();
        let (due, waiting): (Vec<Pending>, Vec<Pending>) =
            pending.drain(..).partition(|task| task.at <= now);
        pending = waiting;

        if !due.is_empty() {
            for task in due {
                trace!(epoch = task.ticket.epoch, "Deferred hide fired");
                if let Err(e) = task.events.deferred_hide_fired(task.ticket) {
                    debug!(error = %e, "Overlay gone before its deferred hide");
                }
            }
            ctx.request_repaint();
        }

        let job = match pending.iter().map(|task| task.at).min() {
            Some(deadline) => match rx.recv_timeout(deadline.saturating_duration_since(now)) {
                Ok(job) => job,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match rx.recv() {
                Ok(job) => job,
                Err(_) => break,
            },
        };

        match job {
            Job::Fire { at, ticket, events } => pending.push(Pending { at, ticket, events }),
            Job::Shutdown => break,
        }
    }
}
