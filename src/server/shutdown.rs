//! Process-wide shutdown signalling.
//!
//! A single [`ShutdownTrigger`] flips a watch channel; every [`Shutdown`]
//! handle cloned from it observes the change.

use tokio::sync::{mpsc, watch};

pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

#[derive(Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

/// Creates a linked trigger and handle.
pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Shutdown {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Completes once shutdown has been triggered. If the trigger is dropped
    /// without firing, this never completes.
    pub async fn recv(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Counts connection handlers that are still running.
///
/// Each handler holds an [`InflightGuard`]; [`Inflight::wait`] completes once
/// every guard handed out has been dropped.
pub struct Inflight {
    tx: mpsc::Sender<()>,
    rx: mpsc::Receiver<()>,
}

pub struct InflightGuard {
    _tx: mpsc::Sender<()>,
}

impl Inflight {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self { tx, rx }
    }

    pub fn guard(&self) -> InflightGuard {
        InflightGuard {
            _tx: self.tx.clone(),
        }
    }

    pub async fn wait(self) {
        let Inflight { tx, mut rx } = self;
        drop(tx);
        // Nothing is ever sent; `recv` yields `None` once the last sender is gone.
        let _ = rx.recv().await;
    }
}

impl Default for Inflight {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits for SIGINT, SIGTERM or SIGABRT and returns the signal's name.
#[cfg(unix)]
pub async fn wait_for_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut abort = signal(SignalKind::from_raw(libc::SIGABRT))?;

    let name = tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
        _ = abort.recv() => "SIGABRT",
    };
    Ok(name)
}

#[cfg(not(unix))]
pub async fn wait_for_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("ctrl-c")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn handles_observe_trigger() {
        let (trigger, shutdown) = channel();
        let mut a = shutdown.clone();
        let mut b = shutdown;

        trigger.trigger();

        tokio::time::timeout(Duration::from_secs(1), a.recv()).await.unwrap();
        tokio::time::timeout(Duration::from_secs(1), b.recv()).await.unwrap();
        assert!(a.is_triggered());
    }

    #[tokio::test]
    async fn dropped_trigger_never_fires() {
        let (trigger, mut shutdown) = channel();
        drop(trigger);

        let res = tokio::time::timeout(Duration::from_millis(50), shutdown.recv()).await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn inflight_waits_for_every_guard() {
        let inflight = Inflight::new();
        let first = inflight.guard();
        let second = inflight.guard();

        let waiter = tokio::spawn(inflight.wait());
        drop(first);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(second);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn inflight_without_guards_is_done() {
        tokio::time::timeout(Duration::from_secs(1), Inflight::new().wait())
            .await
            .unwrap();
    }
}
