use tokio::sync::mpsc::{self, error::TryRecvError};

use service::errors::ErrorKind;

use crate::dispatcher::{CallInfo, Completion};
use crate::operation::Output;

/// Foreground side of a call: renders the outcome and re-enables input.
pub trait Presenter {
    fn on_success(&mut self, call: &CallInfo, output: &Output);

    /// `message` is the error's display text, to be shown verbatim.
    fn on_error(&mut self, call: &CallInfo, kind: ErrorKind, message: &str);
}

/// Route one completion to the matching callback.
pub fn present<P: Presenter + ?Sized>(presenter: &mut P, completion: &Completion) {
    match &completion.outcome {
        Ok(output) => presenter.on_success(&completion.call, output),
        Err(e) => presenter.on_error(&completion.call, e.kind(), &e.to_string()),
    }
}

/// Present completions until every sender is gone.
pub async fn drain<P: Presenter + ?Sized>(rx: &mut mpsc::Receiver<Completion>, presenter: &mut P) -> usize {
    let mut n = 0;
    while let Some(completion) = rx.recv().await {
        present(presenter, &completion);
        n += 1;
    }
    n
}

/// Wait for and present `outstanding` completions, one per dispatched call.
/// Returns fewer only if the queue closes first. The watchdog bounds the wait.
pub async fn drain_outstanding<P: Presenter + ?Sized>(
    rx: &mut mpsc::Receiver<Completion>,
    presenter: &mut P,
    outstanding: usize,
) -> usize {
    let mut n = 0;
    while n < outstanding {
        match rx.recv().await {
            Some(completion) => {
                present(presenter, &completion);
                n += 1;
            }
            None => break,
        }
    }
    n
}

/// Present whatever is queued right now without waiting.
pub fn drain_ready<P: Presenter + ?Sized>(rx: &mut mpsc::Receiver<Completion>, presenter: &mut P) -> usize {
    let mut n = 0;
    loop {
        match rx.try_recv() {
            Ok(completion) => {
                present(presenter, &completion);
                n += 1;
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return n,
        }
    }
}
