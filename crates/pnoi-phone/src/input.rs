//! Line input shared between the action loop and confirmation prompts.

use std::{io::BufRead, sync::Arc};

use tokio::sync::{Mutex, mpsc};
use tracing::debug;

/// Lines typed by the user. Whoever needs the next line locks the receiver;
/// actions run one at a time, so the action loop and a prompt never wait
/// on it together.
pub type SharedInput = Arc<Mutex<mpsc::Receiver<String>>>;

/// Forward stdin lines into a [`SharedInput`].
///
/// A plain thread rather than `spawn_blocking`: a read blocked on stdin
/// would otherwise hold up runtime shutdown.
pub fn spawn_stdin_reader() -> SharedInput {
    let (line_tx, line_rx) = mpsc::channel(32);

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line_tx.blocking_send(line).is_err() {
                break;
            }
        }
        debug!("Stdin reader stopped");
    });

    Arc::new(Mutex::new(line_rx))
}

/// Next input line, or `None` once input is closed.
pub async fn next_line(input: &SharedInput) -> Option<String> {
    input.lock().await.recv().await
}
