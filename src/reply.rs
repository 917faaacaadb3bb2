//! Auto-reply scheduling for chat messages.
//!
//! Each sent message schedules exactly one synthetic teammate reply after a
//! fixed short delay. The delay runs behind the [`Scheduler`] trait so tests
//! can fire jobs deterministically instead of sleeping. The fired job goes
//! through the caller-supplied dispatch closure, which re-reads current
//! state; a board reset between send and fire is therefore harmless.

use std::sync::Mutex;
use std::time::Duration;

use crate::model::{ChatMessage, Sender};

pub type Job = Box<dyn FnOnce() + Send + 'static>;

pub trait Scheduler {
    fn schedule(&self, delay: Duration, job: Job);
}

/// Scheduler that sleeps out the delay on the calling thread. The CLI is a
/// process per dispatch, so a detached timer would be killed at exit.
#[derive(Debug, Default)]
pub struct BlockingScheduler;

impl Scheduler for BlockingScheduler {
    fn schedule(&self, delay: Duration, job: Job) {
        std::thread::sleep(delay);
        job();
    }
}

/// Queues jobs until [`ManualScheduler::fire_all`] is called. Test only in
/// spirit, but lives here so integration tests can reach it.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<Vec<Job>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().map(|queue| queue.len()).unwrap_or(0)
    }

    /// Run every queued job in schedule order.
    pub fn fire_all(&self) {
        let jobs = match self.queue.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => return,
        };
        for job in jobs {
            job();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, _delay: Duration, job: Job) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push(job);
        }
    }
}

const CANNED_REPLIES: [&str; 4] = [
    "Sounds good, I'll take a look.",
    "On it. Anything else blocking you?",
    "Nice, thanks for the update!",
    "Can we sync on this tomorrow?",
];

/// Pick the canned reply for a sent message. Rotation keys off the message
/// text length so repeated sends vary without needing stored state.
pub fn reply_text(sent: &str) -> &'static str {
    CANNED_REPLIES[sent.chars().count() % CANNED_REPLIES.len()]
}

/// Schedule the teammate auto-reply for a just-sent message. `dispatch`
/// receives the reply and is responsible for reducing it into whatever the
/// current state is when the job fires.
pub fn schedule_auto_reply<F>(scheduler: &dyn Scheduler, delay: Duration, sent_text: &str, dispatch: F)
where
    F: FnOnce(ChatMessage) + Send + 'static,
{
    let reply = ChatMessage::new(Sender::Teammate, reply_text(sent_text));
    scheduler.schedule(delay, Box::new(move || dispatch(reply)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoardState;
    use crate::reducer::{reduce, Action};
    use std::sync::{Arc, Mutex};

    #[test]
    fn manual_scheduler_queues_until_fired() {
        let scheduler = ManualScheduler::new();
        let hits = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&hits);
        scheduler.schedule(
            Duration::from_millis(900),
            Box::new(move || *counter.lock().unwrap() += 1),
        );
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(*hits.lock().unwrap(), 0);
        scheduler.fire_all();
        assert_eq!(*hits.lock().unwrap(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn one_reply_per_send_from_teammate() {
        let scheduler = ManualScheduler::new();
        let state = Arc::new(Mutex::new(BoardState::default()));

        let shared = Arc::clone(&state);
        schedule_auto_reply(&scheduler, Duration::ZERO, "hello there", move |reply| {
            let mut state = shared.lock().unwrap();
            *state = reduce(&state, Action::AddMessage(reply));
        });
        scheduler.fire_all();

        let state = state.lock().unwrap();
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].sender, Sender::Teammate);
        assert_eq!(state.messages[0].text, reply_text("hello there"));
    }

    #[test]
    fn reply_after_reset_does_not_crash() {
        let scheduler = ManualScheduler::new();
        let state = Arc::new(Mutex::new(BoardState::default()));

        let shared = Arc::clone(&state);
        schedule_auto_reply(&scheduler, Duration::ZERO, "ping", move |reply| {
            let mut state = shared.lock().unwrap();
            *state = reduce(&state, Action::AddMessage(reply));
        });

        // Reset lands before the timer fires.
        {
            let mut state = state.lock().unwrap();
            *state = reduce(&state, Action::Reset);
        }
        scheduler.fire_all();

        let state = state.lock().unwrap();
        assert_eq!(state.messages.len(), 1);
        assert!(state.tasks.is_empty());
    }
}
