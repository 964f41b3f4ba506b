use std::ops::ControlFlow;

use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use super::{PlaybackState, Typewriter};

/// How an async playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The engine reached its terminal state.
    Completed,
    /// The cancellation token fired.
    Cancelled,
    /// The emit callback asked to stop.
    Halted,
}

/// Plays `typewriter` on the tokio timer, calling `on_emit` for every snapshot.
///
/// Deadlines are computed from the previous deadline, not from wake-up time,
/// so a slow callback does not stretch the timeline. Cancellation is checked
/// before every emission; once `cancel` fires no further snapshot is
/// delivered and the engine is stopped.
pub async fn play<F>(
    typewriter: &mut Typewriter,
    cancel: &CancellationToken,
    mut on_emit: F,
) -> PlayOutcome
where
    F: FnMut(&PlaybackState) -> ControlFlow<()>,
{
    let mut step = typewriter.start();
    let mut deadline = Instant::now();

    loop {
        if let Some(state) = step.emitted.take() {
            if cancel.is_cancelled() {
                typewriter.stop();
                return PlayOutcome::Cancelled;
            }
            if on_emit(&state).is_break() {
                typewriter.stop();
                return PlayOutcome::Halted;
            }
        }

        let Some(delay) = step.next else {
            return PlayOutcome::Completed;
        };
        deadline += delay;

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                typewriter.stop();
                return PlayOutcome::Cancelled;
            }
            () = sleep_until(deadline) => {}
        }

        step = typewriter.advance();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::typewriter::{Script, TypewriterConfig};

    fn typewriter(lines: &[&str], looping: bool, accumulate: bool) -> Typewriter {
        let config = TypewriterConfig::from_millis(50, 3000, looping, accumulate).unwrap();
        Typewriter::new(Script::new(lines.iter().copied()), config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_emits_on_schedule() {
        let mut tw = typewriter(&["ab"], true, false);
        let cancel = CancellationToken::new();
        let origin = Instant::now();
        let mut seen = Vec::new();

        let outcome = play(&mut tw, &cancel, |state| {
            seen.push((origin.elapsed().as_millis(), state.revealed.clone()));
            if seen.len() == 5 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .await;

        assert_eq!(outcome, PlayOutcome::Halted);
        let seen: Vec<(u128, &str)> = seen.iter().map(|(t, s)| (*t, s.as_str())).collect();
        assert_eq!(
            seen,
            vec![
                (50, "a"),
                (100, "ab"),
                (150, ""),
                (3150, ""),
                (3200, "a")
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_runs_to_completion() {
        let mut tw = typewriter(&["x", "y"], false, true);
        let cancel = CancellationToken::new();
        let mut last = None;

        let outcome = play(&mut tw, &cancel, |state| {
            last = Some(state.clone());
            ControlFlow::Continue(())
        })
        .await;

        assert_eq!(outcome, PlayOutcome::Completed);
        let last = last.unwrap();
        assert_eq!(last.revealed, "x\ny");
        assert!(last.is_complete);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_emissions() {
        let mut tw = typewriter(&["abcdef"], true, false);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let mut count = 0;

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(125)).await;
            trigger.cancel();
        });

        let outcome = play(&mut tw, &cancel, |_| {
            count += 1;
            ControlFlow::Continue(())
        })
        .await;
        canceller.await.unwrap();

        assert_eq!(outcome, PlayOutcome::Cancelled);
        // Reveals at 50 and 100 only.
        assert_eq!(count, 2);
        assert!(!tw.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_token_emits_nothing() {
        let mut tw = typewriter(&[], false, false);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut count = 0;

        let outcome = play(&mut tw, &cancel, |_| {
            count += 1;
            ControlFlow::Continue(())
        })
        .await;

        assert_eq!(outcome, PlayOutcome::Cancelled);
        assert_eq!(count, 0);
    }
}
