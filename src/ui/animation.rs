//! Looping cafe animation shown on the search screen
//!
//! The animation is a scoped resource: it starts playing when acquired and
//! is stopped and torn down when the owner drops it.

use std::time::Duration;

use iced::time;
use iced::Subscription;

/// Steam rising from a cup, one frame per tick.
const FRAMES: [&str; 6] = [
    "  )      \n ☕",
    "  ) (    \n ☕",
    " ( ) (   \n ☕",
    "  ( ) )  \n ☕",
    "   ( )   \n ☕",
    "    (    \n ☕",
];

pub const FRAME_INTERVAL: Duration = Duration::from_millis(180);

type Teardown = Box<dyn FnOnce() + Send>;

pub struct Animation {
    frame: usize,
    playing: bool,
    teardown: Option<Teardown>,
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("frame", &self.frame)
            .field("playing", &self.playing)
            .field("released", &self.teardown.is_none())
            .finish()
    }
}

impl Animation {
    /// Acquire the animation; it loops until stopped.
    pub fn start() -> Self {
        tracing::debug!("Animation acquired");
        Self {
            frame: 0,
            playing: true,
            teardown: Some(Box::new(|| tracing::debug!("Animation torn down"))),
        }
    }

    /// Replace the release hook. Runs once, on the first `stop` or on drop.
    #[cfg(test)]
    pub fn on_teardown(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.teardown = Some(Box::new(hook));
        self
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn tick(&mut self) {
        if self.playing {
            self.frame = (self.frame + 1) % FRAMES.len();
        }
    }

    pub fn frame(&self) -> &'static str {
        FRAMES[self.frame]
    }

    /// Stop playback and release the animation
    pub fn stop(&mut self) {
        self.playing = false;
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    pub fn subscription(&self) -> Subscription<()> {
        if self.is_playing() {
            time::every(FRAME_INTERVAL).map(|_| ())
        } else {
            Subscription::none()
        }
    }
}

impl Drop for Animation {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counted() -> (Animation, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let hook = count.clone();
        let animation = Animation::start().on_teardown(move || {
            hook.fetch_add(1, Ordering::SeqCst);
        });
        (animation, count)
    }

    #[test]
    fn test_drop_tears_down_once() {
        let (animation, count) = counted();
        assert!(animation.is_playing());
        drop(animation);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stop_then_drop_tears_down_once() {
        let (mut animation, count) = counted();
        animation.stop();
        animation.stop();
        assert!(!animation.is_playing());
        drop(animation);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tick_loops_and_freezes_when_stopped() {
        let (mut animation, _) = counted();
        for _ in 0..FRAMES.len() {
            animation.tick();
        }
        assert_eq!(animation.frame(), FRAMES[0]);

        animation.tick();
        animation.stop();
        animation.tick();
        assert_eq!(animation.frame(), FRAMES[1]);
    }
}
