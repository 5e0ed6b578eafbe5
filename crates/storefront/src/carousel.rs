//! Image carousel.
//!
//! [`Carousel`] is the cyclic slide index. [`CarouselController`] shares one
//! between manual navigation and the autoplay timer and publishes every new
//! index on a watch channel, which [`SlideTrack`] applies to a page.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::page::{Page, Region};

/// Carousel construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("Slide container is missing or has no slides")]
    NoSlides,
}

/// A slide change and the track transform that shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideTransition {
    pub index: usize,
    pub transform: String,
}

impl SlideTransition {
    fn to(index: usize) -> Self {
        Self {
            index,
            transform: track_transform(index),
        }
    }
}

/// Horizontal translation of the slide track that shows slide `index`.
#[must_use]
pub fn track_transform(index: usize) -> String {
    match index.saturating_mul(100) {
        0 => "translateX(0%)".to_string(),
        offset => format!("translateX(-{offset}%)"),
    }
}

/// Write the transform for slide `index` into [`Region::Slides`].
///
/// Returns `false` if the page has no slide track.
pub fn render_track(page: &mut Page, index: usize) -> bool {
    page.set(Region::Slides, track_transform(index))
}

/// Cyclic index over a fixed number of slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    current: usize,
    total: usize,
}

impl Carousel {
    /// A carousel over `total_slides` slides, showing the first.
    ///
    /// # Errors
    ///
    /// Returns `CarouselError::NoSlides` if `total_slides` is zero.
    pub const fn new(total_slides: usize) -> Result<Self, CarouselError> {
        if total_slides == 0 {
            return Err(CarouselError::NoSlides);
        }
        Ok(Self {
            current: 0,
            total: total_slides,
        })
    }

    /// A carousel over the page's slide track. The slide count is read once.
    ///
    /// # Errors
    ///
    /// Returns `CarouselError::NoSlides` if the page has no slide track or it
    /// is empty.
    pub fn from_page(page: &Page) -> Result<Self, CarouselError> {
        Self::new(page.slide_count().ok_or(CarouselError::NoSlides)?)
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Advance one slide, wrapping to the first after the last.
    pub fn next(&mut self) -> SlideTransition {
        self.current = (self.current + 1) % self.total;
        SlideTransition::to(self.current)
    }

    /// Go back one slide, wrapping to the last before the first.
    pub fn previous(&mut self) -> SlideTransition {
        self.current = (self.current + self.total - 1) % self.total;
        SlideTransition::to(self.current)
    }
}

struct Shared {
    carousel: Mutex<Carousel>,
    index_tx: watch::Sender<usize>,
}

impl Shared {
    async fn step(&self, forward: bool) -> SlideTransition {
        let transition = {
            let mut carousel = self.carousel.lock().await;
            if forward {
                carousel.next()
            } else {
                carousel.previous()
            }
        };
        self.index_tx.send_replace(transition.index);
        transition
    }
}

/// Carousel shared between manual controls and the autoplay timer.
#[derive(Clone)]
pub struct CarouselController {
    shared: Arc<Shared>,
}

impl CarouselController {
    #[must_use]
    pub fn new(carousel: Carousel) -> Self {
        let (index_tx, _) = watch::channel(carousel.current());
        Self {
            shared: Arc::new(Shared {
                carousel: Mutex::new(carousel),
                index_tx,
            }),
        }
    }

    /// The next-slide control.
    pub async fn next(&self) -> SlideTransition {
        self.shared.step(true).await
    }

    /// The previous-slide control.
    pub async fn previous(&self) -> SlideTransition {
        self.shared.step(false).await
    }

    /// Index of the slide currently shown.
    pub async fn current(&self) -> usize {
        self.shared.carousel.lock().await.current()
    }

    /// Receiver that observes every slide change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.shared.index_tx.subscribe()
    }

    /// Advance to the next slide every `period`, starting one period from
    /// now. Manual navigation does not pause or reset the timer.
    ///
    /// Must be called within a tokio runtime. Dropping the returned handle
    /// leaves the timer running.
    #[must_use = "dropping the handle leaves autoplay running with no way to stop it"]
    pub fn start_autoplay(&self, period: Duration) -> Autoplay {
        let shared = Arc::clone(&self.shared);
        info!(period_ms = period.as_millis(), "Starting carousel autoplay");
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let transition = shared.step(true).await;
                debug!(index = transition.index, "Autoplay advanced carousel");
            }
        });
        Autoplay { handle }
    }
}

/// Handle to a running autoplay timer.
#[derive(Debug)]
pub struct Autoplay {
    handle: JoinHandle<()>,
}

impl Autoplay {
    /// Stop the timer.
    pub fn stop(self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

/// Slide-track renderer.
///
/// Writes the current slide into [`Region::Slides`] of a shared page, then
/// every index the controller publishes. The task ends once the controller
/// and its autoplay timer are gone.
#[derive(Debug)]
pub struct SlideTrack {
    handle: JoinHandle<()>,
}

impl SlideTrack {
    /// Start rendering `controller`'s slides into `page`.
    ///
    /// Must be called within a tokio runtime.
    #[must_use = "dropping the handle leaves the renderer running with no way to stop it"]
    pub fn spawn(controller: &CarouselController, page: Arc<Mutex<Page>>) -> Self {
        let mut rx = controller.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                let index = *rx.borrow_and_update();
                let mounted = {
                    let mut page = page.lock().await;
                    render_track(&mut page, index)
                };
                if !mounted {
                    debug!(index, "Page has no slide track");
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
            debug!("Slide track renderer finished");
        });
        Self { handle }
    }

    /// Wait for the renderer to finish.
    pub async fn finished(self) {
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Slide track renderer did not finish cleanly");
        }
    }

    /// Stop rendering.
    pub fn stop(self) {
        self.handle.abort();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_slides_is_an_error() {
        assert_eq!(Carousel::new(0), Err(CarouselError::NoSlides));
        assert_eq!(
            Carousel::from_page(&Page::checkout()),
            Err(CarouselError::NoSlides)
        );
        assert_eq!(
            Carousel::from_page(&Page::index(0)),
            Err(CarouselError::NoSlides)
        );
    }

    #[test]
    fn test_next_wraps() {
        let mut carousel = Carousel::new(3).unwrap();
        let seq: Vec<usize> = (0..4).map(|_| carousel.next().index).collect();
        assert_eq!(seq, vec![1, 2, 0, 1]);
        assert_eq!(carousel.previous().index, 0);
    }

    #[test]
    fn test_previous_wraps() {
        let mut carousel = Carousel::new(4).unwrap();
        for n in 1..=9 {
            let index = carousel.previous().index;
            assert_eq!(index, (4 - n % 4) % 4);
        }
    }

    #[test]
    fn test_next_matches_modulo() {
        for total in 1..=5 {
            let mut carousel = Carousel::new(total).unwrap();
            for n in 1..=12 {
                assert_eq!(carousel.next().index, n % total);
            }
        }
    }

    #[test]
    fn test_single_slide_stays_put() {
        let mut carousel = Carousel::new(1).unwrap();
        assert_eq!(carousel.next().index, 0);
        assert_eq!(carousel.previous().index, 0);
    }

    #[test]
    fn test_track_transform() {
        assert_eq!(track_transform(0), "translateX(0%)");
        assert_eq!(track_transform(1), "translateX(-100%)");
        assert_eq!(track_transform(2), "translateX(-200%)");
    }

    #[test]
    fn test_render_track() {
        let mut page = Page::index(3);
        assert!(render_track(&mut page, 2));
        assert_eq!(page.text(Region::Slides), Some("translateX(-200%)"));
        assert!(!render_track(&mut Page::checkout(), 1));
    }

    #[tokio::test]
    async fn test_controller_publishes_changes() {
        let controller = CarouselController::new(Carousel::new(3).unwrap());
        let mut rx = controller.subscribe();
        assert_eq!(*rx.borrow(), 0);

        let transition = controller.next().await;
        assert_eq!(transition.transform, "translateX(-100%)");
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);

        controller.previous().await;
        controller.previous().await;
        assert_eq!(controller.current().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_advances_every_period() {
        let controller = CarouselController::new(Carousel::new(3).unwrap());
        let mut rx = controller.subscribe();
        let start = Instant::now();
        let autoplay = controller.start_autoplay(Duration::from_millis(5000));

        for expected in [1, 2, 0] {
            rx.changed().await.unwrap();
            assert_eq!(*rx.borrow_and_update(), expected);
        }
        assert!(start.elapsed() >= Duration::from_millis(15_000));
        assert!(autoplay.is_running());
        autoplay.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_slide_track_follows_every_transition() {
        let page = Arc::new(Mutex::new(Page::index(3)));
        let controller = CarouselController::new(Carousel::new(3).unwrap());
        let track = SlideTrack::spawn(&controller, Arc::clone(&page));

        // Paused time only advances once the renderer task is idle.
        let settle = || tokio::time::sleep(Duration::from_millis(1));

        settle().await;
        assert_eq!(page.lock().await.text(Region::Slides), Some("translateX(0%)"));

        controller.next().await;
        settle().await;
        assert_eq!(
            page.lock().await.text(Region::Slides),
            Some("translateX(-100%)")
        );

        let autoplay = controller.start_autoplay(Duration::from_millis(5000));
        tokio::time::sleep(Duration::from_millis(5001)).await;
        assert_eq!(
            page.lock().await.text(Region::Slides),
            Some("translateX(-200%)")
        );

        autoplay.stop();
        drop(controller);
        track.finished().await;
        assert_eq!(
            page.lock().await.text(Region::Slides),
            Some("translateX(-200%)")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slide_track_without_region_is_silent() {
        let page = Arc::new(Mutex::new(Page::checkout()));
        let controller = CarouselController::new(Carousel::new(2).unwrap());
        let track = SlideTrack::spawn(&controller, Arc::clone(&page));
        controller.next().await;
        drop(controller);
        track.finished().await;
        assert_eq!(page.lock().await.text(Region::Slides), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_does_not_pause_autoplay() {
        let controller = CarouselController::new(Carousel::new(3).unwrap());
        let autoplay = controller.start_autoplay(Duration::from_millis(5000));

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(controller.next().await.index, 1);

        let mut rx = controller.subscribe();
        rx.changed().await.unwrap();
        // Timer still fires at 5000ms, not 2500ms after the click.
        assert_eq!(*rx.borrow_and_update(), 2);
        autoplay.stop();
    }
}
