//! Carousel command.

use std::sync::Arc;

use tokio::sync::Mutex;

use stall_storefront::AppError;
use stall_storefront::carousel::{
    Carousel, CarouselController, SlideTrack, SlideTransition, track_transform,
};
use stall_storefront::config::StorefrontConfig;
use stall_storefront::page::{Page, Region};

use super::{CommandError, print_line};

fn print_transition(source: &str, transition: &SlideTransition) -> Result<(), CommandError> {
    print_line(&format!(
        "{source}: slide {} ({})",
        transition.index, transition.transform
    ))
}

/// Step a carousel of `slides` slides and optionally watch autoplay.
///
/// # Errors
///
/// Returns an error if `slides` is zero.
pub async fn run(
    config: &StorefrontConfig,
    slides: usize,
    next: usize,
    previous: usize,
    autoplay_ticks: usize,
) -> Result<(), CommandError> {
    let page = Page::index(slides);
    let carousel = Carousel::from_page(&page).map_err(AppError::from)?;
    let controller = CarouselController::new(carousel);
    let page = Arc::new(Mutex::new(page));
    let track = SlideTrack::spawn(&controller, Arc::clone(&page));

    for _ in 0..next {
        print_transition("next", &controller.next().await)?;
    }
    for _ in 0..previous {
        print_transition("previous", &controller.previous().await)?;
    }

    if autoplay_ticks > 0 {
        let mut rx = controller.subscribe();
        let autoplay = controller.start_autoplay(config.carousel_interval);
        for _ in 0..autoplay_ticks {
            if rx.changed().await.is_err() {
                break;
            }
            let index = *rx.borrow_and_update();
            print_transition(
                "autoplay",
                &SlideTransition {
                    index,
                    transform: track_transform(index),
                },
            )?;
        }
        autoplay.stop();
    }

    print_line(&format!("current: slide {}", controller.current().await))?;

    // The renderer drains the remaining changes once the controller is gone
    drop(controller);
    track.finished().await;
    let page = page.lock().await;
    print_line(&format!(
        "track: {}",
        page.text(Region::Slides).unwrap_or_default()
    ))
}
