//! Integration tests for the carousel controller.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use stall_storefront::AppError;
use stall_storefront::carousel::{Carousel, CarouselController, CarouselError, SlideTrack};
use stall_storefront::page::{Page, Region};

#[tokio::test]
async fn test_three_slide_example() {
    let page = Page::index(3);
    let controller = CarouselController::new(Carousel::from_page(&page).unwrap());

    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(controller.next().await.index);
    }
    assert_eq!(seen, vec![1, 2, 0, 1]);
    assert_eq!(controller.previous().await.index, 0);
}

#[tokio::test]
async fn test_previous_clicks_from_start() {
    for n in 0..10_usize {
        let controller = CarouselController::new(Carousel::new(3).unwrap());
        for _ in 0..n {
            controller.previous().await;
        }
        assert_eq!(controller.current().await, (3 - n % 3) % 3);
    }
}

#[test]
fn test_page_without_slides_is_an_error() {
    let err: AppError = Carousel::from_page(&Page::checkout()).unwrap_err().into();
    assert!(matches!(err, AppError::Carousel(CarouselError::NoSlides)));
}

#[tokio::test(start_paused = true)]
async fn test_autoplay_drives_slide_track() {
    let page = Page::index(2);
    let controller = CarouselController::new(Carousel::from_page(&page).unwrap());
    let page = Arc::new(Mutex::new(page));
    let track = SlideTrack::spawn(&controller, Arc::clone(&page));
    let autoplay = controller.start_autoplay(Duration::from_secs(5));

    tokio::time::sleep(Duration::from_millis(5001)).await;
    assert_eq!(
        page.lock().await.text(Region::Slides),
        Some("translateX(-100%)")
    );

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(page.lock().await.text(Region::Slides), Some("translateX(0%)"));

    autoplay.stop();
    drop(controller);
    track.finished().await;
}
