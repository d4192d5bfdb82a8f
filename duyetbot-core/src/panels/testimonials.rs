use std::time::Duration;

use tracing::debug;

use crate::catalog::TESTIMONIALS;
use crate::models::Testimonial;
use crate::scheduler::{TimerEvent, TimerKey, TimerScope};

/// Rotating testimonial card. Auto-advances on an interval that is stopped
/// while the pointer hovers the carousel.
#[derive(Debug)]
pub struct TestimonialCarousel {
    index: usize,
    hovered: bool,
    period: Duration,
    timers: TimerScope,
}

impl TestimonialCarousel {
    pub fn new(timers: TimerScope, period: Duration) -> Self {
        let mut carousel = Self {
            index: 0,
            hovered: false,
            period,
            timers,
        };
        carousel.timers.every(TimerKey::CarouselAdvance, period);
        carousel
    }

    pub fn testimonials(&self) -> &'static [Testimonial] {
        TESTIMONIALS
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&'static Testimonial> {
        TESTIMONIALS.get(self.index)
    }

    pub fn count(&self) -> usize {
        TESTIMONIALS.len()
    }

    pub fn average_rating(&self) -> f64 {
        if TESTIMONIALS.is_empty() {
            return 0.0;
        }
        let sum: u32 = TESTIMONIALS.iter().map(|t| u32::from(t.rating)).sum();
        f64::from(sum) / TESTIMONIALS.len() as f64
    }

    pub fn next(&mut self) {
        self.index = wrap_next(self.index, TESTIMONIALS.len());
    }

    pub fn previous(&mut self) {
        self.index = wrap_prev(self.index, TESTIMONIALS.len());
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= TESTIMONIALS.len() {
            return false;
        }
        self.index = index;
        true
    }

    pub fn is_paused(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        if hovered == self.hovered {
            return;
        }
        self.hovered = hovered;
        if hovered {
            self.timers.cancel(TimerKey::CarouselAdvance);
        } else {
            self.timers.every(TimerKey::CarouselAdvance, self.period);
        }
        debug!(hovered, "Carousel hover changed");
    }

    pub fn handle_timer(&mut self, event: &TimerEvent) -> bool {
        if event.key != TimerKey::CarouselAdvance || !self.timers.accept(event) {
            return false;
        }
        self.next();
        true
    }
}

fn wrap_next(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + 1) % len
    }
}

fn wrap_prev(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Scheduler;
    use tokio::time;

    const PERIOD: Duration = Duration::from_secs(5);

    #[test]
    fn test_wrap_helpers() {
        assert_eq!(wrap_next(3, 4), 0);
        assert_eq!(wrap_prev(0, 4), 3);
        assert_eq!(wrap_next(0, 0), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_wraps() {
        let (scheduler, _rx) = Scheduler::new();
        let mut carousel = TestimonialCarousel::new(scheduler.scope(), PERIOD);
        let n = carousel.count();

        carousel.previous();
        assert_eq!(carousel.index(), n - 1);
        carousel.next();
        assert_eq!(carousel.index(), 0);

        assert!(carousel.go_to(2));
        assert_eq!(carousel.current().map(|t| t.name), Some("Sarah Kim"));
        assert!(!carousel.go_to(n));
        assert_eq!(carousel.index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_advance() {
        let (scheduler, mut rx) = Scheduler::new();
        let mut carousel = TestimonialCarousel::new(scheduler.scope(), PERIOD);

        let event = rx.recv().await.unwrap();
        assert!(carousel.handle_timer(&event));
        assert_eq!(carousel.index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hover_pauses_auto_advance() {
        let (scheduler, mut rx) = Scheduler::new();
        let mut carousel = TestimonialCarousel::new(scheduler.scope(), PERIOD);

        carousel.set_hovered(true);
        assert!(carousel.is_paused());
        time::sleep(PERIOD * 3).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(carousel.index(), 0);

        carousel.set_hovered(false);
        let event = rx.recv().await.unwrap();
        assert!(carousel.handle_timer(&event));
        assert_eq!(carousel.index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_average_rating() {
        let (scheduler, _rx) = Scheduler::new();
        let carousel = TestimonialCarousel::new(scheduler.scope(), PERIOD);
        assert_eq!(carousel.average_rating(), 5.0);
        assert_eq!(carousel.count(), 4);
    }
}
