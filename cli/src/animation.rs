use glyphcast::{RasterImage, Surface};
use std::io;
use std::time::Duration;

/// A looped slideshow over part of the image collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    pub delay: Duration,
    pub loops: u32,
    /// Zero-based indices into the collection, repeats allowed
    pub order: Vec<usize>,
}

impl Animation {
    /// Show each frame in `order`, `loops` times over
    ///
    /// Every frame is refitted to the surface's size at the moment it is
    /// drawn, so resizing the terminal mid-animation takes effect on the next
    /// frame. `sleep` is called after each frame. Indices outside `images`
    /// are skipped. Returns the number of frames drawn.
    pub fn play<S: Surface>(
        &self,
        images: &mut [RasterImage],
        surface: &mut S,
        mut sleep: impl FnMut(Duration),
    ) -> io::Result<usize> {
        log::debug!(
            "animating {} frames x {} loops, {:?} apart",
            self.order.len(),
            self.loops,
            self.delay
        );

        let mut frames = 0;
        for _ in 0..self.loops {
            for &index in &self.order {
                let Some(image) = images.get_mut(index) else {
                    log::warn!("skipping frame {}: no such image", index + 1);
                    continue;
                };
                image.display(surface)?;
                sleep(self.delay);
                frames += 1;
            }
        }
        Ok(frames)
    }
}
