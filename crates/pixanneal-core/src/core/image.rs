//! Image geometry and the fixed-capacity, struct-of-arrays pixel arena.

/// Number of channels per pixel in an interleaved buffer (R, G, B).
pub const CHANNELS: usize = 3;

/// Largest image, in pixels, that fits in one working set.
pub const MAX_PIXELS: usize = 32 * 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub height: usize,
    pub width: usize,
}

impl Dimensions {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.height * self.width
    }

    #[inline]
    pub fn buffer_len(&self) -> usize {
        self.pixel_count() * CHANNELS
    }

    #[inline]
    pub fn row(&self, position: usize) -> usize {
        position / self.width
    }

    #[inline]
    pub fn col(&self, position: usize) -> usize {
        position % self.width
    }

    #[inline]
    pub fn contains(&self, position: usize) -> bool {
        position < self.pixel_count()
    }

    /// Resolves a signed, externally supplied index to a position inside the image.
    pub fn position(&self, index: i64) -> Option<usize> {
        usize::try_from(index).ok().filter(|&p| self.contains(p))
    }

    pub fn fits_capacity(&self) -> bool {
        self.height
            .checked_mul(self.width)
            .is_some_and(|pixels| pixels <= MAX_PIXELS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }
}

/// Mutable views of the three channel planes over the same range of positions.
pub struct ChannelsMut<'a> {
    pub red: &'a mut [u8],
    pub green: &'a mut [u8],
    pub blue: &'a mut [u8],
}

/// Shared views of the three channel planes over the same range of positions.
#[derive(Clone, Copy)]
pub struct Channels<'a> {
    pub red: &'a [u8],
    pub green: &'a [u8],
    pub blue: &'a [u8],
}

/// Resident pixel storage: one plane per channel, indexed by row-major position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelArena {
    red: [u8; MAX_PIXELS],
    green: [u8; MAX_PIXELS],
    blue: [u8; MAX_PIXELS],
}

impl Default for PixelArena {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelArena {
    pub fn new() -> Self {
        Self {
            red: [0; MAX_PIXELS],
            green: [0; MAX_PIXELS],
            blue: [0; MAX_PIXELS],
        }
    }

    #[inline]
    pub fn get(&self, position: usize) -> Rgb {
        Rgb::new(
            self.red[position],
            self.green[position],
            self.blue[position],
        )
    }

    pub fn set(&mut self, position: usize, pixel: Rgb) {
        self.red[position] = pixel.r;
        self.green[position] = pixel.g;
        self.blue[position] = pixel.b;
    }

    /// Exchanges all three channels of the pixels at `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.red.swap(a, b);
        self.green.swap(a, b);
        self.blue.swap(a, b);
    }

    pub fn channels(&self, range: std::ops::Range<usize>) -> Channels<'_> {
        Channels {
            red: &self.red[range.clone()],
            green: &self.green[range.clone()],
            blue: &self.blue[range],
        }
    }

    pub fn channels_mut(&mut self, range: std::ops::Range<usize>) -> ChannelsMut<'_> {
        ChannelsMut {
            red: &mut self.red[range.clone()],
            green: &mut self.green[range.clone()],
            blue: &mut self.blue[range],
        }
    }

    #[cfg(test)]
    pub(crate) fn from_pixels(pixels: &[Rgb]) -> Self {
        let mut arena = Self::new();
        for (position, &pixel) in pixels.iter().enumerate() {
            arena.set(position, pixel);
        }
        arena
    }
}
