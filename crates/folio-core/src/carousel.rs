//! Wrapping index over a fixed number of slides.

/// Current slide of a carousel with `len` slides.
///
/// An empty carousel stays at index 0 and ignores navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jumps to `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.len {
            self.index = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_prev_wrap() {
        let mut c = Carousel::new(3);
        c.prev();
        assert_eq!(c.index(), 2);
        c.next();
        c.next();
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let mut c = Carousel::new(4);
        assert!(c.select(3));
        assert!(!c.select(4));
        assert_eq!(c.index(), 3);
    }

    #[test]
    fn test_empty_carousel_is_inert() {
        let mut c = Carousel::new(0);
        c.next();
        c.prev();
        assert_eq!(c.index(), 0);
        assert!(c.is_empty());
    }
}
