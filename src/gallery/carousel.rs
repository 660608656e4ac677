/// `(index - 1 + len) % len`; unchanged when `len` is zero.
pub fn prev_index(index: usize, len: usize) -> usize {
    if len == 0 { index } else { (index % len + len - 1) % len }
}

/// `(index + 1) % len`; unchanged when `len` is zero.
pub fn next_index(index: usize, len: usize) -> usize {
    if len == 0 { index } else { (index + 1) % len }
}

/// Current position in a fixed-length item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn prev(&mut self) -> usize {
        self.index = prev_index(self.index, self.len);
        self.index
    }

    pub fn next(&mut self) -> usize {
        self.index = next_index(self.index, self.len);
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_both_ways() {
        assert_eq!(prev_index(0, 3), 2);
        assert_eq!(next_index(0, 3), 1);
        assert_eq!(next_index(2, 3), 0);
    }

    #[test]
    fn prev_and_next_are_inverse() {
        for len in 1..6 {
            for i in 0..len {
                assert_eq!(next_index(prev_index(i, len), len), i);
                assert_eq!(prev_index(next_index(i, len), len), i);
            }
        }
    }

    #[test]
    fn empty_list_is_a_no_op() {
        let mut carousel = Carousel::new(0);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.prev(), 0);
    }

    #[test]
    fn steps_through_items() {
        let mut carousel = Carousel::new(3);
        assert_eq!(carousel.prev(), 2);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.next(), 1);
        assert_eq!(carousel.index(), 1);
    }
}
