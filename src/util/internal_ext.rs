use std::ops::ControlFlow;

use internal_iterator::InternalIterator;

pub trait InternalIteratorExt: InternalIterator {
    /// Similar to for_each except that the closure can stop the loop while running by returning
    /// [ControlFlow::Break], whose payload is then returned as `Some`.
    /// This is just syntax sugar around [InternalIterator::find_map].
    fn for_each_control<B>(self, mut f: impl FnMut(Self::Item) -> ControlFlow<B>) -> Option<B> {
        self.find_map(|x| match f(x) {
            ControlFlow::Break(b) => Some(b),
            ControlFlow::Continue(()) => None,
        })
    }
}

impl<I: InternalIterator> InternalIteratorExt for I {}
