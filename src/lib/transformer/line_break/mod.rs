use pulldown_cmark::Event;

use crate::transformer::Transformer;

/// Render every soft line break as `<br />`, so single newlines in the source
/// survive into the page.
pub struct LineBreakTransformer<I> {
    inner: I,
}

impl<'a, I> Iterator for LineBreakTransformer<I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(match self.inner.next()? {
            Event::SoftBreak => Event::HardBreak,
            other => other,
        })
    }
}

impl<'a, I> Transformer<'a, I> for LineBreakTransformer<I>
where
    I: Iterator<Item = Event<'a>>,
{
    fn transform(inner: I) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests;
