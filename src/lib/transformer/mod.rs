//! A transformer is an adapter over an iterator of pulldown-cmark `Event`. It
//! intercepts any incoming event(s) that are of interest, and outputs a
//! transformed event. For example, the code block transformer consumes the
//! events from `Event::Start(Tag::CodeBlock(lang))` to
//! `Event::End(TagEnd::CodeBlock)` and returns a single `Event::Html` holding
//! the highlighted block.
use pulldown_cmark::Event;

pub mod code_block;
pub mod line_break;
pub mod toc;

/// A transformer over events, that takes in an inner iterator and returns
/// another iterator of events, which returns transformed events.
pub trait Transformer<'a, I>: Iterator<Item = Event<'a>> + Sized
where
    I: Iterator<Item = Event<'a>>,
{
    /// Wrap an inner iterator with the transformer
    fn transform(inner: I) -> Self;
}

/// A transformer that needs settings to be built.
pub trait ConfiguredTransformer<'a, I>: Iterator<Item = Event<'a>> + Sized
where
    I: Iterator<Item = Event<'a>>,
{
    type Config;

    /// Wrap an inner iterator with the transformer, using `config`
    fn transform_with(inner: I, config: Self::Config) -> Self;
}

/// Wrap an event iterator with another transformer, allowing for chaining.
pub trait WithTransformer<'a>: Iterator<Item = Event<'a>> + Sized {
    /// Wrap ourselves with some transformer
    fn with_transformer<T: Transformer<'a, Self>>(self) -> T {
        T::transform(self)
    }

    /// Wrap ourselves with a transformer that takes settings
    fn with_configured_transformer<T: ConfiguredTransformer<'a, Self>>(
        self,
        config: T::Config,
    ) -> T {
        T::transform_with(self, config)
    }
}

/// Blanket implementation over any event iterator
impl<'a, I: Iterator<Item = Event<'a>>> WithTransformer<'a> for I {}
