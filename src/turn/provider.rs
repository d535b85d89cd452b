//! Decision providers: the injection seam between the engine and whoever
//! makes choices.
//!
//! A turn asks three questions: where to draw from, which card to discard,
//! and (sometimes) whether to knock. Each question is a trait so human
//! input, scripted tests, or a future automated player can answer it.
//! Closures implement every trait directly.
//!
//! Providers own their retry policy. The engine validates each answer once
//! and returns an error on a bad one; it never asks again by itself.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::EngineError;
use crate::melds::MeldSet;

/// Where a player asks to draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawSource {
    Stock,
    DiscardPile,
}

/// What a player sees before drawing.
#[derive(Clone, Copy, Debug)]
pub struct DrawView<'a> {
    pub hand: &'a [Card],
    pub discard_top: Option<Card>,
    pub stock_remaining: usize,
}

/// What a player sees after drawing: the post-draw hand and its melds.
#[derive(Clone, Copy, Debug)]
pub struct DiscardView<'a> {
    pub hand: &'a [Card],
    pub drawn: Card,
    /// Where the card actually came from, after any fallback.
    pub source: DrawSource,
    pub melds: &'a MeldSet,
}

/// What a player sees when offered a knock.
#[derive(Clone, Copy, Debug)]
pub struct KnockView<'a> {
    pub hand: &'a [Card],
    pub discarded: Card,
    pub melds: &'a MeldSet,
    pub deadwood: u32,
}

pub trait DrawChoiceProvider {
    fn choose_draw(&mut self, view: &DrawView<'_>) -> Result<DrawSource, EngineError>;
}

pub trait DiscardChoiceProvider {
    /// Return a 1-based index into `view.hand`.
    fn choose_discard(&mut self, view: &DiscardView<'_>) -> Result<usize, EngineError>;
}

pub trait KnockChoiceProvider {
    /// Only asked when deadwood is between 1 and the knock threshold.
    fn choose_knock(&mut self, view: &KnockView<'_>) -> Result<bool, EngineError>;
}

impl<F> DrawChoiceProvider for F
where
    F: FnMut(&DrawView<'_>) -> Result<DrawSource, EngineError>,
{
    fn choose_draw(&mut self, view: &DrawView<'_>) -> Result<DrawSource, EngineError> {
        self(view)
    }
}

impl<F> DiscardChoiceProvider for F
where
    F: FnMut(&DiscardView<'_>) -> Result<usize, EngineError>,
{
    fn choose_discard(&mut self, view: &DiscardView<'_>) -> Result<usize, EngineError> {
        self(view)
    }
}

impl<F> KnockChoiceProvider for F
where
    F: FnMut(&KnockView<'_>) -> Result<bool, EngineError>,
{
    fn choose_knock(&mut self, view: &KnockView<'_>) -> Result<bool, EngineError> {
        self(view)
    }
}

/// Something that can answer all three turn questions.
pub trait Decisions: DrawChoiceProvider + DiscardChoiceProvider + KnockChoiceProvider {}

impl<T> Decisions for T where
    T: DrawChoiceProvider + DiscardChoiceProvider + KnockChoiceProvider + ?Sized
{
}

/// Three separate providers borrowed as one `Decisions`.
pub struct Seat<'a, D: ?Sized, P: ?Sized, K: ?Sized> {
    pub draw: &'a mut D,
    pub discard: &'a mut P,
    pub knock: &'a mut K,
}

impl<'a, D, P, K> Seat<'a, D, P, K>
where
    D: DrawChoiceProvider + ?Sized,
    P: DiscardChoiceProvider + ?Sized,
    K: KnockChoiceProvider + ?Sized,
{
    pub fn new(draw: &'a mut D, discard: &'a mut P, knock: &'a mut K) -> Self {
        Self { draw, discard, knock }
    }
}

impl<D, P, K> DrawChoiceProvider for Seat<'_, D, P, K>
where
    D: DrawChoiceProvider + ?Sized,
    P: ?Sized,
    K: ?Sized,
{
    fn choose_draw(&mut self, view: &DrawView<'_>) -> Result<DrawSource, EngineError> {
        self.draw.choose_draw(view)
    }
}

impl<D, P, K> DiscardChoiceProvider for Seat<'_, D, P, K>
where
    D: ?Sized,
    P: DiscardChoiceProvider + ?Sized,
    K: ?Sized,
{
    fn choose_discard(&mut self, view: &DiscardView<'_>) -> Result<usize, EngineError> {
        self.discard.choose_discard(view)
    }
}

impl<D, P, K> KnockChoiceProvider for Seat<'_, D, P, K>
where
    D: ?Sized,
    P: ?Sized,
    K: KnockChoiceProvider + ?Sized,
{
    fn choose_knock(&mut self, view: &KnockView<'_>) -> Result<bool, EngineError> {
        self.knock.choose_knock(view)
    }
}

/// Replays queued decisions in order.
///
/// Running out of a queue yields `DecisionUnavailable`.
///
/// ```
/// use gin_rummy::turn::{DrawSource, ScriptedProvider};
///
/// let script = ScriptedProvider::new()
///     .draws([DrawSource::Stock, DrawSource::DiscardPile])
///     .discards([1, 3])
///     .knocks([true]);
/// assert_eq!(script.pending(), (2, 2, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    draws: VecDeque<DrawSource>,
    discards: VecDeque<usize>,
    knocks: VecDeque<bool>,
}

impl ScriptedProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue draw choices.
    #[must_use]
    pub fn draws(mut self, sources: impl IntoIterator<Item = DrawSource>) -> Self {
        self.draws.extend(sources);
        self
    }

    /// Queue 1-based discard selections.
    #[must_use]
    pub fn discards(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.discards.extend(indices);
        self
    }

    /// Queue knock answers.
    #[must_use]
    pub fn knocks(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.knocks.extend(answers);
        self
    }

    /// Decisions still queued as `(draws, discards, knocks)`.
    #[must_use]
    pub fn pending(&self) -> (usize, usize, usize) {
        (self.draws.len(), self.discards.len(), self.knocks.len())
    }
}

impl DrawChoiceProvider for ScriptedProvider {
    fn choose_draw(&mut self, _view: &DrawView<'_>) -> Result<DrawSource, EngineError> {
        self.draws
            .pop_front()
            .ok_or_else(|| EngineError::DecisionUnavailable("draw script exhausted".into()))
    }
}

impl DiscardChoiceProvider for ScriptedProvider {
    fn choose_discard(&mut self, _view: &DiscardView<'_>) -> Result<usize, EngineError> {
        self.discards
            .pop_front()
            .ok_or_else(|| EngineError::DecisionUnavailable("discard script exhausted".into()))
    }
}

impl KnockChoiceProvider for ScriptedProvider {
    fn choose_knock(&mut self, _view: &KnockView<'_>) -> Result<bool, EngineError> {
        self.knocks
            .pop_front()
            .ok_or_else(|| EngineError::DecisionUnavailable("knock script exhausted".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_view() -> DrawView<'static> {
        DrawView {
            hand: &[],
            discard_top: None,
            stock_remaining: 0,
        }
    }

    #[test]
    fn test_scripted_draws_in_order() {
        let mut script = ScriptedProvider::new().draws([DrawSource::DiscardPile, DrawSource::Stock]);

        assert_eq!(script.choose_draw(&draw_view()), Ok(DrawSource::DiscardPile));
        assert_eq!(script.choose_draw(&draw_view()), Ok(DrawSource::Stock));
        assert!(matches!(
            script.choose_draw(&draw_view()),
            Err(EngineError::DecisionUnavailable(_))
        ));
    }

    fn draw_fn<F>(f: F) -> F
    where
        F: FnMut(&DrawView<'_>) -> Result<DrawSource, EngineError>,
    {
        f
    }

    fn never_knock(_: &KnockView<'_>) -> Result<bool, EngineError> {
        Ok(false)
    }

    #[test]
    fn test_closure_is_a_provider() {
        let mut calls = 0;
        let mut provider = draw_fn(|_| {
            calls += 1;
            Ok(DrawSource::Stock)
        });

        assert_eq!(provider.choose_draw(&draw_view()), Ok(DrawSource::Stock));
        assert_eq!(provider.choose_draw(&draw_view()), Ok(DrawSource::Stock));
        drop(provider);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_seat_delegates() {
        let mut draw = draw_fn(|_| Ok(DrawSource::DiscardPile));
        let mut discard = ScriptedProvider::new().discards([2]);
        let mut knock = never_knock;

        let mut seat = Seat::new(&mut draw, &mut discard, &mut knock);
        assert_eq!(seat.choose_draw(&draw_view()), Ok(DrawSource::DiscardPile));

        let melds = MeldSet::default();
        let card: Card = "AS".parse().unwrap();
        let view = DiscardView {
            hand: &[card],
            drawn: card,
            source: DrawSource::DiscardPile,
            melds: &melds,
        };
        assert_eq!(seat.choose_discard(&view), Ok(2));
        assert_eq!(
            seat.choose_knock(&KnockView {
                hand: &[card],
                discarded: card,
                melds: &melds,
                deadwood: 1,
            }),
            Ok(false)
        );
    }
}
