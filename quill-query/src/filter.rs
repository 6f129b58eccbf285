//! Logical-AND chains of single-purpose filters.
//!
//! List operations take one filter object whose type has an `and` link to
//! another filter of the same type. Callers build one small filter per
//! constraint and [`combine`] links them:
//!
//! ```rust
//! use quill_query::{FilterNode, combine};
//!
//! #[derive(Debug, Clone, PartialEq, Default)]
//! struct VvFilter {
//!     location: Option<String>,
//!     and: Option<Box<VvFilter>>,
//! }
//!
//! impl FilterNode for VvFilter {
//!     fn and(&self) -> Option<&Self> {
//!         self.and.as_deref()
//!     }
//!
//!     fn with_and(mut self, next: Self) -> Self {
//!         self.and = Some(Box::new(next));
//!         self
//!     }
//! }
//!
//! let by = |loc: &str| VvFilter { location: Some(loc.into()), and: None };
//! let head = combine([by("a"), by("b"), by("c")]).unwrap();
//!
//! // The last filter supplied is the head of the chain.
//! assert_eq!(head.location.as_deref(), Some("c"));
//! assert_eq!(head.chain_len(), 3);
//! ```
//!
//! The chain nests last-supplied-first: for `[f1, f2, f3]` the head is `f3`,
//! `f3.and` is `f2`, and `f2.and` is `f1`. The AND of the constraints does
//! not depend on the order, but which node ends up outermost does.

use crate::quill_debug;

/// A filter object that can link to another filter of the same type.
///
/// Derive it with `#[derive(GqlFilter)]` on a struct with an
/// `#[gql(and)]` field of type `Option<Box<Self>>`.
pub trait FilterNode: Sized {
    /// The linked filter, if any.
    fn and(&self) -> Option<&Self>;

    /// Link `next` as this filter's `and`, replacing any existing link.
    ///
    /// Implementations must leave every other field untouched.
    fn with_and(self, next: Self) -> Self;

    /// Number of filters in the chain starting here.
    fn chain_len(&self) -> usize {
        self.chain().count()
    }

    /// Walk the chain from this filter inward.
    fn chain(&self) -> Chain<'_, Self> {
        Chain { next: Some(self) }
    }
}

/// Iterator over a filter chain, outermost first.
#[derive(Debug)]
pub struct Chain<'a, F> {
    next: Option<&'a F>,
}

impl<'a, F: FilterNode> Iterator for Chain<'a, F> {
    type Item = &'a F;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.and();
        Some(current)
    }
}

/// Combine filters into one AND chain.
///
/// - no filters: `None`
/// - one filter: returned unchanged
/// - several: each subsequent filter links the chain built so far, and
///   the last one is returned as the head
pub fn combine<F, I>(filters: I) -> Option<F>
where
    F: FilterNode,
    I: IntoIterator<Item = F>,
{
    let mut filters = filters.into_iter();
    let first = filters.next()?;
    let head = filters.fold(first, |chain, filter| filter.with_and(chain));

    quill_debug!(
        filter = std::any::type_name::<F>(),
        length = head.chain_len(),
        "Combined filter chain"
    );
    Some(head)
}

/// Combine clones of borrowed filters, leaving the originals untouched.
pub fn combine_cloned<F>(filters: &[F]) -> Option<F>
where
    F: FilterNode + Clone,
{
    combine(filters.iter().cloned())
}
