/*! Filtering utilities

Filters operate on a single sentence or on an aligned sentence pair.

Filters implement [filter::Filter]: detection is pure, so a given pair
always gets the same verdict no matter how much of the corpus has been
filtered before it.
!*/
mod filter;
mod pair;

pub use filter::Filter;
pub use pair::token_count;
pub use pair::Length;
pub use pair::Ratio;
