//! Request extractors.

mod member;
pub use member::Member;
