//! Host abstraction trait definition

mod dom;

pub use dom::Dom;
