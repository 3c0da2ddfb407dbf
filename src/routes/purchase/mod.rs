pub mod post;

pub use post::beli;
