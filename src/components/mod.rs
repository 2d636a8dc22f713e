// Reusable screen components

pub mod footer;

pub use footer::Footer;
