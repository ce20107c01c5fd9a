//! Syntax services on top of the parsed CST: node factory, mutable tree
//! editing, qualified-element navigation, and access classification.

mod access;
pub mod edit;
mod factory;
mod qualified;

pub use access::{Access, read_write_access};
pub use factory::SyntaxFactory;
pub use qualified::{
    qualified_element, qualified_element_or_callable_ref, qualified_element_selector,
    safe_deparenthesize,
};
