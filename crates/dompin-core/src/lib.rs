pub mod escape;
pub mod locator;
pub mod matcher;
pub mod parser;
pub mod selector;

pub use escape::escape_ident;
pub use locator::{
    generate_selector, locate, readable_selector, resolve, Location, Resolution, Uniqueness,
    READABLE_MAX_LEN,
};
pub use matcher::{count, query_all, query_first};
pub use parser::{parse, ParseError, Rule, SelectorParser};
pub use selector::{Compound, Selector};
