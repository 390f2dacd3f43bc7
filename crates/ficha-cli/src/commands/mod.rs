pub mod columns;
pub mod extract;
pub mod inspect;
