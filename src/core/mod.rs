pub mod attributes;
pub mod collaborators;
pub mod draft;
pub mod markov;
pub mod name;
pub mod origin;
pub mod phonetics;
pub mod sampling;
pub mod store;
pub mod tier;
