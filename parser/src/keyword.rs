//! Reserved words of the source language.
//!
//! An identifier rule in the grammar must reject these so that, for
//! example, `int` cannot also be read as a variable name.

use phf::phf_set;

pub static KEYWORDS: phf::Set<&'static str> = phf_set! {
    "int",
    "void",
    "const",
    "return",
};

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word)
}
