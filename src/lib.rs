//! LEGv8 Disasm - Désassembleur de mots binaires LEGv8
//! 
//! Cette bibliothèque décode un flux de mots d'instruction 32 bits (sous forme
//! de texte binaire) en lignes de désassemblage lisibles, en suivant l'adresse
//! mémoire de chaque instruction. Les mots qui suivent l'instruction BREAK sont
//! interprétés comme des données signées.

pub mod cpu;
pub mod config;
pub mod program;

pub use cpu::*;
pub use config::*;
pub use program::*;

/// Version du désassembleur
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Adresse de début du segment de texte (code)
pub const TEXT_SEGMENT_BASE: u32 = 96;

/// Taille d'un mot en octets (incrément d'adresse par ligne)
pub const WORD_SIZE: u32 = 4;

/// Largeur d'un mot d'instruction en bits
pub const WORD_BITS: usize = 32;

/// Plus petit opcode connu (format B)
pub const MIN_OPCODE_BITS: usize = 6;
