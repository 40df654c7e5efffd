//! Table des opcodes LEGv8
//!
//! Associe des préfixes binaires de longueur variable (6, 8, 9, 10, 11 ou 32 bits)
//! à un descripteur d'instruction. La table est construite une seule fois puis
//! partagée en lecture seule.

use std::collections::HashMap;

use super::error::TableError;
use super::instructions::{Format, InstructionDescriptor, Mnemonic};

/// Longueurs de préfixe essayées, dans l'ordre : 32 d'abord (BREAK), puis du plus long au plus court
pub const OPCODE_LENGTHS: [usize; 6] = [32, 11, 10, 9, 8, 6];

/// Entrées canoniques du jeu d'instructions
pub const LEGV8_OPCODES: &[(&str, Mnemonic, Format)] = &[
    // 6 bits
    ("000101", Mnemonic::B, Format::B),
    // 8 bits
    ("10110100", Mnemonic::Cbz, Format::Cb),
    ("10110101", Mnemonic::Cbnz, Format::Cb),
    // 9 bits
    ("110100101", Mnemonic::Movz, Format::Im),
    ("111100101", Mnemonic::Movk, Format::Im),
    // 10 bits
    ("1001000100", Mnemonic::Addi, Format::I),
    ("1101000100", Mnemonic::Subi, Format::I),
    // 11 bits
    ("10001010000", Mnemonic::And, Format::R),
    ("10001011000", Mnemonic::Add, Format::R),
    ("10101010000", Mnemonic::Orr, Format::R),
    ("11001011000", Mnemonic::Sub, Format::R),
    ("11010011010", Mnemonic::Lsr, Format::R),
    ("11010011011", Mnemonic::Lsl, Format::R),
    ("11010011100", Mnemonic::Asr, Format::R),
    ("11101010000", Mnemonic::Eor, Format::R),
    ("11111000000", Mnemonic::Stur, Format::D),
    ("11111000010", Mnemonic::Ldur, Format::D),
    // 32 bits
    ("11111110110111101111111111100111", Mnemonic::Break, Format::Break),
];

/// Table des opcodes, immuable après construction
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    entries: HashMap<String, InstructionDescriptor>,
}

impl OpcodeTable {
    /// Construit la table canonique LEGv8
    pub fn legv8() -> Result<Self, TableError> {
        Self::from_entries(LEGV8_OPCODES)
    }

    /// Construit une table à partir de littéraux, en validant chaque clé
    pub fn from_entries(entries: &[(&str, Mnemonic, Format)]) -> Result<Self, TableError> {
        let mut table = HashMap::with_capacity(entries.len());

        for &(key, mnemonic, format) in entries {
            if !key.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(TableError::InvalidKeyCharacter { key: key.to_string() });
            }
            if !OPCODE_LENGTHS.contains(&key.len()) {
                return Err(TableError::InvalidKeyLength {
                    key: key.to_string(),
                    length: key.len(),
                });
            }
            let descriptor = InstructionDescriptor::new(mnemonic, format);
            if table.insert(key.to_string(), descriptor).is_some() {
                return Err(TableError::DuplicateKey { key: key.to_string() });
            }
        }

        // Les clés doivent être disjointes : aucune n'est le préfixe d'une autre
        for shorter in table.keys() {
            for longer in table.keys() {
                if longer.len() > shorter.len() && longer.starts_with(shorter.as_str()) {
                    return Err(TableError::OverlappingKeys {
                        shorter: shorter.clone(),
                        longer: longer.clone(),
                    });
                }
            }
        }

        log::debug!("Table des opcodes construite: {} entrées", table.len());
        Ok(Self { entries: table })
    }

    /// Recherche exacte d'une clé
    pub fn lookup(&self, bits: &str) -> Option<InstructionDescriptor> {
        self.entries.get(bits).copied()
    }

    /// Essaie les longueurs connues dans l'ordre de `OPCODE_LENGTHS` et
    /// retourne la première correspondance avec la clé qui l'a produite
    pub fn match_prefix<'a>(&self, bits: &'a str) -> Option<(&'a str, InstructionDescriptor)> {
        OPCODE_LENGTHS
            .iter()
            .filter(|&&length| bits.len() >= length)
            .find_map(|&length| {
                let key = &bits[..length];
                self.lookup(key).map(|descriptor| (key, descriptor))
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
