//! Désassemblage LEGv8
//! 
//! Le LEGv8 est un sous-ensemble pédagogique de l'ARMv8. Chaque instruction
//! occupe un mot de 32 bits ; l'opcode en tête du mot a une longueur variable
//! (6 à 11 bits, ou 32 bits pour BREAK).

pub mod error;
pub mod instructions;
pub mod instruction_formats;
pub mod opcode_table;
pub mod decoder;

use log::debug;

pub use error::*;
pub use instructions::*;
pub use instruction_formats::*;
pub use opcode_table::*;
pub use decoder::*;

use crate::{TEXT_SEGMENT_BASE, WORD_SIZE};

/// Statistiques d'une passe de désassemblage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisassemblyStats {
    pub lines: u64,
    pub instructions: u64,
    pub data_words: u64,
    pub too_short: u64,
    pub unknown: u64,
    pub truncated: u64,
    pub break_seen: bool,
}

impl DisassemblyStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Comptabilise une ligne décodée
    pub fn record(&mut self, kind: &LineKind) {
        self.lines += 1;
        match kind {
            LineKind::Instruction(instruction) => {
                self.instructions += 1;
                if *instruction == Instruction::Break {
                    self.break_seen = true;
                }
            }
            LineKind::Data(_) => self.data_words += 1,
            LineKind::TooShort => self.too_short += 1,
            LineKind::UnknownOpcode { .. } => self.unknown += 1,
            LineKind::Truncated { .. } => self.truncated += 1,
        }
    }
}

/// Désassembleur : possède la table des opcodes et le compteur d'adresse
#[derive(Debug, Clone)]
pub struct Disassembler {
    /// Table des opcodes (lecture seule)
    table: OpcodeTable,

    /// Adresse de la première ligne
    base_address: u32,

    /// Adresse de la prochaine ligne
    address: u32,

    /// Statistiques de la passe courante
    stats: DisassemblyStats,
}

impl Disassembler {
    /// Crée un désassembleur démarrant à `base_address`
    pub fn new(table: OpcodeTable, base_address: u32) -> Self {
        Self {
            table,
            base_address,
            address: base_address,
            stats: DisassemblyStats::new(),
        }
    }

    /// Désassembleur LEGv8 standard, à partir de l'adresse 96
    pub fn legv8() -> Result<Self, TableError> {
        Ok(Self::new(OpcodeTable::legv8()?, TEXT_SEGMENT_BASE))
    }

    /// Décode une ligne à l'adresse courante.
    ///
    /// L'adresse avance de 4 octets quel que soit le résultat, y compris en cas d'erreur.
    pub fn step(&mut self, line: &str) -> Result<DecodedLine, DecodeError> {
        let address = self.address;
        self.address = self.address.wrapping_add(WORD_SIZE);

        let decoded = decode(&self.table, line, address)?;
        self.stats.record(&decoded.kind);
        Ok(decoded)
    }

    /// Décode une séquence de lignes
    pub fn disassemble<I, S>(&mut self, lines: I) -> Result<Vec<DecodedLine>, DecodeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut decoded = Vec::new();
        for line in lines {
            decoded.push(self.step(line.as_ref())?);
        }

        debug!(
            "Désassemblage terminé: {} lignes, {} instructions, {} mots de données, {} annotations",
            self.stats.lines,
            self.stats.instructions,
            self.stats.data_words,
            self.stats.too_short + self.stats.unknown + self.stats.truncated
        );
        Ok(decoded)
    }

    /// Revient à l'adresse de base et remet les statistiques à zéro
    pub fn reset(&mut self) {
        self.address = self.base_address;
        self.stats.reset();
    }

    pub fn address(&self) -> u32 {
        self.address
    }

    pub fn base_address(&self) -> u32 {
        self.base_address
    }

    pub fn stats(&self) -> &DisassemblyStats {
        &self.stats
    }

    pub fn table(&self) -> &OpcodeTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassembler_initialization() {
        let disassembler = Disassembler::legv8().unwrap();
        assert_eq!(disassembler.address(), 96);
        assert_eq!(disassembler.base_address(), 96);
        assert_eq!(disassembler.stats(), &DisassemblyStats::default());
    }

    #[test]
    fn test_address_advances_on_error() {
        let mut disassembler = Disassembler::legv8().unwrap();

        assert!(disassembler.step("10x1").is_err());
        assert_eq!(disassembler.address(), 100);

        let line = disassembler.step("1").unwrap();
        assert_eq!(line.address, 100);
        assert_eq!(disassembler.address(), 104);
    }

    #[test]
    fn test_stats_and_reset() {
        let mut disassembler = Disassembler::legv8().unwrap();
        let lines = [
            "10001011000000100000000000100011",
            "11111110110111101111111111100111",
            "11111111111111111111111111111111",
            "101",
            "0000000",
        ];
        disassembler.disassemble(lines).unwrap();

        let stats = disassembler.stats();
        assert_eq!(stats.lines, 5);
        assert_eq!(stats.instructions, 2);
        assert_eq!(stats.data_words, 1);
        assert_eq!(stats.too_short, 1);
        assert_eq!(stats.unknown, 1);
        assert!(stats.break_seen);

        disassembler.reset();
        assert_eq!(disassembler.address(), 96);
        assert_eq!(disassembler.stats().lines, 0);
    }
}
