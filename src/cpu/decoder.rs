//! Décodeur d'instructions LEGv8
//!
//! Transforme une ligne de texte binaire et son adresse en une ligne de
//! désassemblage. Les lignes de 32 bits sans opcode connu sont des mots de
//! données (ceux qui suivent BREAK).

use log::{debug, warn};

use super::error::DecodeError;
use super::instruction_formats::{decode_fields, group_bits, parse_word, sign_extend};
use super::instructions::{DecodedLine, Format, Instruction, LineKind};
use super::opcode_table::OpcodeTable;
use crate::{MIN_OPCODE_BITS, WORD_BITS};

/// Décode une ligne à l'adresse donnée.
///
/// Les espaces et tabulations sont ignorés. Seul un caractère non binaire produit
/// une erreur ; les lignes trop courtes ou inconnues sont rendues en texte annoté.
pub fn decode(table: &OpcodeTable, line: &str, address: u32) -> Result<DecodedLine, DecodeError> {
    let raw_bits = strip_line(line)?;
    let kind = classify(table, &raw_bits);
    let rendered = render(&raw_bits, address, &kind);

    if kind.is_annotation() {
        warn!("{}", rendered);
    } else {
        debug!("{}", rendered);
    }

    Ok(DecodedLine {
        raw_bits,
        address,
        kind,
        rendered,
    })
}

/// Supprime les séparateurs et vérifie que la ligne ne contient que des 0 et des 1
pub fn strip_line(line: &str) -> Result<String, DecodeError> {
    let mut bits = String::with_capacity(WORD_BITS);
    for character in line.chars().filter(|c| !c.is_whitespace()) {
        match character {
            '0' | '1' => bits.push(character),
            _ => {
                return Err(DecodeError::InvalidBit {
                    character,
                    position: bits.len(),
                })
            }
        }
    }
    Ok(bits)
}

/// Classe une ligne déjà nettoyée
fn classify(table: &OpcodeTable, bits: &str) -> LineKind {
    if bits.len() < MIN_OPCODE_BITS {
        return LineKind::TooShort;
    }

    match table.match_prefix(bits) {
        Some((_, descriptor)) if bits.len() < WORD_BITS => LineKind::Truncated {
            mnemonic: descriptor.mnemonic,
            length: bits.len(),
        },
        Some((_, descriptor)) => {
            if bits.len() > WORD_BITS {
                warn!(
                    "Ligne de {} bits: seuls les {} premiers sont décodés",
                    bits.len(),
                    WORD_BITS
                );
            }
            LineKind::Instruction(decode_fields(descriptor, parse_word(bits)))
        }
        None if bits.len() == WORD_BITS => {
            LineKind::Data(sign_extend(parse_word(bits), WORD_BITS as u32) as i32)
        }
        // Le dernier préfixe essayé est toujours le plus court
        None => LineKind::UnknownOpcode {
            opcode: bits[..MIN_OPCODE_BITS].to_string(),
        },
    }
}

/// Produit le texte final d'une ligne
fn render(bits: &str, address: u32, kind: &LineKind) -> String {
    match kind {
        LineKind::Instruction(instruction) => {
            let format = instruction_format(instruction);
            let word = &bits[..WORD_BITS];
            format!("{} \t{} \t{}", group_bits(word, format), address, instruction)
        }
        LineKind::Data(value) => format!("{} \t{} \t{}", bits, address, value),
        LineKind::TooShort => {
            format!("Line too short to contain an opcode at address {}", address)
        }
        LineKind::UnknownOpcode { opcode } => {
            format!("Unknown instruction with opcode: {} at address {}", opcode, address)
        }
        LineKind::Truncated { mnemonic, length } => format!(
            "Truncated {} instruction ({} bits) at address {}",
            mnemonic, length, address
        ),
    }
}

fn instruction_format(instruction: &Instruction) -> Format {
    match instruction {
        Instruction::Register { .. } | Instruction::Shift { .. } => Format::R,
        Instruction::Immediate { .. } => Format::I,
        Instruction::Memory { .. } => Format::D,
        Instruction::ConditionalBranch { .. } => Format::Cb,
        Instruction::WideImmediate { .. } => Format::Im,
        Instruction::Branch { .. } => Format::B,
        Instruction::Break => Format::Break,
        Instruction::Nop => Format::Nop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::instructions::Mnemonic;

    fn table() -> OpcodeTable {
        OpcodeTable::legv8().unwrap()
    }

    #[test]
    fn test_strip_line() {
        assert_eq!(strip_line("1000 1011\t000").unwrap(), "10001011000");
        assert_eq!(
            strip_line("10 2").unwrap_err(),
            DecodeError::InvalidBit { character: '2', position: 2 }
        );
    }

    #[test]
    fn test_decode_register_line() {
        let line = decode(&table(), "10001011000 00010 000000 00001 00011", 96).unwrap();
        assert_eq!(line.address, 96);
        assert_eq!(
            line.instruction(),
            Some(&Instruction::Register { mnemonic: Mnemonic::Add, rd: 3, rn: 1, rm: 2 })
        );
        assert_eq!(line.rendered, "10001011000 00010 000000 00001 00011 \t96 \tADD \tR3, R1, R2");
    }

    #[test]
    fn test_decode_break_and_data() {
        let table = table();

        let line = decode(&table, "11111110110111101111111111100111", 120).unwrap();
        assert_eq!(line.kind, LineKind::Instruction(Instruction::Break));
        assert_eq!(line.rendered, "11111110 110 11110 11111 11111 100111 \t120 \tBREAK");

        let line = decode(&table, &"0".repeat(32), 124).unwrap();
        assert_eq!(line.kind, LineKind::Data(0));

        let line = decode(&table, &"1".repeat(32), 128).unwrap();
        assert_eq!(line.kind, LineKind::Data(-1));
        assert_eq!(line.rendered, format!("{} \t128 \t-1", "1".repeat(32)));
    }

    #[test]
    fn test_short_and_unknown_lines() {
        let table = table();

        let line = decode(&table, "1011", 96).unwrap();
        assert_eq!(line.kind, LineKind::TooShort);
        assert_eq!(line.rendered, "Line too short to contain an opcode at address 96");

        let line = decode(&table, "0000000", 100).unwrap();
        assert_eq!(line.kind, LineKind::UnknownOpcode { opcode: "000000".to_string() });
        assert_eq!(line.rendered, "Unknown instruction with opcode: 000000 at address 100");

        let line = decode(&table, "", 104).unwrap();
        assert_eq!(line.kind, LineKind::TooShort);
    }

    #[test]
    fn test_truncated_line() {
        let line = decode(&table(), "10110100 0000", 96).unwrap();
        assert_eq!(line.kind, LineKind::Truncated { mnemonic: Mnemonic::Cbz, length: 12 });
        assert!(line.kind.is_annotation());
    }
}
