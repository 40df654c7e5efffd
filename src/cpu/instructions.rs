//! Instructions LEGv8 reconnues par le désassembleur

use std::fmt;

use strum::{Display, EnumString, IntoStaticStr};

/// Mnémoniques supportés
#[derive(Display, EnumString, IntoStaticStr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Mnemonic {
    // Branchements
    B,
    Cbz,
    Cbnz,

    // Immédiats larges
    Movz,
    Movk,

    // Immédiats 12 bits
    Addi,
    Subi,

    // Registre / registre
    And,
    Add,
    Orr,
    Sub,
    Eor,

    // Décalages
    Lsr,
    Lsl,
    Asr,

    // Accès mémoire
    Stur,
    Ldur,

    // Système
    Break,
    Nop,
}

impl Mnemonic {
    /// Les décalages du format R utilisent `shamt` au lieu de `Rm`
    pub fn is_shift(self) -> bool {
        matches!(self, Mnemonic::Lsr | Mnemonic::Lsl | Mnemonic::Asr)
    }
}

/// Formats d'instructions (disposition des champs de bits)
#[derive(Display, EnumString, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Format {
    R,
    I,
    D,
    B,
    Cb,
    Im,
    Break,
    Nop,
}

/// Entrée de la table des opcodes : mnémonique + format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstructionDescriptor {
    pub mnemonic: Mnemonic,
    pub format: Format,
}

impl InstructionDescriptor {
    pub const fn new(mnemonic: Mnemonic, format: Format) -> Self {
        Self { mnemonic, format }
    }
}

/// Instruction décodée avec ses opérandes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Format R : `Rd, Rn, Rm`
    Register { mnemonic: Mnemonic, rd: u8, rn: u8, rm: u8 },

    /// Format R (LSR/LSL/ASR) : `Rd, Rn, #shamt`
    Shift { mnemonic: Mnemonic, rd: u8, rn: u8, shamt: u8 },

    /// Format I : `Rd, Rn, #imm` (immédiat signé 12 bits)
    Immediate { mnemonic: Mnemonic, rd: u8, rn: u8, immediate: i32 },

    /// Format D : `Rt, [Rn, #offset]`
    Memory { mnemonic: Mnemonic, rt: u8, rn: u8, offset: u32 },

    /// Format CB : `Rt, #offset` (déplacement signé 19 bits)
    ConditionalBranch { mnemonic: Mnemonic, rt: u8, offset: i32 },

    /// Format IM : `Rd, #imm, LSL #shift`
    WideImmediate { mnemonic: Mnemonic, rd: u8, immediate: u16, shift: u8 },

    /// Format B : `#offset`
    Branch { mnemonic: Mnemonic, offset: i32 },

    Break,
    Nop,
}

impl Instruction {
    pub fn mnemonic(&self) -> Mnemonic {
        match self {
            Instruction::Register { mnemonic, .. }
            | Instruction::Shift { mnemonic, .. }
            | Instruction::Immediate { mnemonic, .. }
            | Instruction::Memory { mnemonic, .. }
            | Instruction::ConditionalBranch { mnemonic, .. }
            | Instruction::WideImmediate { mnemonic, .. }
            | Instruction::Branch { mnemonic, .. } => *mnemonic,
            Instruction::Break => Mnemonic::Break,
            Instruction::Nop => Mnemonic::Nop,
        }
    }

    /// Liste des opérandes au format texte (vide pour BREAK et NOP)
    pub fn operands(&self) -> String {
        match self {
            Instruction::Register { rd, rn, rm, .. } => format!("R{}, R{}, R{}", rd, rn, rm),
            Instruction::Shift { rd, rn, shamt, .. } => format!("R{}, R{}, #{}", rd, rn, shamt),
            Instruction::Immediate { rd, rn, immediate, .. } => {
                format!("R{}, R{}, #{}", rd, rn, immediate)
            }
            Instruction::Memory { rt, rn, offset, .. } => format!("R{}, [R{}, #{}]", rt, rn, offset),
            Instruction::ConditionalBranch { rt, offset, .. } => format!("R{}, #{}", rt, offset),
            Instruction::WideImmediate { rd, immediate, shift, .. } => {
                format!("R{}, #{}, LSL #{}", rd, immediate, shift)
            }
            Instruction::Branch { offset, .. } => format!("#{}", offset),
            Instruction::Break | Instruction::Nop => String::new(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands = self.operands();
        if operands.is_empty() {
            write!(f, "{}", self.mnemonic())
        } else {
            write!(f, "{} \t{}", self.mnemonic(), operands)
        }
    }
}

/// Résultat de la classification d'une ligne
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Instruction reconnue
    Instruction(Instruction),

    /// Mot de données signé (mot 32 bits sans opcode connu)
    Data(i32),

    /// Moins de 6 bits : aucun opcode possible
    TooShort,

    /// Aucun préfixe de la table ne correspond
    UnknownOpcode { opcode: String },

    /// Opcode reconnu mais mot incomplet (< 32 bits)
    Truncated { mnemonic: Mnemonic, length: usize },
}

impl LineKind {
    /// Vrai pour les conditions signalées en texte annoté
    pub fn is_annotation(&self) -> bool {
        matches!(
            self,
            LineKind::TooShort | LineKind::UnknownOpcode { .. } | LineKind::Truncated { .. }
        )
    }
}

/// Ligne décodée, éphémère : construite, écrite puis jetée
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLine {
    /// Bits d'entrée, espaces supprimés
    pub raw_bits: String,

    /// Adresse de la ligne
    pub address: u32,

    /// Classification de la ligne
    pub kind: LineKind,

    /// Texte de désassemblage
    pub rendered: String,
}

impl DecodedLine {
    pub fn instruction(&self) -> Option<&Instruction> {
        match &self.kind {
            LineKind::Instruction(instruction) => Some(instruction),
            _ => None,
        }
    }
}

impl fmt::Display for DecodedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mnemonic_text() {
        assert_eq!(Mnemonic::Cbnz.to_string(), "CBNZ");
        assert_eq!(Mnemonic::from_str("LDUR").unwrap(), Mnemonic::Ldur);
        let name: &'static str = Mnemonic::Break.into();
        assert_eq!(name, "BREAK");
        assert_eq!(Format::Im.to_string(), "IM");
    }

    #[test]
    fn test_operand_rendering() {
        let add = Instruction::Register { mnemonic: Mnemonic::Add, rd: 3, rn: 1, rm: 2 };
        assert_eq!(add.to_string(), "ADD \tR3, R1, R2");

        let movk = Instruction::WideImmediate { mnemonic: Mnemonic::Movk, rd: 4, immediate: 7, shift: 32 };
        assert_eq!(movk.operands(), "R4, #7, LSL #32");

        let ldur = Instruction::Memory { mnemonic: Mnemonic::Ldur, rt: 1, rn: 2, offset: 8 };
        assert_eq!(ldur.operands(), "R1, [R2, #8]");

        assert_eq!(Instruction::Break.to_string(), "BREAK");
    }
}
