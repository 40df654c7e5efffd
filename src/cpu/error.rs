//! Erreurs du désassembleur

use thiserror::Error;

/// Erreurs de construction de la table des opcodes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("clé d'opcode dupliquée: {key}")]
    DuplicateKey { key: String },

    #[error("longueur de clé invalide ({length} bits): {key}")]
    InvalidKeyLength { key: String, length: usize },

    #[error("clé d'opcode non binaire: {key}")]
    InvalidKeyCharacter { key: String },

    #[error("la clé {shorter} est un préfixe de la clé {longer}")]
    OverlappingKeys { shorter: String, longer: String },
}

/// Violation du contrat d'entrée : la ligne doit être du texte binaire
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("caractère non binaire {character:?} en position {position}")]
    InvalidBit { character: char, position: usize },
}
