//! Formats d'instructions LEGv8
//!
//! Les positions de bits sont numérotées de gauche à droite : la position 0 est
//! le bit de poids fort du mot 32 bits, la position 31 le bit de poids faible.
//!
//! ```text
//! R     |  opcode:11  |  Rm:5  | shamt:6 |  Rn:5  |  Rd:5  |
//! I     |  opcode:10  |     imm:12       |  Rn:5  |  Rd:5  |
//! D     |  opcode:11  |  imm:9   | op2:2 |  Rn:5  |  Rt:5  |
//! CB    |  opcode:8 |          imm:19             |  Rt:5  |
//! IM    |  opcode:9  |shift:2|       imm:16       |  Rd:5  |
//! B     |  opcode:6 |s|            magnitude:25            |
//! ```

use super::instructions::{Format, Instruction, InstructionDescriptor};

/// Extrait le champ `[start, end]` (inclusif) d'un mot
pub fn field(word: u32, start: u32, end: u32) -> u32 {
    debug_assert!(start <= end && end < 32);
    let width = end - start + 1;
    let value = word >> (31 - end);
    if width == 32 {
        value
    } else {
        value & ((1u32 << width) - 1)
    }
}

/// Interprète `value` comme un entier signé de `width` bits en complément à deux :
/// `value - 2^width` si le bit de poids fort du champ vaut 1, sinon `value`.
pub fn sign_extend(value: u32, width: u32) -> i64 {
    debug_assert!(width >= 1 && width <= 32);
    let value = value as i64;
    if (value >> (width - 1)) & 1 == 1 {
        value - (1i64 << width)
    } else {
        value
    }
}

/// Convertit une chaîne binaire déjà validée en entier (bits au-delà de 32 ignorés)
pub fn parse_word(bits: &str) -> u32 {
    bits.bytes()
        .take(32)
        .fold(0u32, |acc, b| (acc << 1) | u32::from(b == b'1'))
}

/// Découpe les bits bruts selon les frontières de champs du format
pub fn group_bits(bits: &str, format: Format) -> String {
    let boundaries: &[usize] = match format {
        Format::R => &[11, 16, 22, 27],
        Format::I => &[10, 22, 27],
        Format::D => &[11, 20, 22, 27],
        Format::Cb => &[8, 27],
        Format::Im => &[9, 11, 27],
        Format::B => &[6],
        Format::Break => &[8, 11, 16, 21, 26],
        Format::Nop => &[],
    };

    let mut groups = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0;
    for &end in boundaries.iter().filter(|&&end| end < bits.len()) {
        groups.push(&bits[start..end]);
        start = end;
    }
    groups.push(&bits[start..]);
    groups.join(" ")
}

/// Décode les opérandes d'un mot 32 bits selon le format du descripteur
pub fn decode_fields(descriptor: InstructionDescriptor, word: u32) -> Instruction {
    let mnemonic = descriptor.mnemonic;

    match descriptor.format {
        Format::R => {
            let rm = field(word, 11, 15) as u8;
            let shamt = field(word, 16, 21) as u8;
            let rn = field(word, 22, 26) as u8;
            let rd = field(word, 27, 31) as u8;
            if mnemonic.is_shift() {
                Instruction::Shift { mnemonic, rd, rn, shamt }
            } else {
                Instruction::Register { mnemonic, rd, rn, rm }
            }
        }

        Format::I => Instruction::Immediate {
            mnemonic,
            rd: field(word, 27, 31) as u8,
            rn: field(word, 22, 26) as u8,
            immediate: sign_extend(field(word, 10, 21), 12) as i32,
        },

        // Offset non signé (9 bits)
        Format::D => Instruction::Memory {
            mnemonic,
            rt: field(word, 27, 31) as u8,
            rn: field(word, 22, 26) as u8,
            offset: field(word, 11, 19),
        },

        Format::Cb => Instruction::ConditionalBranch {
            mnemonic,
            rt: field(word, 27, 31) as u8,
            offset: sign_extend(field(word, 8, 26), 19) as i32,
        },

        Format::Im => Instruction::WideImmediate {
            mnemonic,
            rd: field(word, 27, 31) as u8,
            immediate: field(word, 11, 26) as u16,
            shift: (field(word, 9, 10) * 16) as u8,
        },

        // Le signe est porté par le bit 6, la magnitude n'est jamais en complément à deux
        Format::B => {
            let magnitude = field(word, 7, 31) as i32;
            let offset = if field(word, 6, 6) == 1 { -magnitude } else { magnitude };
            Instruction::Branch { mnemonic, offset }
        }

        Format::Break => Instruction::Break,
        Format::Nop => Instruction::Nop,
    }
}
