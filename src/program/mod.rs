//! Chargement des programmes en texte binaire et écriture des listings

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Erreurs de validation d'un programme
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error("ligne {line_number}: texte binaire attendu, trouvé {content:?}")]
    InvalidLine { line_number: usize, content: String },
}

/// Valide un programme en mémoire : une instruction par ligne, uniquement `0`, `1`,
/// espaces et tabulations. Les lignes vides sont conservées (une adresse chacune).
pub fn parse_program(text: &str) -> Result<Vec<String>, ProgramError> {
    text.lines()
        .enumerate()
        .map(|(index, line)| {
            if line.chars().all(|c| matches!(c, '0' | '1' | ' ' | '\t')) {
                Ok(line.to_string())
            } else {
                Err(ProgramError::InvalidLine {
                    line_number: index + 1,
                    content: line.to_string(),
                })
            }
        })
        .collect()
}

/// Charge et valide un fichier programme
pub fn load_program<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Lecture du programme impossible: {}", path.display()))?;
    let lines = parse_program(&text)
        .with_context(|| format!("Programme invalide: {}", path.display()))?;

    info!("Programme chargé: {} ({} lignes)", path.display(), lines.len());
    Ok(lines)
}

/// Écrit un listing, une ligne rendue par entrée
pub fn write_listing<P, I, S>(path: P, lines: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push('\n');
    }

    fs::write(path, contents)
        .with_context(|| format!("Écriture du listing impossible: {}", path.display()))?;
    info!("Listing écrit: {}", path.display());
    Ok(())
}
