//! Configuration du désassembleur

use serde::{Deserialize, Serialize};
use anyhow::{Context, Result};
use std::fs;

/// Configuration principale du désassembleur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisassemblerConfig {
    #[serde(default)]
    pub disassembly: DisassemblyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisassemblyConfig {
    /// Adresse de la première ligne (début du segment de texte)
    pub base_address: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Suffixe ajouté au préfixe de sortie ("_dis.txt")
    pub listing_suffix: String,
    /// Journaliser le résumé de la passe
    pub log_summary: bool,
}

impl Default for DisassemblyConfig {
    fn default() -> Self {
        Self {
            base_address: crate::TEXT_SEGMENT_BASE,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            listing_suffix: "_dis.txt".to_string(),
            log_summary: true,
        }
    }
}

impl Default for DisassemblerConfig {
    fn default() -> Self {
        Self {
            disassembly: DisassemblyConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl DisassemblerConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Lecture de la configuration impossible: {}", path))?;
        let config: DisassemblerConfig = toml::from_str(&contents)?;
        Ok(config)
    }
    
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
    
    pub fn load_or_default(path: &str) -> Self {
        Self::load_from_file(path).unwrap_or_default()
    }

    /// Chemin du listing pour un préfixe de sortie
    pub fn listing_path(&self, output_prefix: &str) -> String {
        format!("{}{}", output_prefix, self.output.listing_suffix)
    }
}
