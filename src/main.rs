use anyhow::Result;
use legv8_disasm::*;
use log::info;
use std::env;
use std::process;

const USAGE: &str = "Usage: legv8-disasm -i <fichier_entrée> -o <préfixe_sortie> [--config <fichier.toml>]";

fn main() -> Result<()> {
    // Initialiser le logging
    env_logger::init();
    info!("Démarrage de LEGv8 Disasm v{}", VERSION);

    // Traitement simple des arguments
    let args: Vec<String> = env::args().collect();
    let mut input_file: Option<String> = None;
    let mut output_prefix: Option<String> = None;
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-i" if i + 1 < args.len() => {
                input_file = Some(args[i + 1].clone());
                i += 1;
            }
            "-o" if i + 1 < args.len() => {
                output_prefix = Some(args[i + 1].clone());
                i += 1;
            }
            "--config" if i + 1 < args.len() => {
                config_path = Some(args[i + 1].clone());
                i += 1;
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let (input_file, output_prefix) = match (input_file, output_prefix) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            eprintln!("Les fichiers d'entrée et de sortie doivent être fournis");
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let config = match config_path {
        Some(path) => DisassemblerConfig::load_from_file(&path)?,
        None => DisassemblerConfig::default(),
    };

    let program = load_program(&input_file)?;

    let mut disassembler = Disassembler::new(OpcodeTable::legv8()?, config.disassembly.base_address);
    let listing = disassembler.disassemble(&program)?;

    write_listing(config.listing_path(&output_prefix), listing.iter().map(|line| &line.rendered))?;

    if config.output.log_summary {
        let stats = disassembler.stats();
        info!(
            "{} instructions, {} mots de données, BREAK {}",
            stats.instructions,
            stats.data_words,
            if stats.break_seen { "trouvé" } else { "absent" }
        );
    }

    Ok(())
}
