//! Validate content command
//!
//! Loads every data file the battle reads and fails on the first parse error
//! or on any dangling reference between catalogs.

use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

use battle_content::ContentFactory;
use battle_core::{ClassOracle, EncounterOracle, build_enemies, build_player};

use crate::utils;

/// Load every content file and check cross references
#[derive(Parser, Debug)]
pub struct ValidateContent {
    /// Content directory (defaults to the one shipped with battle-content)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl ValidateContent {
    pub fn execute(self) -> Result<()> {
        let data_dir = utils::data_dir(self.data_dir);
        println!(
            "{} {}",
            style("Validating content in").bold(),
            style(data_dir.display()).cyan()
        );

        let content = ContentFactory::new(&data_dir).load()?;

        // Instantiate everything once so level growth and unlock grants run.
        for id in content.class_ids() {
            build_player(&content, id, id, 1)?;
        }
        let encounters: Vec<&str> = content.encounter_ids().collect();
        for id in &encounters {
            if let Some(specs) = content.encounter(id) {
                build_enemies(&content, specs)?;
            }
        }

        let classes = content.class_ids();
        println!("  {} {} classes", style("✓").green(), classes.len());
        println!(
            "  {} {} abilities",
            style("✓").green(),
            content.abilities().len()
        );
        println!("  {} {} items", style("✓").green(), content.item_count());
        println!("  {} {} encounters", style("✓").green(), encounters.len());

        for id in classes {
            if let Some(class) = content.class(id) {
                let unlocks: Vec<String> = class
                    .unlocks
                    .iter()
                    .map(|u| format!("{}@{}", u.ability, u.level))
                    .collect();
                println!(
                    "    {:<10} {}",
                    style(id).bold(),
                    style(unlocks.join(", ")).dim()
                );
            }
        }

        println!();
        println!("{}", style("✓ Content is valid").green().bold());
        Ok(())
    }
}
